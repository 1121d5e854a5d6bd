use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use minicade_core::catalog::{Game, GameId, GenreFilter, featured_games, filter_games, new_releases};
use minicade_core::config::ArcadeConfig;
use minicade_core::game_trait::{GameEvent, GameInput, GameMetadata, MiniGame};
use minicade_core::review::{Review, ReviewStore};
use minicade_core::time::{Clock, Millis, SystemClock};

use crate::error::CatalogError;
use crate::registry::GameRegistry;
use crate::seed::{Catalog, default_catalog};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Catalog grid, nothing open.
    #[default]
    Browsing,
    /// Description and reviews of the selected game.
    Describing,
    /// The selected game's play area.
    Playing,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSelection {
    pub selected_game_id: Option<GameId>,
    pub mode: Mode,
}

/// Session state of the storefront: catalog filters, the open game and its
/// running mini-game, and the review board.
///
/// Single-threaded. The host calls [`tick`](Self::tick) whenever the clock
/// passes [`next_deadline`](Self::next_deadline), and forwards every player
/// input through [`input`](Self::input).
pub struct CatalogController {
    games: Vec<Game>,
    reviews: ReviewStore,
    genre: GenreFilter,
    query: String,
    selection: CatalogSelection,
    active: Option<Box<dyn MiniGame>>,
    registry: GameRegistry,
    clock: Box<dyn Clock>,
    rng: StdRng,
    config: ArcadeConfig,
}

impl CatalogController {
    /// Fails if `config` does not pass [`ArcadeConfig::validate`].
    pub fn new(
        catalog: Catalog,
        config: ArcadeConfig,
        clock: Box<dyn Clock>,
        rng: StdRng,
    ) -> Result<Self, CatalogError> {
        config.validate()?;
        Ok(Self {
            games: catalog.games,
            reviews: catalog.reviews,
            genre: GenreFilter::All,
            query: String::new(),
            selection: CatalogSelection::default(),
            active: None,
            registry: GameRegistry::new(),
            clock,
            rng,
            config,
        })
    }

    /// Built-in catalog, config from disk, wall clock and OS entropy.
    pub fn with_defaults() -> Result<Self, CatalogError> {
        Self::new(
            default_catalog()?,
            ArcadeConfig::load(),
            Box::new(SystemClock::new()),
            StdRng::from_os_rng(),
        )
    }

    /// Replace the game registry, e.g. to plug in extra variants.
    pub fn with_registry(mut self, registry: GameRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn config(&self) -> &ArcadeConfig {
        &self.config
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn game(&self, id: GameId) -> Option<&Game> {
        self.games.iter().find(|g| g.id == id)
    }

    // ================================================================
    // Browsing
    // ================================================================

    pub fn genre(&self) -> GenreFilter {
        self.genre
    }

    pub fn set_genre(&mut self, genre: GenreFilter) {
        self.genre = genre;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Catalog grid under the current genre tab and search text.
    pub fn visible_games(&self) -> Vec<&Game> {
        filter_games(&self.games, self.genre, &self.query)
    }

    pub fn featured(&self) -> Vec<&Game> {
        featured_games(&self.games)
    }

    pub fn new_releases(&self) -> Vec<&Game> {
        new_releases(&self.games)
    }

    // ================================================================
    // Selection
    // ================================================================

    pub fn selection(&self) -> CatalogSelection {
        self.selection
    }

    pub fn selected_game(&self) -> Option<&Game> {
        self.selection.selected_game_id.and_then(|id| self.game(id))
    }

    /// Open a game's description. Any running game is dropped with its
    /// timers. Unknown ids leave the selection untouched.
    pub fn select(&mut self, id: GameId) -> Result<&Game, CatalogError> {
        let index = self
            .games
            .iter()
            .position(|g| g.id == id)
            .ok_or(CatalogError::UnknownGame(id))?;
        self.active = None;
        self.selection = CatalogSelection {
            selected_game_id: Some(id),
            mode: Mode::Describing,
        };
        tracing::debug!(game = %id, "selected");
        Ok(&self.games[index])
    }

    /// Launch a fresh instance of the selected game's variant.
    pub fn play(&mut self) -> Result<GameMetadata, CatalogError> {
        let game = self.selected_game().ok_or(CatalogError::NotSelected)?;
        let (id, variant) = (game.id, game.variant);

        let rng = StdRng::from_rng(&mut self.rng);
        let machine = self
            .registry
            .create(variant, &self.config, rng)
            .ok_or(CatalogError::VariantUnavailable(variant))?;
        let metadata = machine.metadata();

        self.active = Some(machine);
        self.selection.mode = Mode::Playing;
        tracing::debug!(game = %id, ?variant, "playing");
        Ok(metadata)
    }

    /// Leave the play area for the description, dropping the running game.
    pub fn stop_playing(&mut self) {
        if self.selection.mode == Mode::Playing {
            self.active = None;
            self.selection.mode = Mode::Describing;
        }
    }

    /// Close the game window and return to the catalog.
    pub fn close(&mut self) {
        if let Some(id) = self.selection.selected_game_id {
            tracing::debug!(game = %id, "closed");
        }
        self.active = None;
        self.selection = CatalogSelection::default();
    }

    // ================================================================
    // Play
    // ================================================================

    pub fn active_game(&self) -> Option<&dyn MiniGame> {
        self.active.as_deref()
    }

    /// MessagePack snapshot of the running game.
    pub fn game_state(&self) -> Option<Vec<u8>> {
        self.active.as_ref().map(|game| game.serialize_state())
    }

    /// Deliver timers that came due, then the input, both at the clock's
    /// current time. Without a running game the input is dropped.
    pub fn input(&mut self, input: &GameInput) -> Vec<GameEvent> {
        let mut events = self.tick();
        let now = self.clock.now_ms();
        if let Some(game) = self.active.as_mut() {
            events.extend(game.apply_input(input, now));
        }
        events
    }

    /// Fire the running game's due timers.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let now = self.clock.now_ms();
        match self.active.as_mut() {
            Some(game) => game.on_timer(now),
            None => Vec::new(),
        }
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.active.as_ref().and_then(|game| game.next_deadline())
    }

    // ================================================================
    // Reviews
    // ================================================================

    pub fn reviews(&self) -> &ReviewStore {
        &self.reviews
    }

    /// Reviews of the selected game, newest first.
    pub fn reviews_for_selected(&self) -> Vec<&Review> {
        match self.selection.selected_game_id {
            Some(id) => self.reviews.reviews_for(id),
            None => Vec::new(),
        }
    }

    /// Post a review for the selected game, signed with the configured
    /// author and dated today.
    pub fn submit_review(&mut self, rating: u8, comment: &str) -> Result<Review, CatalogError> {
        let id = self
            .selection
            .selected_game_id
            .ok_or(CatalogError::NotSelected)?;
        let review = self.reviews.submit(
            id,
            rating,
            comment,
            &self.config.reviews.default_author,
            self.clock.today(),
        )?;
        Ok(review)
    }
}
