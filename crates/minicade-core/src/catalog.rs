use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownGenre;

/// Unique, immutable identifier of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub u32);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Genre {
    Action,
    Puzzle,
}

impl Genre {
    pub fn label(self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Puzzle => "Puzzle",
        }
    }
}

/// Which mini-game state machine a catalog entry launches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameVariant {
    Memory,
    Clicker,
    NumberGuess,
    Reaction,
}

/// A catalog entry. Immutable once the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub title: String,
    pub genre: Genre,
    /// Average rating in `0.0..=5.0`.
    pub rating: f32,
    pub review_count: u32,
    /// Opaque token the renderer maps to artwork.
    pub image_token: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub is_new: bool,
    pub variant: GameVariant,
}

/// Genre selector for the catalog tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GenreFilter {
    #[default]
    All,
    Only(Genre),
}

impl GenreFilter {
    /// Tab order shown above the catalog grid.
    pub const TABS: [GenreFilter; 3] = [
        GenreFilter::All,
        GenreFilter::Only(Genre::Action),
        GenreFilter::Only(Genre::Puzzle),
    ];

    pub fn label(self) -> &'static str {
        match self {
            GenreFilter::All => "All",
            GenreFilter::Only(genre) => genre.label(),
        }
    }

    pub fn matches(self, genre: Genre) -> bool {
        match self {
            GenreFilter::All => true,
            GenreFilter::Only(wanted) => wanted == genre,
        }
    }
}

impl FromStr for GenreFilter {
    type Err = UnknownGenre;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        Self::TABS
            .into_iter()
            .find(|tab| tab.label().eq_ignore_ascii_case(label))
            .ok_or_else(|| UnknownGenre(s.to_string()))
    }
}

/// Games matching both the genre selector and a case-insensitive title
/// substring, in catalog order. An empty query matches every title.
pub fn filter_games<'a>(games: &'a [Game], genre: GenreFilter, query: &str) -> Vec<&'a Game> {
    let needle = query.to_lowercase();
    games
        .iter()
        .filter(|game| genre.matches(game.genre))
        .filter(|game| game.title.to_lowercase().contains(&needle))
        .collect()
}

/// Games promoted in the "top popular" strip.
pub fn featured_games(games: &[Game]) -> Vec<&Game> {
    games.iter().filter(|game| game.featured).collect()
}

/// Games flagged as new releases.
pub fn new_releases(games: &[Game]) -> Vec<&Game> {
    games.iter().filter(|game| game.is_new).collect()
}
