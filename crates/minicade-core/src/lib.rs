pub mod catalog;
pub mod config;
pub mod error;
pub mod game_trait;
pub mod review;
pub mod time;
pub mod timer;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::catalog::{Game, GameId, GameVariant, Genre};
    use crate::game_trait::{GameEvent, GameInput, MiniGame};
    use crate::time::Millis;

    /// Deterministic RNG for reproducible boards and targets.
    pub fn seeded_rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    /// Fixed "today" used by review tests.
    pub fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 21).expect("valid date")
    }

    /// The six-game catalog the storefront ships with.
    pub fn sample_catalog() -> Vec<Game> {
        let game = |id, title: &str, genre, rating, review_count, token: &str, variant| Game {
            id: GameId(id),
            title: title.to_string(),
            genre,
            rating,
            review_count,
            image_token: token.to_string(),
            featured: false,
            is_new: false,
            variant,
        };
        vec![
            Game {
                featured: true,
                ..game(1, "Memory Master", Genre::Puzzle, 4.8, 1234, "puzzle", GameVariant::Memory)
            },
            Game {
                featured: true,
                ..game(2, "Speed Clicker", Genre::Action, 4.6, 892, "mouse", GameVariant::Clicker)
            },
            Game {
                is_new: true,
                ..game(3, "Number Guess", Genre::Puzzle, 4.9, 2156, "numbers", GameVariant::NumberGuess)
            },
            game(4, "Reaction Test", Genre::Action, 4.7, 567, "zap", GameVariant::Reaction),
            Game {
                is_new: true,
                ..game(5, "Color Memory", Genre::Puzzle, 4.5, 1890, "palette", GameVariant::Memory)
            },
            game(6, "Mega Clicker Pro", Genre::Action, 4.4, 743, "boom", GameVariant::Clicker),
        ]
    }

    /// Fire the game's timers one deadline at a time up to `until`,
    /// so each fire sees its own due time as "now".
    pub fn run_timers_until(game: &mut dyn MiniGame, until: Millis) -> Vec<GameEvent> {
        let mut events = Vec::new();
        while let Some(due) = game.next_deadline()
            && due <= until
        {
            events.extend(game.on_timer(due));
        }
        events
    }

    // ================================================================
    // MiniGame contract checks
    // ================================================================
    // Every MiniGame implementation must pass these. Game crates call them
    // from their own #[cfg(test)] modules with a concrete instance.

    /// metadata() must name the game and report its variant.
    pub fn contract_metadata_matches(game: &dyn MiniGame, variant: GameVariant) {
        let meta = game.metadata();
        assert!(!meta.name.is_empty(), "metadata name must not be empty");
        assert!(
            !meta.description.is_empty(),
            "metadata description must not be empty"
        );
        assert_eq!(meta.variant, variant);
    }

    /// A Start input must change the serialized state.
    pub fn contract_start_changes_state(game: &mut dyn MiniGame) {
        let before = game.serialize_state();
        let events = game.apply_input(&GameInput::Start, 0);
        let after = game.serialize_state();
        assert!(!after.is_empty(), "serialize_state must not be empty");
        assert_ne!(before, after, "Start must change game state");
        assert!(
            events.contains(&GameEvent::Started),
            "Start must emit GameEvent::Started"
        );
    }

    /// After `inputs` leave a timer pending, reset() must cancel it so that
    /// no later timer fire has any effect.
    pub fn contract_reset_cancels_timers(game: &mut dyn MiniGame, inputs: &[GameInput]) {
        for input in inputs {
            game.apply_input(input, 0);
        }
        assert!(
            game.next_deadline().is_some(),
            "inputs must leave a timer pending"
        );

        game.reset();
        assert_eq!(game.next_deadline(), None, "reset must cancel timers");

        let before = game.serialize_state();
        let events = game.on_timer(Millis::MAX);
        assert!(events.is_empty(), "stale timers must not emit events");
        assert_eq!(before, game.serialize_state(), "stale timers must not change state");
    }

    /// An input the game does not handle must be a silent no-op.
    pub fn contract_foreign_input_is_noop(game: &mut dyn MiniGame, input: &GameInput) {
        let before = game.serialize_state();
        let events = game.apply_input(input, 0);
        assert!(events.is_empty(), "{input:?} must emit no events");
        assert_eq!(before, game.serialize_state(), "{input:?} must not change state");
    }
}
