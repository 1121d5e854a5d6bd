use serde::{Deserialize, Serialize};

use crate::catalog::GameVariant;
use crate::time::Millis;

/// Core trait every Minicade mini-game implements.
///
/// The controller owns the clock and the event loop; a game only reacts to
/// discrete inputs and to its own timers coming due.
pub trait MiniGame: Send {
    /// Name and blurb shown above the play area.
    fn metadata(&self) -> GameMetadata;

    /// Apply one input event received at `now`. Inputs that do not apply to
    /// this game or to its current state are ignored.
    fn apply_input(&mut self, input: &GameInput, now: Millis) -> Vec<GameEvent>;

    /// Fire every timer due at or before `now`, in deadline order.
    fn on_timer(&mut self, now: Millis) -> Vec<GameEvent>;

    /// When the next timer is due, if any.
    fn next_deadline(&self) -> Option<Millis>;

    /// Back to the initial state. Pending timers are cancelled and will
    /// never fire. Best scores survive.
    fn reset(&mut self);

    /// Whether the current round has ended (won, or time up).
    fn is_finished(&self) -> bool;

    /// MessagePack snapshot of the game state for the renderer.
    fn serialize_state(&self) -> Vec<u8>;
}

/// Game metadata for the play screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMetadata {
    pub name: String,
    pub description: String,
    pub variant: GameVariant,
}

/// Discrete input events delivered by the interaction layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameInput {
    /// Start, retry or "new game" button.
    Start,
    /// Click on the main play surface.
    Click,
    /// Click on a memory card.
    Reveal { index: usize },
    /// Submitted text of the guess field.
    Guess { text: String },
}

/// Direction hint after a wrong guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hint {
    Higher,
    Lower,
}

/// Events emitted by a game for the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    CardRevealed { index: usize },
    PairMatched { first: usize, second: usize },
    PairHidden { first: usize, second: usize },
    BoardCleared { moves: u32 },
    Armed { go_at: Millis },
    Go,
    FalseStart,
    ReactionRecorded { reaction_ms: u64, best_ms: u64 },
    Hint(Hint),
    NumberFound { target: u32, attempts: usize },
    Clicked { clicks: u32 },
    CountdownTick { remaining_secs: u32 },
    TimeUp { clicks: u32, best: u32 },
}

/// Generates the `MiniGame` methods that read the same way in every game:
/// `serialize_state` and `next_deadline`.
///
/// Requires the implementing struct to have a serializable `state` field and
/// a `timers: Timers<_>` field.
#[macro_export]
macro_rules! minigame_boilerplate {
    () => {
        fn serialize_state(&self) -> Vec<u8> {
            rmp_serde::to_vec(&self.state).expect("game state serialization must succeed")
        }

        fn next_deadline(&self) -> Option<$crate::time::Millis> {
            self.timers.next_deadline()
        }
    };
}
