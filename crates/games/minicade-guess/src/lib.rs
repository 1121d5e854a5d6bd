use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use minicade_core::catalog::GameVariant;
use minicade_core::config::GuessConfig;
use minicade_core::error::InputParseError;
use minicade_core::game_trait::{GameEvent, GameInput, GameMetadata, Hint, MiniGame};
use minicade_core::time::Millis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuessPhase {
    Playing,
    /// The secret is only revealed once found.
    Won { target: u32 },
}

/// Serializable state for the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessState {
    pub phase: GuessPhase,
    /// Every parsed guess, in order.
    pub attempts: Vec<i64>,
    pub last_hint: Option<Hint>,
}

/// Result of one accepted guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Hint(Hint),
    Correct { attempts: usize },
}

/// Guess the secret number between `min` and `max`.
pub struct NumberGuess {
    state: GuessState,
    target: u32,
    rng: StdRng,
    config: GuessConfig,
}

impl NumberGuess {
    pub fn new() -> Self {
        Self::with_rng(GuessConfig::default(), StdRng::from_os_rng())
    }

    pub fn with_rng(config: GuessConfig, mut rng: StdRng) -> Self {
        let target = draw_target(&config, &mut rng);
        Self::with_target(config, rng, target)
    }

    /// Start with a known secret. Later resets draw from `rng`.
    pub fn with_target(config: GuessConfig, rng: StdRng, target: u32) -> Self {
        Self {
            state: GuessState {
                phase: GuessPhase::Playing,
                attempts: Vec::new(),
                last_hint: None,
            },
            target,
            rng,
            config,
        }
    }

    pub fn state(&self) -> &GuessState {
        &self.state
    }

    pub fn attempts(&self) -> &[i64] {
        &self.state.attempts
    }

    pub fn range(&self) -> (u32, u32) {
        (self.config.min, self.config.max)
    }

    /// Submit a guess. Returns `None` once the number has been found.
    pub fn guess(&mut self, n: i64) -> Option<GuessOutcome> {
        if self.state.phase != GuessPhase::Playing {
            return None;
        }
        self.state.attempts.push(n);

        let target = i64::from(self.target);
        if n == target {
            self.state.phase = GuessPhase::Won {
                target: self.target,
            };
            self.state.last_hint = None;
            tracing::debug!(attempts = self.state.attempts.len(), "guess: found");
            return Some(GuessOutcome::Correct {
                attempts: self.state.attempts.len(),
            });
        }

        let hint = if n < target { Hint::Higher } else { Hint::Lower };
        self.state.last_hint = Some(hint);
        Some(GuessOutcome::Hint(hint))
    }

    /// Parse the guess field and submit it.
    pub fn guess_text(&mut self, text: &str) -> Result<Option<GuessOutcome>, InputParseError> {
        let n = parse_guess(text)?;
        Ok(self.guess(n))
    }

    fn restart(&mut self) {
        self.target = draw_target(&self.config, &mut self.rng);
        self.state = GuessState {
            phase: GuessPhase::Playing,
            attempts: Vec::new(),
            last_hint: None,
        };
    }
}

impl Default for NumberGuess {
    fn default() -> Self {
        Self::new()
    }
}

/// Uniform over the configured bounds, taken in either order.
fn draw_target(config: &GuessConfig, rng: &mut StdRng) -> u32 {
    let (low, high) = if config.min <= config.max {
        (config.min, config.max)
    } else {
        (config.max, config.min)
    };
    rng.random_range(low..=high)
}

/// Parse the raw text of the guess field. Only a whole integer, optionally
/// surrounded by whitespace, is accepted: "42abc" and "3.7" are rejected.
pub fn parse_guess(text: &str) -> Result<i64, InputParseError> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| InputParseError::NotANumber(text.to_string()))
}

impl MiniGame for NumberGuess {
    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Guess the Number".to_string(),
            description: format!(
                "I picked a number from {} to {}. Try to guess it!",
                self.config.min, self.config.max
            ),
            variant: GameVariant::NumberGuess,
        }
    }

    fn apply_input(&mut self, input: &GameInput, _now: Millis) -> Vec<GameEvent> {
        match input {
            GameInput::Start => {
                self.restart();
                vec![GameEvent::Started]
            },
            GameInput::Guess { text } => match self.guess_text(text) {
                Ok(Some(GuessOutcome::Hint(hint))) => vec![GameEvent::Hint(hint)],
                Ok(Some(GuessOutcome::Correct { attempts })) => vec![GameEvent::NumberFound {
                    target: self.target,
                    attempts,
                }],
                Ok(None) => Vec::new(),
                Err(e) => {
                    tracing::debug!("guess: discarding input: {e}");
                    Vec::new()
                },
            },
            GameInput::Click | GameInput::Reveal { .. } => Vec::new(),
        }
    }

    fn on_timer(&mut self, _now: Millis) -> Vec<GameEvent> {
        Vec::new()
    }

    fn next_deadline(&self) -> Option<Millis> {
        None
    }

    fn reset(&mut self) {
        self.restart();
    }

    fn is_finished(&self) -> bool {
        matches!(self.state.phase, GuessPhase::Won { .. })
    }

    fn serialize_state(&self) -> Vec<u8> {
        rmp_serde::to_vec(&self.state).expect("game state serialization must succeed")
    }
}
