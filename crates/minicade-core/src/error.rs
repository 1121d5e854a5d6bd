use thiserror::Error;

use crate::catalog::GameId;

/// Rejected review submission. Nothing is stored when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("rating {0} is outside 1..=5")]
    RatingOutOfRange(u8),
    #[error("review comment is empty")]
    EmptyComment,
    #[error("game {0} is not in the catalog")]
    UnknownGame(GameId),
    #[error("review id {0} is already taken")]
    DuplicateReviewId(u32),
}

/// Guess text that is not an integer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputParseError {
    #[error("{0:?} is not a number")]
    NotANumber(String),
}

/// Genre label that matches neither "All" nor a known genre.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown genre {0:?}")]
pub struct UnknownGenre(pub String);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}
