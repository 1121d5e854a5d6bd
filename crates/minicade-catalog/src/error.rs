use thiserror::Error;

use minicade_core::catalog::{GameId, GameVariant};
use minicade_core::error::{ConfigError, ValidationError};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("game {0} is not in the catalog")]
    UnknownGame(GameId),
    #[error("no game is selected")]
    NotSelected,
    #[error("{0:?} games are not available in this build")]
    VariantUnavailable(GameVariant),
    #[error("game id {0} appears more than once in the catalog")]
    DuplicateGameId(GameId),
    #[error("failed to parse seed catalog: {0}")]
    Seed(#[from] toml::de::Error),
    #[error(transparent)]
    Review(#[from] ValidationError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
