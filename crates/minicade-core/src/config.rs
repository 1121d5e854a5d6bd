use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Env var naming a TOML config file to load instead of the default path.
pub const CONFIG_ENV_VAR: &str = "MINICADE_CONFIG";

/// Config file read when the env var is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config/minicade.toml";

/// Tunables for the catalog and its mini-games. Defaults match the
/// shipped game behaviour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeConfig {
    pub memory: MemoryConfig,
    pub reaction: ReactionConfig,
    pub guess: GuessConfig,
    pub clicker: ClickerConfig,
    pub reviews: ReviewConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// How long a revealed pair stays face up before it is checked.
    pub settle_delay_ms: u64,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: 1_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactionConfig {
    /// Shortest wait before "go" (inclusive).
    pub min_delay_ms: u64,
    /// Longest wait before "go" (exclusive).
    pub max_delay_ms: u64,
}

impl Default for ReactionConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 2_000,
            max_delay_ms: 5_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuessConfig {
    pub min: u32,
    pub max: u32,
}

impl Default for GuessConfig {
    fn default() -> Self {
        Self { min: 1, max: 100 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClickerConfig {
    pub duration_secs: u32,
    /// Countdown resolution.
    pub tick_ms: u64,
}

impl Default for ClickerConfig {
    fn default() -> Self {
        Self {
            duration_secs: 10,
            tick_ms: 1_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Author name stamped on reviews submitted from this session.
    pub default_author: String,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            default_author: "Player".to_string(),
        }
    }
}

impl ArcadeConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Load from `$MINICADE_CONFIG`, then `config/minicade.toml`, falling
    /// back to defaults when neither exists or the file is invalid.
    pub fn load() -> Self {
        let path = std::env::var(CONFIG_ENV_VAR)
            .ok()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

        if !Path::new(&path).exists() {
            tracing::info!(path = %path, "no config file found, using defaults");
            return Self::default();
        }

        match Self::from_path(&path) {
            Ok(config) => {
                tracing::info!(path = %path, "loaded configuration");
                config
            },
            Err(e) => {
                tracing::warn!(path = %path, "{e}, using defaults");
                Self::default()
            },
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.memory.settle_delay_ms == 0 {
            return Err(invalid("memory.settle_delay_ms must be > 0"));
        }
        if self.reaction.min_delay_ms == 0 {
            return Err(invalid("reaction.min_delay_ms must be > 0"));
        }
        if self.reaction.min_delay_ms >= self.reaction.max_delay_ms {
            return Err(invalid(
                "reaction.min_delay_ms must be below reaction.max_delay_ms",
            ));
        }
        if self.guess.min > self.guess.max {
            return Err(invalid("guess.min must not exceed guess.max"));
        }
        if self.clicker.duration_secs == 0 {
            return Err(invalid("clicker.duration_secs must be > 0"));
        }
        if self.clicker.tick_ms == 0 {
            return Err(invalid("clicker.tick_ms must be > 0"));
        }
        if self.reviews.default_author.trim().is_empty() {
            return Err(invalid("reviews.default_author must not be blank"));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::Invalid(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = ArcadeConfig::default();
        assert_eq!(cfg.memory.settle_delay_ms, 1_000);
        assert_eq!(cfg.reaction.min_delay_ms, 2_000);
        assert_eq!(cfg.reaction.max_delay_ms, 5_000);
        assert_eq!((cfg.guess.min, cfg.guess.max), (1, 100));
        assert_eq!(cfg.clicker.duration_secs, 10);
        assert_eq!(cfg.clicker.tick_ms, 1_000);
        assert_eq!(cfg.reviews.default_author, "Player");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn parse_partial_toml() {
        let toml_str = r#"
[clicker]
duration_secs = 5

[reviews]
default_author = "Gleb"
"#;
        let cfg = ArcadeConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(cfg.clicker.duration_secs, 5);
        assert_eq!(cfg.clicker.tick_ms, 1_000);
        assert_eq!(cfg.reviews.default_author, "Gleb");
        assert_eq!(cfg.reaction, ReactionConfig::default());
    }

    #[test]
    fn empty_document_is_default() {
        let cfg = ArcadeConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, ArcadeConfig::default());
    }

    #[test]
    fn rejects_inverted_reaction_window() {
        let toml_str = r#"
[reaction]
min_delay_ms = 3000
max_delay_ms = 3000
"#;
        let err = ArcadeConfig::from_toml_str(toml_str).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_zero_durations() {
        let mut cfg = ArcadeConfig::default();
        cfg.clicker.duration_secs = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = ArcadeConfig::default();
        cfg.memory.settle_delay_ms = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_blank_author() {
        let mut cfg = ArcadeConfig::default();
        cfg.reviews.default_author = "  ".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = ArcadeConfig::from_toml_str("[clicker\nduration_secs = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ArcadeConfig::from_path("/nonexistent/minicade.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
