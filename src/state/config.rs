//! Engine configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::generate::DEFAULT_MAX_DRAW_ATTEMPTS;
use super::grid::DEFAULT_GRID_SIZE;
use super::matcher::MIN_RUN_LENGTH;

/// Settings for a game session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Board edge length
    pub grid_size: usize,

    /// Seed for the session's token source; `None` draws from OS entropy
    pub seed: Option<u64>,

    /// Draws tried per cell before generation falls back to a fixed pick
    pub max_draw_attempts: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            seed: None,
            max_draw_attempts: DEFAULT_MAX_DRAW_ATTEMPTS,
        }
    }
}

impl EngineConfig {
    /// Default settings with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the settings describe a playable board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < MIN_RUN_LENGTH {
            return Err(ConfigError::GridTooSmall {
                size: self.grid_size,
                min: MIN_RUN_LENGTH,
            });
        }
        if self.max_draw_attempts == 0 {
            return Err(ConfigError::NoDrawAttempts);
        }
        Ok(())
    }
}

/// Config errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    GridTooSmall { size: usize, min: usize },
    NoDrawAttempts,
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GridTooSmall { size, min } => {
                write!(f, "Grid size {} is too small, need at least {}", size, min)
            }
            Self::NoDrawAttempts => write!(f, "max_draw_attempts must be at least 1"),
            Self::Parse(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
