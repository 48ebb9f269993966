//! Opponent configuration loading.
//!
//! Settings for the external engine opponent live in a small TOML file,
//! `opponent.toml` in the working directory. A missing file yields the
//! defaults; a malformed file is an error.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Configuration for the external engine opponent.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct OpponentConfig {
    /// Path to the UCI engine executable. Defaults to "stockfish"
    /// (assumes it is in PATH).
    pub engine_path: String,
    /// Elo the engine is limited to via `UCI_LimitStrength`/`UCI_Elo`.
    pub elo: u32,
    /// Search depth passed to `go depth`.
    pub depth: u32,
    /// How long to wait for any single engine response before giving up.
    pub response_timeout_ms: u64,
}

impl Default for OpponentConfig {
    fn default() -> Self {
        OpponentConfig {
            engine_path: "stockfish".to_string(),
            elo: 1000,
            depth: 1,
            response_timeout_ms: 5000,
        }
    }
}

impl OpponentConfig {
    /// Loads the configuration from [`Self::config_path()`], falling back
    /// to the defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be
    /// read, or [`ConfigError::ParseError`] on invalid TOML.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads the configuration from an explicit path.
    pub fn load_from(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Returns the path to the configuration file, `opponent.toml` in the
    /// current working directory.
    pub fn config_path() -> PathBuf {
        PathBuf::from("opponent.toml")
    }

    /// The response timeout as a [`Duration`].
    pub fn response_timeout(&self) -> Duration {
        Duration::from_millis(self.response_timeout_ms)
    }
}
