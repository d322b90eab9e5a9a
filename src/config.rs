//! Service configuration.

use std::path::Path;

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::games::chopsticks::{ChopsticksGame, GameError};
use crate::storage::{StorageBackend, open_store};

/// Environment variable overriding [`ServerConfig::host`].
pub const ENV_HOST: &str = "CHOPSTICKS_HOST";
/// Environment variable overriding [`ServerConfig::port`].
pub const ENV_PORT: &str = "CHOPSTICKS_PORT";
/// Environment variable overriding [`ServerConfig::storage`].
pub const ENV_STORAGE: &str = "CHOPSTICKS_STORAGE";
/// Environment variable overriding [`ServerConfig::db_path`].
pub const ENV_DB_PATH: &str = "CHOPSTICKS_DB_PATH";

/// Configuration for the game service.
///
/// Layered lowest to highest: defaults, TOML file, environment, CLI flags.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    host: String,

    /// Port to bind.
    port: u16,

    /// Which hand store to use.
    storage: StorageBackend,

    /// SQLite database file, used by the `sqlite` backend.
    db_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            storage: StorageBackend::default(),
            db_path: "chopsticks.db".to_string(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::new(format!("Failed to read config file: {}", e))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            ConfigError::new(format!("Failed to parse config: {}", e))
        })?;

        info!(storage = %config.storage, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file if given (defaults otherwise), then applies the process
    /// environment.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_env(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an environment lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a port or storage value does not parse.
    #[instrument(skip(self, lookup))]
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(host) = lookup(ENV_HOST) {
            self.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.port = port.parse().map_err(|e| {
                ConfigError::new(format!("Invalid {}: '{}' ({})", ENV_PORT, port, e))
            })?;
        }
        if let Some(storage) = lookup(ENV_STORAGE) {
            self.storage = storage.parse().map_err(|_| {
                ConfigError::new(format!("Unknown storage backend in {}: '{}'", ENV_STORAGE, storage))
            })?;
        }
        if let Some(db_path) = lookup(ENV_DB_PATH) {
            self.db_path = db_path;
        }
        debug!(config = ?self, "Environment applied");
        Ok(self)
    }

    /// Applies command-line overrides; `None` keeps the current value.
    #[instrument(skip(self))]
    pub fn with_overrides(
        mut self,
        host: Option<String>,
        port: Option<u16>,
        storage: Option<StorageBackend>,
        db_path: Option<String>,
    ) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        if let Some(storage) = storage {
            self.storage = storage;
        }
        if let Some(db_path) = db_path {
            self.db_path = db_path;
        }
        self
    }

    /// Opens the configured store and starts a fresh game on it.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Storage`] if the store cannot be opened or reset.
    #[instrument(skip(self), fields(storage = %self.storage))]
    pub fn open_game(&self) -> Result<ChopsticksGame, GameError> {
        let store = open_store(self.storage, &self.db_path)?;
        ChopsticksGame::new(store)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
