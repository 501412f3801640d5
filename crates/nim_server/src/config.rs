//! Server configuration.
//!
//! Sources, lowest precedence first: built-in defaults, TOML file,
//! `NIM_*` environment variables, command-line overrides.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Where game states are kept.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StorageKind {
    /// Process-local map, lost on exit.
    Memory,
    /// SQLite database file.
    #[default]
    Sqlite,
}

/// Settings for the computer opponent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ComputerConfig {
    /// Seed for reproducible draws. Thread RNG when absent.
    #[serde(default)]
    seed: Option<u64>,
}

/// Game server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    host: String,

    /// Port to bind.
    port: u16,

    /// Storage backend.
    storage: StorageKind,

    /// SQLite database file, used when `storage = "sqlite"`.
    database_path: String,

    /// Computer opponent settings.
    computer: ComputerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            storage: StorageKind::Sqlite,
            database_path: "nim.db".to_string(),
            computer: ComputerConfig::default(),
        }
    }
}

/// Values given on the command line. `None` keeps the configured value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Address to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// Storage backend.
    pub storage: Option<StorageKind>,
    /// SQLite database file.
    pub database_path: Option<String>,
    /// Computer RNG seed.
    pub seed: Option<u64>,
}

impl ServerConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        debug!(?config, "Config parsed");
        Ok(config)
    }

    /// Resolves the full configuration: file (if present), environment, overrides.
    ///
    /// A missing file means defaults.
    #[instrument(skip(overrides))]
    pub fn load(path: Option<&Path>, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) if path.exists() => Self::from_file(path)?,
            Some(path) => {
                info!(
                    "Config file not found at {}, using defaults",
                    path.display()
                );
                Self::default()
            }
            None => Self::default(),
        };

        let config = config
            .with_env(|key| std::env::var(key).ok())?
            .with_overrides(overrides);
        info!(
            host = %config.host,
            port = config.port,
            storage = %config.storage,
            "Configuration resolved"
        );
        Ok(config)
    }

    /// Applies `NIM_*` variables read through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a numeric or enum variable does not parse.
    pub fn with_env(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(host) = lookup("NIM_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("NIM_PORT") {
            self.port = port
                .parse()
                .map_err(|e| ConfigError::new(format!("Invalid NIM_PORT '{}': {}", port, e)))?;
        }
        if let Some(storage) = lookup("NIM_STORAGE") {
            self.storage = storage.parse().map_err(|e| {
                ConfigError::new(format!("Invalid NIM_STORAGE '{}': {}", storage, e))
            })?;
        }
        if let Some(path) = lookup("NIM_DATABASE_PATH") {
            self.database_path = path;
        }
        if let Some(seed) = lookup("NIM_COMPUTER_SEED") {
            let seed = seed.parse().map_err(|e| {
                ConfigError::new(format!("Invalid NIM_COMPUTER_SEED '{}': {}", seed, e))
            })?;
            self.computer.seed = Some(seed);
        }
        Ok(self)
    }

    /// Applies command-line overrides.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(host) = overrides.host {
            self.host = host;
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(storage) = overrides.storage {
            self.storage = storage;
        }
        if let Some(path) = overrides.database_path {
            self.database_path = path;
        }
        if let Some(seed) = overrides.seed {
            self.computer.seed = Some(seed);
        }
        self
    }

    /// Socket address string for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
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
