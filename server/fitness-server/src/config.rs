//! Server configuration
//!
//! Sources, lowest precedence first: built-in defaults, an optional config
//! file, then `FITNESS__SECTION__KEY` environment variables. Command line
//! flags are applied on top by the binary.

use std::path::Path;

use config_engine::{ConfigEngine, ConfigError, ConfigSource};
use database_layer::{DatabaseSettings, StorageBackend};
use serde::Deserialize;

/// Prefix of every environment variable read as configuration
pub const ENV_PREFIX: &str = "FITNESS";

/// Config file looked up when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "fitness-server.yaml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Requests still running after this many seconds get a 408
    pub request_timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Load from `path` (skipped when absent) and the process environment
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let engine = ConfigEngine::new()
            .add_source(ConfigSource::optional_file(path.as_ref()))
            .add_source(ConfigSource::env(ENV_PREFIX));

        Self::from_engine(&engine)
    }

    pub fn from_engine(engine: &ConfigEngine) -> Result<Self, ConfigError> {
        let config: Self = engine.get()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "server.host must not be empty".to_string(),
            ));
        }

        if self.server.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "server.request_timeout_secs must be at least 1".to_string(),
            ));
        }

        if self.database.backend == StorageBackend::Postgres && self.database.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "database.max_connections must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Address the listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
