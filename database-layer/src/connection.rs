// Database connection management
use crate::error::{DatabaseError, DatabaseResult};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Which store backs the repositories
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    Memory,
}

/// Database settings as read from configuration.
///
/// `url` and `password` are secrets and never appear in `Debug` output.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub backend: StorageBackend,
    /// Full connection string; takes precedence over the discrete fields
    pub url: Option<SecretString>,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: Option<SecretString>,
    pub database_name: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Postgres,
            url: None,
            host: "localhost".to_string(),
            port: 5432,
            username: "fitness".to_string(),
            password: None,
            database_name: "fitness_center".to_string(),
            max_connections: 10,
            acquire_timeout_secs: 5,
        }
    }
}

impl DatabaseSettings {
    /// Build connect options, exposing the secrets only here
    pub fn connect_options(&self) -> DatabaseResult<PgConnectOptions> {
        let mut options = match &self.url {
            Some(url) => PgConnectOptions::from_str(url.expose_secret())
                .map_err(|e| DatabaseError::ConfigurationError(format!("Invalid database url: {e}")))?,
            None => PgConnectOptions::new()
                .host(&self.host)
                .port(self.port)
                .username(&self.username)
                .database(&self.database_name),
        };

        if let Some(password) = &self.password {
            options = options.password(password.expose_secret());
        }

        Ok(options)
    }
}

/// Database connection pool wrapper
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Create a new database pool from settings
    pub async fn connect(settings: &DatabaseSettings) -> DatabaseResult<Self> {
        let options = settings.connect_options()?;

        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
            .connect_with(options)
            .await
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = settings.max_connections,
            "Database connection pool created successfully"
        );

        Ok(Self { pool })
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get the underlying PgPool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check if the pool is healthy
    pub async fn is_healthy(&self) -> bool {
        match sqlx::query("SELECT 1").fetch_one(&self.pool).await {
            Ok(_) => true,
            Err(e) => {
                warn!("Database health check failed: {}", e);
                false
            }
        }
    }

    /// Close the pool
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_output_redacts_password() {
        let settings = DatabaseSettings {
            password: Some(SecretString::new("hunter2".to_string())),
            url: Some(SecretString::new(
                "postgresql://fitness:hunter2@db/fitness_center".to_string(),
            )),
            ..DatabaseSettings::default()
        };

        let rendered = format!("{settings:?}");
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_invalid_url_is_configuration_error() {
        let settings = DatabaseSettings {
            url: Some(SecretString::new("not a url".to_string())),
            ..DatabaseSettings::default()
        };

        assert!(matches!(
            settings.connect_options(),
            Err(DatabaseError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_discrete_fields_build_options() {
        let settings = DatabaseSettings {
            host: "db.internal".to_string(),
            port: 6543,
            ..DatabaseSettings::default()
        };

        assert!(settings.connect_options().is_ok());
    }
}
