//! Configuration loading for the Fitness Center API
//!
//! Configuration is assembled from an ordered list of sources, later sources
//! overriding earlier ones:
//!
//! - **Local Files**: YAML, TOML or JSON, format picked from the extension
//! - **Environment Variables**: `PREFIX__SECTION__KEY` style variables
//!
//! Values are deserialized into caller-defined structs, so each crate owns
//! the shape of its own settings.
//!
//! # Example
//!
//! ```rust,no_run
//! use config_engine::{ConfigEngine, ConfigSource};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct AppConfig {
//!     port: u16,
//! }
//!
//! # fn main() -> Result<(), config_engine::ConfigError> {
//! let config: AppConfig = ConfigEngine::new()
//!     .add_source(ConfigSource::optional_file("fitness-server.yaml"))
//!     .add_source(ConfigSource::env("FITNESS"))
//!     .get()?;
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod error;
pub mod providers;

pub use engine::*;
pub use error::*;
pub use providers::*;
