//! Common error handling utilities for the Fitness Center API
//!
//! This crate holds the pieces of error handling shared by every other crate
//! in the workspace:
//!
//! - **`FitnessError`**: the process-level error returned from startup and
//!   shutdown paths of the server binary
//! - **Error codes**: stable, machine-readable codes included in every API
//!   error body so clients can branch without parsing messages
//!
//! # Example
//!
//! ```rust
//! use error_common::{codes, FitnessError, Result};
//!
//! fn parse_port(raw: &str) -> Result<u16> {
//!     raw.parse()
//!         .map_err(|_| FitnessError::ConfigError(format!("invalid port: {raw}")))
//! }
//!
//! assert!(parse_port("8080").is_ok());
//! assert_eq!(codes::validation::INVALID_INPUT, "VALIDATION_1001");
//! ```

pub mod codes;
pub mod types;

pub use types::*;
