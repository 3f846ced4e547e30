// Configuration sources understood by the engine
use std::collections::HashMap;
use std::path::PathBuf;

/// Separator between nesting levels in environment variable names
pub const ENV_SEPARATOR: &str = "__";

/// A single layer of configuration
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// File on disk; the format is inferred from the extension
    File { path: PathBuf, required: bool },
    /// Environment variables starting with `prefix` followed by `__`.
    /// `vars` replaces the process environment when set.
    Env {
        prefix: String,
        vars: Option<HashMap<String, String>>,
    },
}

impl ConfigSource {
    /// File that must exist
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File {
            path: path.into(),
            required: true,
        }
    }

    /// File that is skipped when absent
    pub fn optional_file(path: impl Into<PathBuf>) -> Self {
        Self::File {
            path: path.into(),
            required: false,
        }
    }

    /// Process environment
    pub fn env(prefix: impl Into<String>) -> Self {
        Self::Env {
            prefix: prefix.into(),
            vars: None,
        }
    }

    /// Fixed set of variables standing in for the process environment
    pub fn env_from(prefix: impl Into<String>, vars: HashMap<String, String>) -> Self {
        Self::Env {
            prefix: prefix.into(),
            vars: Some(vars),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::File { path, .. } => format!("file:{}", path.display()),
            Self::Env { prefix, .. } => format!("env:{prefix}{ENV_SEPARATOR}*"),
        }
    }
}
