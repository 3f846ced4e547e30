use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::providers::{ConfigSource, ENV_SEPARATOR};

/// Layered configuration loader
#[derive(Debug, Clone, Default)]
pub struct ConfigEngine {
    sources: Vec<ConfigSource>,
}

impl ConfigEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source; later sources override earlier ones
    #[must_use]
    pub fn add_source(mut self, source: ConfigSource) -> Self {
        self.sources.push(source);
        self
    }

    pub fn sources(&self) -> &[ConfigSource] {
        &self.sources
    }

    /// Merge every source and deserialize the result into `T`
    pub fn get<T: DeserializeOwned>(&self) -> Result<T> {
        let mut builder = Config::builder();

        for source in &self.sources {
            debug!(source = %source.describe(), "Adding configuration source");
            builder = match source {
                ConfigSource::File { path, required } => {
                    if !path.exists() {
                        if *required {
                            return Err(ConfigError::SourceNotFound(path.display().to_string()));
                        }
                        continue;
                    }
                    builder.add_source(File::from(path.as_path()).required(*required))
                }
                ConfigSource::Env { prefix, vars } => builder.add_source(
                    Environment::with_prefix(prefix)
                        .prefix_separator(ENV_SEPARATOR)
                        .separator(ENV_SEPARATOR)
                        .try_parsing(true)
                        .source(vars.clone()),
                ),
            };
        }

        let merged = builder.build()?;
        Ok(merged.try_deserialize()?)
    }
}
