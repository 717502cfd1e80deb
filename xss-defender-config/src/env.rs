// Environment variable loading

use crate::{ConfigError, Result};
use std::collections::HashMap;
use std::env;
use tracing::debug;

/// Default prefix for environment variables
pub const DEFAULT_PREFIX: &str = "XSS_DEFENDER";

/// Turn `ESCAPE_AFTER_TRIM` into the property key `escape-after-trim`.
pub fn property_key(name: &str) -> String {
    name.trim_matches('_').to_lowercase().replace('_', "-")
}

/// Environment variable loader
pub struct EnvLoader {
    prefix: String,
}

impl EnvLoader {
    /// Create a loader for variables named `{prefix}_{KEY}`
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Get the variable prefix
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Load every prefixed variable, keyed by property name
    pub fn load(&self) -> Result<HashMap<String, String>> {
        let mut config = HashMap::new();
        let prefix = format!("{}_", self.prefix);

        for (key, value) in env::vars() {
            if let Some(name) = key.strip_prefix(&prefix) {
                config.insert(property_key(name), value);
            }
        }

        debug!(prefix = %self.prefix, count = config.len(), "Loaded environment properties");
        Ok(config)
    }

    /// Load a specific property, e.g. `escape-after-trim`
    pub fn load_var(&self, key: &str) -> Result<String> {
        let full_key = format!(
            "{}_{}",
            self.prefix,
            key.to_uppercase().replace('-', "_")
        );

        env::var(&full_key).map_err(ConfigError::EnvError)
    }

    /// Load with default value
    pub fn load_var_or(&self, key: &str, default: &str) -> String {
        self.load_var(key).unwrap_or_else(|_| default.to_string())
    }

    /// Load a `.env` file into the process environment.
    ///
    /// Without a path, a missing `.env` in the working directory is not an error.
    pub fn load_dotenv(path: Option<&str>) -> Result<()> {
        match path {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| ConfigError::LoadError(e.to_string()))?;
            }
            None => {
                dotenvy::dotenv().ok();
            }
        }
        Ok(())
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}
