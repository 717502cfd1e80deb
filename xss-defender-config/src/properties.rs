//! Defender properties and their layered loading

use crate::env::EnvLoader;
use crate::loader::{ConfigLoader, FileFormat};
use crate::validation::{ConfigValidator, Validate};
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};
use xss_defender_core::{DefenseConfig, DefenseStrategy, XssConfig, XssDefender, XssMiddleware};

/// Externally configured defender settings.
///
/// The strategy stays a raw string until a [`DefenseConfig`] is built, which
/// is where an unsupported value is reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct DefenderProperties {
    /// Whether the defender runs at all
    pub enabled: bool,
    /// `trim`, `escape` or `throw`
    pub strategy: String,
    /// Escape the cleaned text as well (trim only)
    #[serde(alias = "escape_after_trim")]
    pub escape_after_trim: bool,
}

impl Default for DefenderProperties {
    fn default() -> Self {
        Self {
            enabled: true,
            strategy: DefenseStrategy::default().to_string(),
            escape_after_trim: false,
        }
    }
}

impl DefenderProperties {
    /// Start a layered load
    pub fn builder() -> PropertiesBuilder {
        PropertiesBuilder::new()
    }

    /// Apply one raw property. Unknown keys are skipped.
    pub fn apply(&mut self, key: &str, value: &Value) -> Result<()> {
        let key = key.trim().to_lowercase().replace('_', "-");
        match key.as_str() {
            "enabled" => self.enabled = ConfigValidator::boolean(value, &key)?,
            "strategy" => self.strategy = ConfigValidator::string(value, &key)?,
            "escape-after-trim" => self.escape_after_trim = ConfigValidator::boolean(value, &key)?,
            _ => debug!(key = %key, "Ignoring unknown XSS defender property"),
        }
        Ok(())
    }

    /// Build the engine configuration
    pub fn defense_config(&self) -> Result<DefenseConfig> {
        Ok(DefenseConfig::from_raw(&self.strategy, self.escape_after_trim)?)
    }

    /// Build the engine
    pub fn build_defender(&self) -> Result<XssDefender> {
        self.defense_config().map(XssDefender::new)
    }

    /// Build the request middleware
    pub fn build_middleware(&self, config: XssConfig) -> Result<XssMiddleware> {
        let defender = self.build_defender()?;
        Ok(XssMiddleware::new(config.with_enabled(self.enabled), defender))
    }
}

impl Validate for DefenderProperties {
    fn validate(&self) -> Result<()> {
        ConfigValidator::strategy(&self.strategy).map(|_| ())
    }
}

/// Layered properties loader: defaults, then files in order, then environment.
pub struct PropertiesBuilder {
    files: Vec<(String, Option<FileFormat>)>,
    load_env: bool,
    load_dotenv: bool,
    dotenv_path: Option<String>,
    env_prefix: String,
}

impl PropertiesBuilder {
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            load_env: false,
            load_dotenv: false,
            dotenv_path: None,
            env_prefix: crate::env::DEFAULT_PREFIX.to_string(),
        }
    }

    /// Add a configuration file, format detected from its extension
    pub fn add_file(mut self, path: impl Into<String>) -> Self {
        self.files.push((path.into(), None));
        self
    }

    /// Add a configuration file with an explicit format
    pub fn add_file_with_format(mut self, path: impl Into<String>, format: FileFormat) -> Self {
        self.files.push((path.into(), Some(format)));
        self
    }

    /// Read `{prefix}_*` environment variables last
    pub fn load_env(mut self) -> Self {
        self.load_env = true;
        self
    }

    /// Load a `.env` file into the environment before reading it
    pub fn load_dotenv(mut self, path: Option<String>) -> Self {
        self.load_dotenv = true;
        self.dotenv_path = path;
        self
    }

    /// Set the environment variable prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load and validate the properties
    pub fn build(self) -> Result<DefenderProperties> {
        let mut properties = DefenderProperties::default();

        for (path, format) in &self.files {
            let loader = match format {
                Some(format) => ConfigLoader::new(*format),
                None => ConfigLoader::auto(path)?,
            };
            for (key, value) in loader.load_file(path)? {
                properties.apply(&key, &value)?;
            }
            debug!(path = %path, "Loaded XSS defender properties file");
        }

        if self.load_dotenv {
            EnvLoader::load_dotenv(self.dotenv_path.as_deref())?;
        }

        if self.load_env || self.load_dotenv {
            let loader = EnvLoader::new(self.env_prefix.as_str());
            for (key, value) in loader.load()? {
                properties.apply(&key, &Value::String(value))?;
            }
        }

        properties.validate()?;

        info!(
            enabled = properties.enabled,
            strategy = %properties.strategy,
            escape_after_trim = properties.escape_after_trim,
            "Loaded XSS defender properties"
        );
        Ok(properties)
    }
}

impl Default for PropertiesBuilder {
    fn default() -> Self {
        Self::new()
    }
}
