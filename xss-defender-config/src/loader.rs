// Configuration file loaders

use crate::{ConfigError, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Table holding the defender properties inside a configuration file
pub const SECTION: &str = "xss-defender";

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FileFormat {
    Json,
    Toml,
    Env,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            "env" => Some(FileFormat::Env),
            _ => None,
        }
    }
}

/// Configuration file loader
pub struct ConfigLoader {
    format: FileFormat,
}

impl ConfigLoader {
    pub fn new(format: FileFormat) -> Self {
        Self { format }
    }

    /// Auto-detect format from file extension
    pub fn auto(path: &str) -> Result<Self> {
        let path_obj = Path::new(path);
        let file_name = path_obj.file_name().and_then(|s| s.to_str()).unwrap_or_default();

        // `.env` has no extension as far as Path is concerned
        if file_name == ".env" {
            return Ok(Self::new(FileFormat::Env));
        }

        let ext = path_obj
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ConfigError::LoadError("No file extension found".to_string()))?;

        let format = FileFormat::from_extension(ext)
            .ok_or_else(|| ConfigError::LoadError(format!("Unsupported format: {}", ext)))?;

        Ok(Self::new(format))
    }

    /// Get the file format
    pub fn format(&self) -> FileFormat {
        self.format
    }

    /// Load the defender properties table from a file
    pub fn load_file(&self, path: &str) -> Result<Map<String, Value>> {
        let content = fs::read_to_string(path)?;

        self.parse(&content)
    }

    /// Parse the defender properties table from a string.
    ///
    /// Uses the `xss-defender` table when present (`xss_defender` is accepted
    /// too), the top level otherwise.
    pub fn parse(&self, content: &str) -> Result<Map<String, Value>> {
        let value = match self.format {
            FileFormat::Json => self.parse_json(content)?,
            FileFormat::Toml => self.parse_toml(content)?,
            FileFormat::Env => self.parse_env(content),
        };

        let Value::Object(mut root) = value else {
            return Err(ConfigError::ParseError(
                "Configuration root must be a table".to_string(),
            ));
        };

        for section in [SECTION, "xss_defender"] {
            if let Some(table) = root.remove(section) {
                return match table {
                    Value::Object(map) => Ok(map),
                    _ => Err(ConfigError::ParseError(format!(
                        "'{}' must be a table",
                        section
                    ))),
                };
            }
        }

        Ok(root)
    }

    fn parse_json(&self, content: &str) -> Result<Value> {
        serde_json::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("JSON parse error: {}", e)))
    }

    fn parse_toml(&self, content: &str) -> Result<Value> {
        let toml_value: toml::Value = toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))?;

        serde_json::to_value(toml_value)
            .map_err(|e| ConfigError::ParseError(format!("TOML to JSON conversion error: {}", e)))
    }

    // KEY=value lines; `XSS_DEFENDER_` prefixes are stripped.
    fn parse_env(&self, content: &str) -> Value {
        let mut map = Map::new();
        let prefix = format!("{}_", crate::env::DEFAULT_PREFIX);

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let key = key.strip_prefix(&prefix).unwrap_or(key);
                let value = value.trim().trim_matches('"').trim_matches('\'');
                map.insert(crate::env::property_key(key), Value::String(value.to_string()));
            }
        }

        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_section() {
        let loader = ConfigLoader::new(FileFormat::Json);
        let json = r#"{"xss-defender": {"strategy": "throw", "enabled": true}, "other": 1}"#;

        let map = loader.parse(json).unwrap();
        assert_eq!(map.get("strategy"), Some(&Value::String("throw".to_string())));
        assert!(!map.contains_key("other"));
    }

    #[test]
    fn test_parse_json_top_level() {
        let loader = ConfigLoader::new(FileFormat::Json);

        let map = loader.parse(r#"{"strategy": "escape"}"#).unwrap();
        assert_eq!(map.get("strategy"), Some(&Value::String("escape".to_string())));
    }

    #[test]
    fn test_parse_toml() {
        let loader = ConfigLoader::new(FileFormat::Toml);
        let toml = r#"
            [xss-defender]
            strategy = "trim"
            escape-after-trim = true
        "#;

        let map = loader.parse(toml).unwrap();
        assert_eq!(map.get("escape-after-trim"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_parse_env() {
        let loader = ConfigLoader::new(FileFormat::Env);
        let env = r#"
            # Comment
            XSS_DEFENDER_STRATEGY="escape"
            ESCAPE_AFTER_TRIM=1
        "#;

        let map = loader.parse(env).unwrap();
        assert_eq!(map.get("strategy"), Some(&Value::String("escape".to_string())));
        assert_eq!(map.get("escape-after-trim"), Some(&Value::String("1".to_string())));
    }

    #[test]
    fn test_non_table_root() {
        let loader = ConfigLoader::new(FileFormat::Json);
        assert!(loader.parse("[1, 2]").is_err());
        assert!(loader.parse(r#"{"xss-defender": "trim"}"#).is_err());
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(FileFormat::from_extension("json"), Some(FileFormat::Json));
        assert_eq!(FileFormat::from_extension("TOML"), Some(FileFormat::Toml));
        assert_eq!(FileFormat::from_extension("env"), Some(FileFormat::Env));
        assert_eq!(FileFormat::from_extension("yaml"), None);

        assert_eq!(ConfigLoader::auto("conf/app.toml").unwrap().format(), FileFormat::Toml);
        assert_eq!(ConfigLoader::auto(".env").unwrap().format(), FileFormat::Env);
        assert!(ConfigLoader::auto("README").is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let loader = ConfigLoader::new(FileFormat::Toml);
        let err = loader.load_file("/nonexistent/xss-defender.toml").unwrap_err();

        assert!(matches!(err, ConfigError::IoError(_)));
        assert!(err.to_string().starts_with("IO error"));
    }
}
