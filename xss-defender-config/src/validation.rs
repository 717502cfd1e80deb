// Configuration value validation

use crate::{ConfigError, Result};
use serde_json::Value;
use xss_defender_core::DefenseStrategy;

/// Trait for validating configuration
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Coercion and checks for raw property values
pub struct ConfigValidator;

impl ConfigValidator {
    /// Accept a JSON boolean or `true/false/1/0/yes/no/on/off`
    pub fn boolean(value: &Value, key: &str) -> Result<bool> {
        match value {
            Value::Bool(b) => Ok(*b),
            Value::String(s) => match s.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(true),
                "false" | "0" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::invalid_value(key, s.as_str())),
            },
            Value::Number(n) if n.as_u64() == Some(1) => Ok(true),
            Value::Number(n) if n.as_u64() == Some(0) => Ok(false),
            other => Err(ConfigError::invalid_value(key, other.to_string())),
        }
    }

    /// Accept a string value
    pub fn string(value: &Value, key: &str) -> Result<String> {
        match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(ConfigError::invalid_value(key, other.to_string())),
        }
    }

    /// Validate that a strategy name is supported
    pub fn strategy(value: &str) -> Result<DefenseStrategy> {
        Ok(value.parse::<DefenseStrategy>()?)
    }
}
