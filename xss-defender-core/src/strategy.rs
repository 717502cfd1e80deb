//! Defense strategies and engine configuration

use crate::error::{DefenseError, DefenseResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which algorithm the engine runs on non-empty input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefenseStrategy {
    /// Strip everything outside the allow-list
    #[default]
    Trim,
    /// Entity-escape markup-significant characters
    Escape,
    /// Reject input that does not already satisfy the allow-list
    Throw,
}

impl DefenseStrategy {
    /// All supported strategies
    pub const ALL: [DefenseStrategy; 3] = [Self::Trim, Self::Escape, Self::Throw];

    /// Get the configuration name of this strategy.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trim => "trim",
            Self::Escape => "escape",
            Self::Throw => "throw",
        }
    }
}

impl fmt::Display for DefenseStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DefenseStrategy {
    type Err = DefenseError;

    fn from_str(s: &str) -> DefenseResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "trim" => Ok(Self::Trim),
            "escape" => Ok(Self::Escape),
            "throw" => Ok(Self::Throw),
            _ => Err(DefenseError::unsupported_strategy(s)),
        }
    }
}

/// Process-wide engine configuration.
///
/// Built once at startup and read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DefenseConfig {
    /// Strategy applied to every non-empty input
    pub strategy: DefenseStrategy,
    /// Escape the cleaned text as well. Only read under [`DefenseStrategy::Trim`].
    #[serde(default)]
    pub escape_after_trim: bool,
}

impl DefenseConfig {
    /// Create a configuration for the given strategy
    pub fn new(strategy: DefenseStrategy) -> Self {
        Self {
            strategy,
            escape_after_trim: false,
        }
    }

    /// Parse the strategy from a raw configuration value.
    pub fn from_raw(strategy: &str, escape_after_trim: bool) -> DefenseResult<Self> {
        Ok(Self {
            strategy: strategy.parse()?,
            escape_after_trim,
        })
    }

    /// Set whether the cleaned text is escaped afterwards
    pub fn with_escape_after_trim(mut self, enable: bool) -> Self {
        self.escape_after_trim = enable;
        self
    }

    /// The escape-after-trim flag as the engine sees it: ignored unless trimming.
    pub fn effective_escape_after_trim(&self) -> bool {
        self.strategy == DefenseStrategy::Trim && self.escape_after_trim
    }
}
