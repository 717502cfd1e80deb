//! The defense engine
//!
//! [`defend`] is a pure function of `(text, config)`: no state survives a
//! call, so a single [`XssDefender`] can be shared by any number of threads.

use crate::encoder::{XssEncoder, escape};
use crate::error::{DefenseError, DefenseResult};
use crate::sanitizer::clean;
use crate::strategy::{DefenseConfig, DefenseStrategy};
use crate::validator::XssValidator;
use tracing::{debug, trace, warn};

/// Defend a single text field according to `config`.
///
/// Absent, empty and whitespace-only input yields `""` under every strategy.
/// Otherwise the text is trimmed once and then:
///
/// - `trim`: cleaned against the allow-list, then escaped if `escape_after_trim`
/// - `escape`: entity-escaped; never fails
/// - `throw`: returned as-is if already clean, else [`DefenseError::Detected`]
pub fn defend(text: Option<&str>, config: &DefenseConfig) -> DefenseResult<String> {
    let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(String::new());
    };

    match config.strategy {
        DefenseStrategy::Trim => Ok(trim(text, config.escape_after_trim)),
        DefenseStrategy::Escape => Ok(escape_text(text)),
        DefenseStrategy::Throw => reject_unclean(text),
    }
}

fn trim(text: &str, escape_after_trim: bool) -> String {
    let cleaned = clean(text);
    debug!(input = %text, output = %cleaned, "Trimmed text for XSS defense");

    if cleaned != text {
        warn!(
            attack = %attack_label(text),
            input_len = text.len(),
            output_len = cleaned.len(),
            "XSS risk detected, input cleaned"
        );
    }

    // Escapes even when cleaning changed nothing.
    if escape_after_trim { escape(&cleaned) } else { cleaned }
}

fn escape_text(text: &str) -> String {
    if !XssEncoder::needs_escaping(text) {
        return text.to_string();
    }

    let escaped = escape(text);
    trace!(input = %text, output = %escaped, "Escaped text for XSS defense");
    escaped
}

fn reject_unclean(text: &str) -> DefenseResult<String> {
    if XssValidator::is_clean(text) {
        return Ok(text.to_string());
    }

    warn!(
        attack = %attack_label(text),
        input_len = text.len(),
        "XSS risk detected, input rejected"
    );
    debug!(input = %text, "Rejected input");
    Err(DefenseError::detected(text))
}

fn attack_label(text: &str) -> &'static str {
    XssValidator::detect_attack_type(text)
        .map(|kind| kind.as_str())
        .unwrap_or("disallowed markup")
}

/// A configured defense engine.
///
/// Holds the process-wide [`DefenseConfig`]; cheap to clone and safe to share.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XssDefender {
    config: DefenseConfig,
}

impl XssDefender {
    /// Create a defender for the given configuration
    pub fn new(config: DefenseConfig) -> Self {
        Self { config }
    }

    /// Create a defender from raw configuration values.
    ///
    /// Fails with [`DefenseError::UnsupportedStrategy`] for an unknown strategy.
    pub fn from_raw(strategy: &str, escape_after_trim: bool) -> DefenseResult<Self> {
        DefenseConfig::from_raw(strategy, escape_after_trim).map(Self::new)
    }

    /// Get the configuration
    pub fn config(&self) -> &DefenseConfig {
        &self.config
    }

    /// Get the configured strategy
    pub fn strategy(&self) -> DefenseStrategy {
        self.config.strategy
    }

    /// Defend a single text field. See [`defend`].
    pub fn defend(&self, text: Option<&str>) -> DefenseResult<String> {
        defend(text, &self.config)
    }
}
