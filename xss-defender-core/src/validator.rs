use crate::sanitizer;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Payload family reported when risky input is detected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttackKind {
    ScriptTag,
    EventHandler,
    JavaScriptUrl,
    VbScriptUrl,
    DataUrl,
    EmbeddedFrame,
}

impl AttackKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ScriptTag => "script injection",
            Self::EventHandler => "event handler injection",
            Self::JavaScriptUrl => "javascript protocol",
            Self::VbScriptUrl => "vbscript protocol",
            Self::DataUrl => "data url injection",
            Self::EmbeddedFrame => "embedded frame or object",
        }
    }
}

impl fmt::Display for AttackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Checked in order; the first match wins.
static PATTERNS: Lazy<Vec<(AttackKind, Regex)>> = Lazy::new(|| {
    [
        (AttackKind::ScriptTag, r"(?is)<\s*script\b"),
        (AttackKind::EventHandler, r"(?i)\bon[a-z]+\s*="),
        (AttackKind::JavaScriptUrl, r"(?i)javascript\s*:"),
        (AttackKind::VbScriptUrl, r"(?i)vbscript\s*:"),
        (AttackKind::DataUrl, r"(?i)data\s*:\s*text/html"),
        (AttackKind::EmbeddedFrame, r"(?i)<\s*(iframe|frame|object|embed)\b"),
    ]
    .into_iter()
    .map(|(kind, pattern)| (kind, Regex::new(pattern).expect("static XSS pattern")))
    .collect()
});

/// Input validation against the basic allow-list
pub struct XssValidator;

impl XssValidator {
    /// True iff cleaning `text` would not change it.
    pub fn is_clean(text: &str) -> bool {
        sanitizer::is_clean(text)
    }

    /// Classify the most likely payload in `text`, if any.
    ///
    /// Diagnostic only. Acceptance is decided by [`XssValidator::is_clean`].
    pub fn detect_attack_type(text: &str) -> Option<AttackKind> {
        PATTERNS
            .iter()
            .find(|(_, pattern)| pattern.is_match(text))
            .map(|(kind, _)| *kind)
    }
}
