//! Error types for the defense engine

use thiserror::Error;

/// Result type for defense operations
pub type DefenseResult<T> = Result<T, DefenseError>;

/// Errors raised by the defense engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DefenseError {
    /// The input does not satisfy the allow-list and the strategy is `throw`.
    #[error("XSS risk detected in input: {offending_text}")]
    Detected {
        /// The text that was inspected and rejected
        offending_text: String,
    },

    /// The configured strategy is not one of `trim`, `escape` or `throw`.
    #[error("Unsupported XSS defense strategy: {value}")]
    UnsupportedStrategy {
        /// The raw strategy value as configured
        value: String,
    },
}

impl DefenseError {
    /// Create a detection error for the given text
    pub fn detected<S: Into<String>>(text: S) -> Self {
        Self::Detected {
            offending_text: text.into(),
        }
    }

    /// Create an unsupported strategy error for the given raw value
    pub fn unsupported_strategy<S: Into<String>>(value: S) -> Self {
        Self::UnsupportedStrategy {
            value: value.into(),
        }
    }

    /// Check if this error rejects client input
    pub fn is_detection(&self) -> bool {
        matches!(self, Self::Detected { .. })
    }

    /// Check if this error is a configuration defect
    pub fn is_unsupported_strategy(&self) -> bool {
        matches!(self, Self::UnsupportedStrategy { .. })
    }

    /// Get the rejected text if this is a detection error
    pub fn offending_text(&self) -> Option<&str> {
        match self {
            Self::Detected { offending_text } => Some(offending_text),
            _ => None,
        }
    }

    /// HTTP status code a web layer should answer with.
    ///
    /// Detection is the client's fault (400); an unsupported strategy is a
    /// server misconfiguration (500).
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Detected { .. } => 400,
            Self::UnsupportedStrategy { .. } => 500,
        }
    }
}

/// Result type for request-level operations
pub type GuardResult<T> = Result<T, GuardError>;

/// Errors raised while defending a whole request body
#[derive(Error, Debug)]
pub enum GuardError {
    #[error(transparent)]
    Rejected(#[from] DefenseError),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),
}

impl GuardError {
    /// Create a malformed body error
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        Self::MalformedBody(msg.into())
    }

    /// HTTP status code a web layer should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Rejected(err) => err.status_code(),
            Self::MalformedBody(_) => 400,
        }
    }

    /// Get the underlying defense error, if any
    pub fn defense_error(&self) -> Option<&DefenseError> {
        match self {
            Self::Rejected(err) => Some(err),
            Self::MalformedBody(_) => None,
        }
    }
}
