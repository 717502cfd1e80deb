// XSS Defender - Cross-site scripting defense for untrusted request fields
//
// This library trims, escapes or rejects user supplied text against a small
// allow-list of basic HTML, and applies that policy to whole JSON and form bodies.

// Re-export core functionality
pub use xss_defender_core::*;

// Re-export optional crates
#[cfg(feature = "config")]
pub use xss_defender_config;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        DefenseConfig,
        DefenseError,
        DefenseResult,
        DefenseScope,
        DefenseStrategy,
        GuardError,
        GuardResult,
        RouteInfo,
        XssConfig,
        XssDefender,
        XssMiddleware,
        clean,
        defend,
        escape,
        is_clean,
    };

    #[cfg(feature = "config")]
    pub use xss_defender_config::{DefenderProperties, PropertiesBuilder};
}
