//! # XSS Defender Core
//!
//! Neutralizes cross-site scripting payloads in untrusted text fields
//! (form parameters, JSON string values) before they reach application logic.
//!
//! ## Features
//!
//! - ✅ **Allow-list Sanitization** - Keep a small basic subset of HTML, drop the rest
//! - ✅ **Entity Escaping** - Encode `& < > " '` as character references
//! - ✅ **Validation** - Reject input that does not already satisfy the allow-list
//! - ✅ **Request Scopes** - Per-route enablement without shared mutable state
//! - ✅ **Body Adapters** - Defend every string of a JSON or form body
//!
//! ## Quick Start
//!
//! ```rust
//! use xss_defender_core::{DefenseConfig, DefenseStrategy, XssDefender};
//!
//! let defender = XssDefender::new(DefenseConfig::new(DefenseStrategy::Trim));
//!
//! let safe = defender.defend(Some("hello<script>alert(1)</script>")).unwrap();
//! assert_eq!(safe, "hello");
//!
//! // Absent and blank input always becomes an empty string
//! assert_eq!(defender.defend(None).unwrap(), "");
//! assert_eq!(defender.defend(Some("   ")).unwrap(), "");
//! ```
//!
//! ## Strategies
//!
//! ```rust
//! use xss_defender_core::{defend, DefenseConfig, DefenseError, DefenseStrategy};
//!
//! let input = Some("<code>A</code><script>x</script>");
//!
//! // Trim: strip everything outside the allow-list
//! let trim = DefenseConfig::new(DefenseStrategy::Trim);
//! assert_eq!(defend(input, &trim).unwrap(), "<code>A</code>");
//!
//! // Trim, then escape what is left
//! let trim_escape = trim.with_escape_after_trim(true);
//! assert_eq!(defend(input, &trim_escape).unwrap(), "&lt;code&gt;A&lt;/code&gt;");
//!
//! // Escape: never fails
//! let escape = DefenseConfig::new(DefenseStrategy::Escape);
//! assert!(!defend(input, &escape).unwrap().contains('<'));
//!
//! // Throw: reject anything the allow-list would change
//! let throw = DefenseConfig::new(DefenseStrategy::Throw);
//! assert!(matches!(defend(input, &throw), Err(DefenseError::Detected { .. })));
//! ```
//!
//! ## Configuration From Raw Values
//!
//! ```rust
//! use xss_defender_core::{DefenseError, XssDefender};
//!
//! let defender = XssDefender::from_raw("escape", false).unwrap();
//! assert_eq!(defender.defend(Some("a & b")).unwrap(), "a &amp; b");
//!
//! let err = XssDefender::from_raw("ignore", false).unwrap_err();
//! assert!(matches!(err, DefenseError::UnsupportedStrategy { .. }));
//! ```
//!
//! ## Request Scopes
//!
//! ```rust
//! use xss_defender_core::{
//!     DefenseConfig, DefenseStrategy, RouteInfo, XssConfig, XssDefender, XssMiddleware,
//! };
//!
//! let defender = XssDefender::new(DefenseConfig::new(DefenseStrategy::Trim));
//! let middleware = XssMiddleware::new(
//!     XssConfig::default().ignore_handler("upload_page"),
//!     defender,
//! );
//!
//! let route = RouteInfo::new("/api/comments")
//!     .with_controller("CommentController")
//!     .with_handler("create");
//! let scope = middleware.scope(&route);
//!
//! let body: serde_json::Value = scope
//!     .parse_json(br#"{"text": "hi<script>x</script>"}"#)
//!     .unwrap();
//! assert_eq!(body["text"], "hi");
//! ```

pub mod defender;
pub mod encoder;
pub mod error;
pub mod form;
pub mod json;
pub mod middleware;
pub mod sanitizer;
pub mod strategy;
pub mod validator;

pub use defender::{XssDefender, defend};
pub use encoder::{XssEncoder, escape};
pub use error::{DefenseError, DefenseResult, GuardError, GuardResult};
pub use middleware::{DefenseScope, RouteInfo, XssConfig, XssMiddleware};
pub use sanitizer::{XssSanitizer, clean, is_clean};
pub use strategy::{DefenseConfig, DefenseStrategy};
pub use validator::{AttackKind, XssValidator};
