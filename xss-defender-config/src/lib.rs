// Configuration loading for the XSS defender
//
// Properties mirror `xss-defender.enabled`, `xss-defender.strategy` and
// `xss-defender.escape-after-trim`, read from JSON, TOML or .env files and
// `XSS_DEFENDER_*` environment variables.

pub mod env;
pub mod error;
pub mod loader;
pub mod properties;
pub mod validation;

pub use env::EnvLoader;
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};
pub use properties::{DefenderProperties, PropertiesBuilder};
pub use validation::{ConfigValidator, Validate};
