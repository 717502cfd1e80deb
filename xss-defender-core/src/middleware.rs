use crate::defender::XssDefender;
use crate::error::{DefenseResult, GuardResult};
use crate::{form, json};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

const IGNORE_WARNING: &str =
    "input may carry XSS payloads, make sure this route really needs raw input";

/// Route metadata for a single request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteInfo {
    /// Request path
    pub path: String,
    /// Controller owning the handler
    pub controller: Option<String>,
    /// Handler name. `None` for requests not served by a controller.
    pub handler: Option<String>,
}

impl RouteInfo {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_controller(mut self, controller: impl Into<String>) -> Self {
        self.controller = Some(controller.into());
        self
    }

    pub fn with_handler(mut self, handler: impl Into<String>) -> Self {
        self.handler = Some(handler.into());
        self
    }
}

/// XSS defense middleware configuration
#[derive(Debug, Clone)]
pub struct XssConfig {
    /// Master switch
    pub enabled: bool,

    /// Path prefixes that skip defense
    pub exclude_paths: Vec<String>,

    /// Controllers whose every handler skips defense
    pub ignored_controllers: HashSet<String>,

    /// Handlers that skip defense
    pub ignored_handlers: HashSet<String>,
}

impl XssConfig {
    pub fn new() -> Self {
        Self {
            enabled: true,
            exclude_paths: Vec::new(),
            ignored_controllers: HashSet::new(),
            ignored_handlers: HashSet::new(),
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_exclude_paths(mut self, paths: Vec<String>) -> Self {
        self.exclude_paths = paths;
        self
    }

    pub fn ignore_controller(mut self, controller: impl Into<String>) -> Self {
        self.ignored_controllers.insert(controller.into());
        self
    }

    pub fn ignore_handler(mut self, handler: impl Into<String>) -> Self {
        self.ignored_handlers.insert(handler.into());
        self
    }
}

impl Default for XssConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// XSS defense middleware.
///
/// Resolves a [`DefenseScope`] per request. Shared state is never mutated,
/// so ignoring one route cannot switch defense off for another.
#[derive(Debug, Clone)]
pub struct XssMiddleware {
    config: Arc<XssConfig>,
    defender: Arc<XssDefender>,
}

impl XssMiddleware {
    /// Create new XSS middleware
    pub fn new(config: XssConfig, defender: XssDefender) -> Self {
        info!(
            enabled = config.enabled,
            strategy = %defender.strategy(),
            "Registered XSS defense middleware"
        );
        if !config.enabled {
            warn!("XSS defense is disabled, {}", IGNORE_WARNING);
        }

        Self {
            config: Arc::new(config),
            defender: Arc::new(defender),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &XssConfig {
        &self.config
    }

    /// Get the shared defender
    pub fn defender(&self) -> &XssDefender {
        &self.defender
    }

    /// Check if a request needs XSS defense
    pub fn needs_protection(&self, route: &RouteInfo) -> bool {
        if !self.config.enabled {
            return false;
        }

        // Not served by a controller, nothing can be ignored
        let Some(handler) = route.handler.as_deref() else {
            return true;
        };

        if let Some(controller) = route.controller.as_deref() {
            if self.config.ignored_controllers.contains(controller) {
                warn!(
                    controller = %controller,
                    "XSS defense ignored for the whole controller, {}",
                    IGNORE_WARNING
                );
                return false;
            }
        }

        if self.config.ignored_handlers.contains(handler) {
            warn!(
                path = %route.path,
                handler = %handler,
                "XSS defense ignored for route, {}",
                IGNORE_WARNING
            );
            return false;
        }

        if let Some(prefix) = self
            .config
            .exclude_paths
            .iter()
            .find(|prefix| route.path.starts_with(prefix.as_str()))
        {
            debug!(path = %route.path, prefix = %prefix, "Path excluded from XSS defense");
            return false;
        }

        true
    }

    /// Resolve the defense scope for one request
    pub fn scope(&self, route: &RouteInfo) -> DefenseScope {
        DefenseScope {
            defender: Arc::clone(&self.defender),
            enabled: self.needs_protection(route),
        }
    }
}

/// Effective defense for a single request
#[derive(Debug, Clone)]
pub struct DefenseScope {
    defender: Arc<XssDefender>,
    enabled: bool,
}

impl DefenseScope {
    /// A scope that always defends
    pub fn enabled(defender: XssDefender) -> Self {
        Self {
            defender: Arc::new(defender),
            enabled: true,
        }
    }

    /// A scope that only trims whitespace
    pub fn disabled(defender: XssDefender) -> Self {
        Self {
            defender: Arc::new(defender),
            enabled: false,
        }
    }

    /// Whether input is defended in this scope
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Defend a single field. A disabled scope only trims whitespace.
    pub fn defend(&self, text: Option<&str>) -> DefenseResult<String> {
        if self.enabled {
            self.defender.defend(text)
        } else {
            Ok(text.map(str::trim).unwrap_or_default().to_string())
        }
    }

    /// Defend every string inside a JSON value
    pub fn defend_json(&self, value: Value) -> DefenseResult<Value> {
        json::defend_json_value(value, self)
    }

    /// Parse a JSON body, defending every string before deserializing
    pub fn parse_json<T: DeserializeOwned>(&self, body: &[u8]) -> GuardResult<T> {
        json::parse_json(body, self)
    }

    /// Parse a url-encoded form body, defending every value before deserializing
    pub fn parse_form<T: DeserializeOwned>(&self, body: &[u8]) -> GuardResult<T> {
        form::parse_form(body, self)
    }

    /// Parse a url-encoded form body into a map of defended values
    pub fn parse_form_map(&self, body: &[u8]) -> GuardResult<HashMap<String, String>> {
        form::parse_form_map(body, self)
    }
}
