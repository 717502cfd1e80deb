//! Form body adapter
//!
//! Binds `application/x-www-form-urlencoded` values through the scope's
//! defender. Field names are never rewritten.

use crate::error::{DefenseResult, GuardError, GuardResult};
use crate::middleware::DefenseScope;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// Defend a single bound form value. An absent value binds to `""`.
pub fn defend_form_value(value: Option<&str>, scope: &DefenseScope) -> DefenseResult<String> {
    scope.defend(value)
}

fn defended_pairs(body: &[u8], scope: &DefenseScope) -> GuardResult<Vec<(String, String)>> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)
        .map_err(|e| GuardError::malformed(format!("Failed to parse form data: {}", e)))?;

    pairs
        .into_iter()
        .map(|(name, value)| -> GuardResult<(String, String)> {
            let value = defend_form_value(Some(&value), scope)?;
            Ok((name, value))
        })
        .collect()
}

/// Parse a form body, defend every value, then deserialize into `T`.
pub fn parse_form<T: DeserializeOwned>(body: &[u8], scope: &DefenseScope) -> GuardResult<T> {
    let pairs = defended_pairs(body, scope)?;

    let encoded = serde_urlencoded::to_string(&pairs)
        .map_err(|e| GuardError::malformed(format!("Failed to encode form data: {}", e)))?;

    serde_urlencoded::from_str(&encoded)
        .map_err(|e| GuardError::malformed(format!("Failed to deserialize form data: {}", e)))
}

/// Parse a form body into a map of defended values. Later duplicates win.
pub fn parse_form_map(body: &[u8], scope: &DefenseScope) -> GuardResult<HashMap<String, String>> {
    Ok(defended_pairs(body, scope)?.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defender::XssDefender;
    use crate::strategy::{DefenseConfig, DefenseStrategy};
    use serde::Deserialize;

    fn scope(strategy: DefenseStrategy) -> DefenseScope {
        DefenseScope::enabled(XssDefender::new(DefenseConfig::new(strategy)))
    }

    #[derive(Debug, Deserialize)]
    struct Signup {
        name: String,
        bio: String,
        age: u8,
    }

    #[test]
    fn test_absent_value_binds_empty() {
        assert_eq!(defend_form_value(None, &scope(DefenseStrategy::Throw)).unwrap(), "");
    }

    #[test]
    fn test_parse_form_into_struct() {
        let body = b"name=+bob+&bio=%3Cb%3Ehi%3C%2Fb%3E%3Cscript%3Ex%3C%2Fscript%3E&age=30";
        let signup: Signup = parse_form(body, &scope(DefenseStrategy::Trim)).unwrap();

        assert_eq!(signup.name, "bob");
        assert_eq!(signup.bio, "<b>hi</b>");
        assert_eq!(signup.age, 30);
    }

    #[test]
    fn test_parse_form_map_escape() {
        let body = b"q=%3Cscript%3E&page=1";
        let map = parse_form_map(body, &scope(DefenseStrategy::Escape)).unwrap();

        assert_eq!(map.get("q").map(String::as_str), Some("&lt;script&gt;"));
        assert_eq!(map.get("page").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_parse_form_rejects_under_throw() {
        let body = b"comment=%3Cimg+src%3Dx+onerror%3Dalert(1)%3E";
        let err = parse_form_map(body, &scope(DefenseStrategy::Throw)).unwrap_err();

        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_disabled_scope_only_trims() {
        let disabled = DefenseScope::disabled(XssDefender::default());
        let map = parse_form_map(b"raw=+%3Cscript%3Ex%3C%2Fscript%3E+", &disabled).unwrap();

        assert_eq!(map.get("raw").map(String::as_str), Some("<script>x</script>"));
    }
}
