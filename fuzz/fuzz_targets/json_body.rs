//! Fuzz target for JSON body defense.
//!
//! Feeds raw bytes to the JSON adapter. Malformed bodies must surface as
//! errors, never panics, and every defended string must already be clean.

#![no_main]

use libfuzzer_sys::fuzz_target;
use serde_json::Value;

use xss_defender_core::{
    DefenseConfig, DefenseScope, DefenseStrategy, GuardError, XssDefender, is_clean,
};

// Object keys are never defended, only values.
fn assert_values_clean(value: &Value) {
    match value {
        Value::String(s) => assert!(is_clean(s), "unclean value: {s:?}"),
        Value::Array(items) => items.iter().for_each(assert_values_clean),
        Value::Object(fields) => fields.values().for_each(assert_values_clean),
        _ => {}
    }
}

fuzz_target!(|data: &[u8]| {
    let trim = DefenseScope::enabled(XssDefender::new(DefenseConfig::new(DefenseStrategy::Trim)));
    let throw = DefenseScope::enabled(XssDefender::new(DefenseConfig::new(DefenseStrategy::Throw)));

    match trim.parse_json::<Value>(data) {
        Ok(value) => assert_values_clean(&value),
        Err(GuardError::MalformedBody(_)) => {}
        Err(err) => panic!("trim rejected input: {err}"),
    }

    if let Ok(value) = throw.parse_json::<Value>(data) {
        assert_values_clean(&value);
    }
});
