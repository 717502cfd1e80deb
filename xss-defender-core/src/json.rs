//! JSON body adapter
//!
//! Runs every scalar string of a JSON document through the scope's defender
//! before the document is deserialized into application types.

use crate::error::{DefenseResult, GuardError, GuardResult};
use crate::middleware::DefenseScope;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Defend every string in `value`, recursing into arrays and objects.
///
/// Object keys are left alone. The first rejected string aborts the walk and
/// the partially defended value is dropped.
pub fn defend_json_value(mut value: Value, scope: &DefenseScope) -> DefenseResult<Value> {
    defend_in_place(&mut value, scope)?;
    Ok(value)
}

fn defend_in_place(value: &mut Value, scope: &DefenseScope) -> DefenseResult<()> {
    match value {
        Value::String(s) => {
            let defended = scope.defend(Some(s.as_str()))?;
            *s = defended;
        }
        Value::Array(arr) => {
            for item in arr.iter_mut() {
                defend_in_place(item, scope)?;
            }
        }
        Value::Object(obj) => {
            for (_key, val) in obj.iter_mut() {
                defend_in_place(val, scope)?;
            }
        }
        _ => {}
    }
    Ok(())
}

/// Parse a JSON body, defend its strings, then deserialize into `T`.
pub fn parse_json<T: DeserializeOwned>(body: &[u8], scope: &DefenseScope) -> GuardResult<T> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| GuardError::malformed(format!("Failed to parse JSON: {}", e)))?;

    let value = defend_json_value(value, scope)?;

    serde_json::from_value(value)
        .map_err(|e| GuardError::malformed(format!("Failed to deserialize JSON: {}", e)))
}
