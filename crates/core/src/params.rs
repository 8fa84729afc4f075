//! Pure helper functions for extracting typed parameters from a `serde_json::Value` object.
//!
//! Each helper takes a JSON value, a key name, and a default. If the key is
//! missing or the value is not the expected type, the default is returned.
//! These never fail; a missing or mistyped key yields the default.

use serde_json::Value;

static NULL: Value = Value::Null;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
///
/// Accepts both JSON numbers (including integers) and converts them to f64.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts an optional `u64` from `params[name]`.
///
/// A non-negative integer yields `Some`, an explicit `null` yields `None`,
/// and a missing or wrong-typed value yields `default`.
pub fn param_opt_u64(params: &Value, name: &str, default: Option<u64>) -> Option<u64> {
    match params.get(name) {
        Some(Value::Null) => None,
        Some(v) => v.as_u64().or(default),
        None => default,
    }
}

/// Extracts a `String` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

/// Returns `params[name]` when it is a JSON object, otherwise `Value::Null`.
///
/// Lets nested sections fall back to their defaults through the other helpers.
pub fn param_section<'a>(params: &'a Value, name: &str) -> &'a Value {
    match params.get(name) {
        Some(section @ Value::Object(_)) => section,
        _ => &NULL,
    }
}
