//! Path-segment sanitizing
//!
//! Identifiers such as `group/project` are valid single path segments once
//! their slashes are percent-encoded. Only `/` is touched.

use crate::types::JsonValue;

/// Percent-encode every `/` in `s`
pub fn sanitize_str(s: &str) -> String {
    s.replace('/', "%2F")
}

/// Sanitize a JSON value for use in a URL path.
///
/// Strings are escaped, objects are sanitized value by value, everything
/// else passes through unchanged.
pub fn sanitize(value: &JsonValue) -> JsonValue {
    match value {
        JsonValue::String(s) => JsonValue::String(sanitize_str(s)),
        JsonValue::Object(map) => JsonValue::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), sanitize(v)))
                .collect(),
        ),
        _ => value.clone(),
    }
}
