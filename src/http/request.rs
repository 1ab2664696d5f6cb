//! Per-request options

use crate::types::{value_to_string, JsonObject, JsonValue};
use std::collections::BTreeMap;

/// Configuration for a single request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestConfig {
    /// Query parameters
    pub query: BTreeMap<String, String>,
    /// Request headers, sent in addition to the session headers
    pub headers: BTreeMap<String, String>,
    /// Request body (JSON)
    pub body: Option<JsonValue>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add every entry of `params` as a query parameter
    ///
    /// Nulls are skipped; other values use their URL string form.
    #[must_use]
    pub fn query_params(mut self, params: &JsonObject) -> Self {
        for (key, value) in params {
            if !value.is_null() {
                self.query.insert(key.clone(), value_to_string(value));
            }
        }
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }
}
