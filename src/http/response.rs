//! Response payloads

use crate::error::{Error, Result};
use crate::types::{value_to_string, JsonValue};
use bytes::Bytes;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::StatusCode;
use url::Url;

/// A response exactly as the server sent it
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    /// Final URL of the request, after redirects
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RawResponse {
    /// 2xx status
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Header value as a string, if present and valid UTF-8
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// `Content-Type` is `application/json` (parameters ignored)
    pub fn is_json(&self) -> bool {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
    }

    /// Body contains nothing but whitespace
    pub fn is_empty(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }

    /// Body as (lossy) text
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parse the body as JSON
    pub fn json(&self) -> Result<JsonValue> {
        serde_json::from_slice(&self.body)
            .map_err(|e| Error::parsing(format!("invalid JSON from {}: {e}", self.url)))
    }

    /// Best-effort error message for a failed response
    pub fn message(&self) -> String {
        extract_message(&self.body)
            .or_else(|| self.status.canonical_reason().map(str::to_string))
            .unwrap_or_else(|| self.status.to_string())
    }
}

/// Decoded result of a successful request
#[derive(Debug, Clone)]
pub enum Payload {
    /// JSON body, parsed
    Json(JsonValue),
    /// Non-JSON or empty body, untouched
    Raw(RawResponse),
}

impl Payload {
    /// The JSON value, or a parsing error for raw payloads
    pub fn into_json(self) -> Result<JsonValue> {
        match self {
            Payload::Json(value) => Ok(value),
            Payload::Raw(raw) => Err(Error::parsing(format!(
                "expected a JSON response from {}, got {} bytes of {}",
                raw.url,
                raw.body.len(),
                raw.header(CONTENT_TYPE.as_str()).unwrap_or("unknown content")
            ))),
        }
    }
}

/// Pull a message out of an error body
///
/// The server reports errors as `{"message": ...}` or `{"error": ...}`; any
/// other non-empty body is returned as text.
pub fn extract_message(body: &[u8]) -> Option<String> {
    if let Ok(JsonValue::Object(map)) = serde_json::from_slice::<JsonValue>(body) {
        if let Some(value) = map.get("message").or_else(|| map.get("error")) {
            return Some(value_to_string(value));
        }
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
