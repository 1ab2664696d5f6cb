//! Session state
//!
//! A [`Session`] is the plain-data half of a client: where the server is,
//! which credentials are configured, the header set every request carries,
//! and who we are authenticated as. It holds no connection handles, so it
//! can be serialized, handed to another process and turned back into a
//! working client with [`Gitlab::from_session`](crate::Gitlab::from_session).

use crate::resource::Resource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Header carrying the private token on authenticated requests
pub const PRIVATE_TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// Default API version
pub const DEFAULT_API_VERSION: &str = "4";

/// Connection settings and authentication state for one server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Base URL of the server, e.g. `https://gitlab.example.com`
    pub url: String,
    /// API version path segment (`4` → `/api/v4`)
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default)]
    pub private_token: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Verify TLS certificates
    #[serde(default = "default_ssl_verify")]
    pub ssl_verify: bool,
    /// Per-request timeout
    #[serde(default)]
    pub timeout: Option<Duration>,
    /// Headers sent with every request
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Identity populated by authentication
    #[serde(default)]
    pub user: Option<Resource>,
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_ssl_verify() -> bool {
    true
}

impl Session {
    /// Create a session for `url` with no credentials
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_version: default_api_version(),
            private_token: None,
            email: None,
            password: None,
            ssl_verify: true,
            timeout: None,
            headers: BTreeMap::new(),
            user: None,
        }
    }

    /// Use a private token; it is attached to every request
    #[must_use]
    pub fn with_private_token(mut self, token: impl Into<String>) -> Self {
        self.set_token(Some(token.into()));
        self
    }

    /// Use email/password credentials
    #[must_use]
    pub fn with_credentials(mut self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self.password = Some(password.into());
        self
    }

    /// Set the API version
    #[must_use]
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Enable or disable TLS certificate verification
    #[must_use]
    pub fn with_ssl_verify(mut self, verify: bool) -> Self {
        self.ssl_verify = verify;
        self
    }

    /// Set the per-request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Add a header sent with every request
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Install or clear the private token and its header
    pub fn set_token(&mut self, token: Option<String>) {
        match &token {
            Some(t) => {
                self.headers
                    .insert(PRIVATE_TOKEN_HEADER.to_string(), t.clone());
            }
            None => {
                self.headers.remove(PRIVATE_TOKEN_HEADER);
            }
        }
        self.private_token = token;
    }

    /// Set email/password credentials
    pub fn set_credentials(&mut self, email: Option<String>, password: Option<String>) {
        self.email = email;
        self.password = password;
    }

    /// Both email and password are configured
    pub fn has_credentials(&self) -> bool {
        self.email.is_some() && self.password.is_some()
    }

    /// Root of the versioned API, e.g. `http://localhost/api/v4`
    pub fn api_url(&self) -> String {
        format!(
            "{}/api/v{}",
            self.url.trim_end_matches('/'),
            self.api_version
        )
    }

    /// Per-request timeout, if any
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}
