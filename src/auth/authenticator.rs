//! Authenticator implementation

use super::types::AuthStrategy;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::resource::{Resource, ResourceKind};
use crate::types::JsonValue;
use serde_json::json;
use tracing::{debug, info};

/// Endpoint returning the identity behind a token
const CURRENT_USER_PATH: &str = "/user";

/// Endpoint exchanging credentials for a private token
const SESSION_PATH: &str = "/session";

/// Establishes the identity of a client's session
#[derive(Debug, Clone)]
pub struct Authenticator {
    strategy: AuthStrategy,
}

impl Authenticator {
    /// Create an authenticator with the given strategy
    pub fn new(strategy: AuthStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> &AuthStrategy {
        &self.strategy
    }

    /// Authenticate and record the identity on the client's session
    ///
    /// The credentials strategy also installs the returned private token, so
    /// every later request is authenticated with it.
    pub async fn authenticate(&self, client: &mut HttpClient) -> Result<Resource> {
        debug!("Authenticating with {} strategy", self.strategy.name());

        let body = match &self.strategy {
            AuthStrategy::Token { private_token } => {
                if let Some(token) = private_token {
                    client.session_mut().set_token(Some(token.clone()));
                }
                client
                    .get(CURRENT_USER_PATH, RequestConfig::new())
                    .await
                    .and_then(|p| p.into_json())
                    .map_err(as_auth_error)?
            }

            AuthStrategy::Credentials { email, password } => {
                let body = client
                    .post(SESSION_PATH, json!({"email": email, "password": password}))
                    .await
                    .and_then(|p| p.into_json())
                    .map_err(as_auth_error)?;

                let token = body
                    .get("private_token")
                    .and_then(JsonValue::as_str)
                    .ok_or_else(|| Error::auth("session response did not include a private_token"))?;
                client.session_mut().set_token(Some(token.to_string()));
                body
            }
        };

        let user = Resource::from_api(ResourceKind::CurrentUser, body)?;
        info!(
            "Authenticated as {}",
            user.get_str("username")
                .or_else(|| user.get_str("email"))
                .unwrap_or("<unknown>")
        );

        client.session_mut().user = Some(user.clone());
        Ok(user)
    }
}

/// Any rejected authentication request is an authentication failure
fn as_auth_error(err: Error) -> Error {
    match err {
        Error::HttpStatus { status, message } => Error::Authentication {
            status: Some(status),
            message,
        },
        other => other,
    }
}
