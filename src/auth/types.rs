//! Authentication strategies

use crate::error::{Error, Result};
use crate::session::Session;

/// How to establish the session identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStrategy {
    /// Send `PRIVATE-TOKEN` and read the identity from `/user`
    Token {
        /// Token to install first; `None` uses whatever the session carries
        private_token: Option<String>,
    },

    /// Exchange email and password at `/session` for a private token
    Credentials { email: String, password: String },
}

impl AuthStrategy {
    /// Credentials when both email and password are configured, else token
    pub fn for_session(session: &Session) -> Self {
        Self::credentials(session).unwrap_or_else(|_| Self::token(session))
    }

    /// Token strategy with the session's token
    pub fn token(session: &Session) -> Self {
        Self::Token {
            private_token: session.private_token.clone(),
        }
    }

    /// Credentials strategy; both email and password must be configured
    pub fn credentials(session: &Session) -> Result<Self> {
        match (&session.email, &session.password) {
            (Some(email), Some(password)) => Ok(Self::Credentials {
                email: email.clone(),
                password: password.clone(),
            }),
            (None, None) => Err(Error::auth("email and password are required")),
            (None, _) => Err(Error::auth("email is required")),
            (_, None) => Err(Error::auth("password is required")),
        }
    }

    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            AuthStrategy::Token { .. } => "token",
            AuthStrategy::Credentials { .. } => "credentials",
        }
    }
}
