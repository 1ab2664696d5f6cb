//! The client
//!
//! [`Gitlab`] owns the transport and session, runs authentication, and
//! dispatches CRUD operations for every registered resource kind.
//!
//! # Example
//!
//! ```rust,ignore
//! use gitlab_rest::{Gitlab, ListMode, ResourceKind, Session};
//!
//! # async fn run() -> gitlab_rest::Result<()> {
//! let mut gl = Gitlab::new(Session::new("https://gitlab.example.com").with_private_token("glpat-x"))?;
//! gl.auth().await?;
//!
//! let projects = gl
//!     .list(ResourceKind::Project, &Default::default(), ListMode::All)
//!     .await?;
//! println!("{} projects", projects.len());
//! # Ok(())
//! # }
//! ```

mod dispatch;
mod paged;

pub use dispatch::ListMode;
pub use paged::PagedResources;

use crate::auth::{AuthStrategy, Authenticator};
use crate::error::Result;
use crate::http::{HttpClient, RawResponse, RequestConfig};
use crate::resource::Resource;
use crate::session::Session;
use crate::types::Method;

/// Client for one server
#[derive(Debug)]
pub struct Gitlab {
    http: HttpClient,
}

impl Gitlab {
    /// Create a client for `session`
    pub fn new(session: Session) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(session)?,
        })
    }

    /// Restore a client from a session snapshot
    ///
    /// Headers, credentials and identity carry over; the connection pool is
    /// rebuilt.
    pub fn from_session(session: Session) -> Result<Self> {
        Self::new(session)
    }

    /// The session state
    pub fn session(&self) -> &Session {
        self.http.session()
    }

    /// Take the session state out of the client
    pub fn into_session(self) -> Session {
        self.http.into_session()
    }

    /// The underlying transport
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Identity established by the last successful authentication
    pub fn user(&self) -> Option<&Resource> {
        self.session().user.as_ref()
    }

    /// Install or clear the private token
    pub fn set_token(&mut self, token: Option<String>) {
        self.http.session_mut().set_token(token);
    }

    /// Set the email/password used by credentials authentication
    pub fn set_credentials(&mut self, email: Option<String>, password: Option<String>) {
        self.http.session_mut().set_credentials(email, password);
    }

    /// Point the client at another server
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.http.session_mut().url = url.into();
    }

    // ========================================================================
    // Authentication
    // ========================================================================

    /// Authenticate with credentials when configured, else with the token
    pub async fn auth(&mut self) -> Result<Resource> {
        let strategy = AuthStrategy::for_session(self.session());
        Authenticator::new(strategy).authenticate(&mut self.http).await
    }

    /// Authenticate with the private token
    pub async fn token_auth(&mut self) -> Result<Resource> {
        let strategy = AuthStrategy::token(self.session());
        Authenticator::new(strategy).authenticate(&mut self.http).await
    }

    /// Authenticate with email and password
    pub async fn credentials_auth(&mut self) -> Result<Resource> {
        let strategy = AuthStrategy::credentials(self.session())?;
        Authenticator::new(strategy).authenticate(&mut self.http).await
    }

    // ========================================================================
    // Raw requests
    // ========================================================================
    // Only transport failures are errors; the status is left to the caller.

    pub async fn raw_get(&self, path: &str, config: RequestConfig) -> Result<RawResponse> {
        self.http.send(Method::GET, path, config).await
    }

    pub async fn raw_post(&self, path: &str, config: RequestConfig) -> Result<RawResponse> {
        self.http.send(Method::POST, path, config).await
    }

    pub async fn raw_put(&self, path: &str, config: RequestConfig) -> Result<RawResponse> {
        self.http.send(Method::PUT, path, config).await
    }

    pub async fn raw_delete(&self, path: &str, config: RequestConfig) -> Result<RawResponse> {
        self.http.send(Method::DELETE, path, config).await
    }
}

#[cfg(test)]
mod tests;
