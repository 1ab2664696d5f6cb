//! HTTP client bound to a session
//!
//! Every request carries the session's header set, honours its TLS and
//! timeout settings, and goes through the same status mapping:
//! - transport failures become `Error::Connection`
//! - 401 becomes `Error::Authentication`
//! - any other non-2xx becomes `Error::HttpStatus`, for the caller to attribute
//! - 2xx JSON is parsed, everything else is handed back raw
//!
//! Requests are never retried.

use super::request::RequestConfig;
use super::response::{Payload, RawResponse};
use crate::error::{Error, Result};
use crate::pagination::PagedList;
use crate::session::Session;
use crate::types::{JsonValue, Method};
use reqwest::{Client, StatusCode};
use tracing::debug;

/// HTTP client for one server
pub struct HttpClient {
    client: Client,
    session: Session,
}

impl HttpClient {
    /// Create a client for `session`
    pub fn new(session: Session) -> Result<Self> {
        let client = build_client(&session)?;
        Ok(Self { client, session })
    }

    /// The session this client sends with
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Mutable access to headers, credentials and identity
    ///
    /// Changes to `ssl_verify` or `timeout` only take effect through
    /// [`HttpClient::set_session`].
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Replace the session and rebuild the underlying connection pool
    pub fn set_session(&mut self, session: Session) -> Result<()> {
        self.client = build_client(&session)?;
        self.session = session;
        Ok(())
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    /// Build the full URL for an API path
    ///
    /// Absolute `http://` and `https://` URLs pass through unchanged, which
    /// is how pagination follows `Link` headers.
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}{}", self.session.api_url(), path)
    }

    /// Send a request and return the response whatever its status
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        config: RequestConfig,
    ) -> Result<RawResponse> {
        let full_url = self.build_url(path);
        debug!("{} {}", method, full_url);

        let mut req = self.client.request(method.into(), &full_url);

        for (key, value) in &self.session.headers {
            req = req.header(key.as_str(), value.as_str());
        }
        for (key, value) in &config.headers {
            req = req.header(key.as_str(), value.as_str());
        }
        if !config.query.is_empty() {
            req = req.query(&config.query);
        }
        if let Some(ref body) = config.body {
            req = req.json(body);
        }

        let response = req.send().await.map_err(Error::Connection)?;
        let status = response.status();
        let url = response.url().clone();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(Error::Connection)?;

        debug!("{} {} -> {}", method, full_url, status.as_u16());

        Ok(RawResponse {
            status,
            url,
            headers,
            body,
        })
    }

    /// Send a request and map its status
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        config: RequestConfig,
    ) -> Result<Payload> {
        let raw = self.send(method, path, config).await?;
        check_status(&raw)?;

        if raw.is_json() && !raw.is_empty() {
            raw.json().map(Payload::Json)
        } else {
            Ok(Payload::Raw(raw))
        }
    }

    /// GET a JSON document
    pub async fn get(&self, path: &str, config: RequestConfig) -> Result<Payload> {
        self.request(Method::GET, path, config).await
    }

    /// POST a JSON body
    pub async fn post(&self, path: &str, body: JsonValue) -> Result<Payload> {
        self.request(Method::POST, path, RequestConfig::new().json(body))
            .await
    }

    /// PUT a JSON body
    pub async fn put(&self, path: &str, body: JsonValue) -> Result<Payload> {
        self.request(Method::PUT, path, RequestConfig::new().json(body))
            .await
    }

    /// DELETE; an empty 2xx body is a success
    pub async fn delete(&self, path: &str, config: RequestConfig) -> Result<Payload> {
        self.request(Method::DELETE, path, config).await
    }

    /// GET the first page of a collection
    pub async fn list(&self, path: &str, config: RequestConfig) -> Result<PagedList<'_>> {
        PagedList::first(self, path, config).await
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("api_url", &self.session.api_url())
            .field("ssl_verify", &self.session.ssl_verify)
            .field("authenticated", &self.session.user.is_some())
            .finish_non_exhaustive()
    }
}

/// Map a response status onto the error taxonomy
pub(crate) fn check_status(raw: &RawResponse) -> Result<()> {
    if raw.status == StatusCode::UNAUTHORIZED {
        return Err(Error::Authentication {
            status: Some(raw.status.as_u16()),
            message: raw.message(),
        });
    }
    if !raw.is_success() {
        return Err(Error::HttpStatus {
            status: raw.status.as_u16(),
            message: raw.message(),
        });
    }
    Ok(())
}

fn build_client(session: &Session) -> Result<Client> {
    let mut builder = Client::builder()
        .user_agent(format!("gitlab-rest/{}", env!("CARGO_PKG_VERSION")))
        .danger_accept_invalid_certs(!session.ssl_verify);

    if let Some(timeout) = session.timeout() {
        builder = builder.timeout(timeout);
    }

    builder.build().map_err(Error::Connection)
}
