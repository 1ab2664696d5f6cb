//! Configuration file support
//!
//! Server definitions are read from YAML:
//!
//! ```yaml
//! default: work
//! servers:
//!   work:
//!     url: https://gitlab.example.com
//!     private_token: glpat-xxxx
//!     ssl_verify: true
//!     timeout: 10
//!   local:
//!     url: http://localhost:8080
//!     email: root@example.com
//!     password: secret
//!     api_version: "3"
//! ```

use crate::error::{Error, Result};
use crate::session::{Session, DEFAULT_API_VERSION};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Top-level configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server used when none is named
    #[serde(default)]
    pub default: Option<String>,

    /// Named server definitions
    #[serde(default)]
    pub servers: BTreeMap<String, ServerConfig>,
}

/// One server definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL
    pub url: String,

    #[serde(default)]
    pub private_token: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    #[serde(default = "default_api_version")]
    pub api_version: String,

    #[serde(default = "default_ssl_verify")]
    pub ssl_verify: bool,

    /// Request timeout in seconds
    #[serde(default)]
    pub timeout: Option<u64>,
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_ssl_verify() -> bool {
    true
}

impl ServerConfig {
    /// Build a session from this definition
    pub fn to_session(&self) -> Session {
        let mut session = Session::new(self.url.clone())
            .with_api_version(self.api_version.clone())
            .with_ssl_verify(self.ssl_verify);

        if let Some(token) = &self.private_token {
            session = session.with_private_token(token.clone());
        }
        session.set_credentials(self.email.clone(), self.password.clone());
        if let Some(secs) = self.timeout {
            session = session.with_timeout(Duration::from_secs(secs));
        }
        session
    }
}

impl Config {
    /// Look up a server by name, or the default server when `name` is `None`
    pub fn server(&self, name: Option<&str>) -> Result<&ServerConfig> {
        let name = match name {
            Some(n) => n,
            None => self
                .default
                .as_deref()
                .ok_or_else(|| Error::config("No server named and no default server configured"))?,
        };

        self.servers.get(name).ok_or_else(|| {
            let known: Vec<&str> = self.servers.keys().map(String::as_str).collect();
            Error::config(format!(
                "Server '{}' not found. Configured servers: {}",
                name,
                known.join(", ")
            ))
        })
    }

    /// Build a session for a named (or the default) server
    pub fn session(&self, name: Option<&str>) -> Result<Session> {
        self.server(name).map(ServerConfig::to_session)
    }
}

/// Load configuration from a YAML file
pub fn load_config(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;
    load_config_from_str(&content)
}

/// Load configuration from a YAML string
pub fn load_config_from_str(yaml: &str) -> Result<Config> {
    let config: Config = serde_yaml::from_str(yaml)?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate a configuration
fn validate_config(config: &Config) -> Result<()> {
    for (name, server) in &config.servers {
        if server.url.is_empty() {
            return Err(Error::config(format!("Server '{name}' has an empty url")));
        }
        if !server.url.starts_with("http://") && !server.url.starts_with("https://") {
            return Err(Error::config(format!(
                "Server '{name}' url must start with http:// or https://"
            )));
        }
    }

    if let Some(default) = &config.default {
        if !config.servers.contains_key(default) {
            return Err(Error::config(format!(
                "Default server '{default}' is not defined"
            )));
        }
    }

    Ok(())
}
