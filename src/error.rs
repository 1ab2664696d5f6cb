//! Error types for gitlab-rest
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use std::fmt;
use thiserror::Error;

/// The operation a request was issued for.
///
/// Transport-level status failures are re-labelled with the operation that
/// triggered them, so callers can tell a failed `get` from a failed `delete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Get,
    List,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Get => "get",
            Operation::List => "list",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// The main error type for gitlab-rest
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("Connection failed: {0}")]
    Connection(#[source] reqwest::Error),

    #[error("Authentication failed: {}{message}", status_prefix(.status))]
    Authentication {
        status: Option<u16>,
        message: String,
    },

    #[error("Failed to parse server response: {message}")]
    Parsing { message: String },

    /// Unexpected status before it is attributed to an operation
    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    /// A template variable had no value
    #[error("Missing required parameter(s): {names}")]
    MissingParameter { names: String },

    // ============================================================================
    // Operation Errors
    // ============================================================================
    #[error("Failed to get object: {}{message}", status_prefix(.status))]
    Get {
        status: Option<u16>,
        message: String,
    },

    #[error("Failed to list objects: {}{message}", status_prefix(.status))]
    List {
        status: Option<u16>,
        message: String,
    },

    #[error("Failed to create object: {}{message}", status_prefix(.status))]
    Create {
        status: Option<u16>,
        message: String,
    },

    #[error("Failed to update object: {}{message}", status_prefix(.status))]
    Update {
        status: Option<u16>,
        message: String,
    },

    #[error("Failed to delete object: {}{message}", status_prefix(.status))]
    Delete {
        status: Option<u16>,
        message: String,
    },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("Unsupported: {message}")]
    Unsupported { message: String },
}

fn status_prefix(status: &Option<u16>) -> String {
    status.map(|s| format!("{s}: ")).unwrap_or_default()
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an auth error that did not come from the server
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Authentication {
            status: None,
            message: message.into(),
        }
    }

    /// Create a parsing error
    pub fn parsing(message: impl Into<String>) -> Self {
        Self::Parsing {
            message: message.into(),
        }
    }

    /// Create an unsupported-operation error
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported {
            message: message.into(),
        }
    }

    /// Create a missing parameter error
    pub fn missing(names: &[impl AsRef<str>]) -> Self {
        let names: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
        Self::MissingParameter {
            names: names.join(", "),
        }
    }

    /// Create the operation-specific error variant
    pub fn operation(op: Operation, status: Option<u16>, message: impl Into<String>) -> Self {
        let message = message.into();
        match op {
            Operation::Get => Self::Get { status, message },
            Operation::List => Self::List { status, message },
            Operation::Create => Self::Create { status, message },
            Operation::Update => Self::Update { status, message },
            Operation::Delete => Self::Delete { status, message },
        }
    }

    /// Attribute an unexpected status or missing parameter to `op`.
    ///
    /// Connection, authentication and parsing failures keep their own kind.
    pub fn into_operation(self, op: Operation) -> Self {
        match self {
            Error::HttpStatus { status, message } => Self::operation(op, Some(status), message),
            Error::MissingParameter { names } => {
                Self::operation(op, None, format!("missing required parameter(s): {names}"))
            }
            other => other,
        }
    }

    /// HTTP status carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            Error::Authentication { status, .. }
            | Error::Get { status, .. }
            | Error::List { status, .. }
            | Error::Create { status, .. }
            | Error::Update { status, .. }
            | Error::Delete { status, .. } => *status,
            Error::Connection(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for gitlab-rest
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for attributing errors to an operation
pub trait OperationExt<T> {
    /// Re-label status errors as `op` errors
    fn during(self, op: Operation) -> Result<T>;
}

impl<T> OperationExt<T> for Result<T> {
    fn during(self, op: Operation) -> Result<T> {
        self.map_err(|e| e.into_operation(op))
    }
}
