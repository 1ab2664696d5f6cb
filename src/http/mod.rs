//! HTTP transport module
//!
//! A thin client over `reqwest` that applies the session's headers, TLS and
//! timeout settings to every request and maps responses onto the crate's
//! error taxonomy.

mod client;
mod request;
mod response;

pub use client::HttpClient;
pub(crate) use client::check_status;
pub use request::RequestConfig;
pub use response::{extract_message, Payload, RawResponse};
