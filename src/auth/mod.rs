//! Authentication module
//!
//! Supports: private token, email/password credentials
//!
//! Both strategies end with the session's identity populated and the
//! `PRIVATE-TOKEN` header installed on the session.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::AuthStrategy;
