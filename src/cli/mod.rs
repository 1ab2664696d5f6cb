//! CLI module
//!
//! Command-line interface over the client.
//!
//! # Commands
//!
//! - `whoami` - Authenticate and show the current user
//! - `kinds` - List resource kinds and their operations
//! - `get` / `list` / `create` / `update` / `delete` - CRUD on any kind

mod commands;
mod runner;

pub use commands::{parse_key_val, Cli, Commands, ParamArgs};
pub use runner::Runner;
