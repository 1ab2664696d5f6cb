//! CLI commands and argument parsing

use crate::types::JsonValue;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line client for the GitLab REST API
#[derive(Parser, Debug)]
#[command(name = "gitlab-rest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Server name from the configuration file
    #[arg(short, long, global = true)]
    pub gitlab: Option<String>,

    /// Server URL; overrides the configuration file
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Private token; overrides the configuration file
    #[arg(long, global = true)]
    pub private_token: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authenticate and show the current user
    Whoami,

    /// List the resource kinds and their operations
    Kinds,

    /// Fetch one object
    Get {
        /// Resource kind, e.g. `project` or `project-branch`
        kind: String,

        /// Object id (not needed for `current-user`)
        id: Option<String>,

        #[command(flatten)]
        params: ParamArgs,
    },

    /// List objects
    List {
        /// Resource kind
        kind: String,

        /// Fetch every page
        #[arg(long, conflicts_with = "safe_all")]
        all: bool,

        /// Fetch every page, stopping quietly at the first failing one
        #[arg(long)]
        safe_all: bool,

        /// Page number
        #[arg(long)]
        page: Option<u64>,

        /// Items per page
        #[arg(long)]
        per_page: Option<u64>,

        #[command(flatten)]
        params: ParamArgs,
    },

    /// Create an object
    Create {
        /// Resource kind
        kind: String,

        /// Attribute, as key=value (repeatable)
        #[arg(short, long = "attr", value_parser = parse_key_val)]
        attrs: Vec<(String, JsonValue)>,
    },

    /// Update an object
    Update {
        /// Resource kind
        kind: String,

        /// Object id
        id: String,

        /// Attribute, as key=value (repeatable)
        #[arg(short, long = "attr", value_parser = parse_key_val)]
        attrs: Vec<(String, JsonValue)>,
    },

    /// Delete an object
    Delete {
        /// Resource kind
        kind: String,

        /// Object id
        id: String,

        #[command(flatten)]
        params: ParamArgs,
    },
}

/// Extra parameters shared by several subcommands
#[derive(Args, Debug, Clone, Default)]
pub struct ParamArgs {
    /// Parameter, as key=value (repeatable)
    #[arg(short, long = "param", value_parser = parse_key_val)]
    pub params: Vec<(String, JsonValue)>,
}

/// Parse `key=value`
///
/// Numbers, booleans and `null` are typed; anything else is a string.
pub fn parse_key_val(s: &str) -> std::result::Result<(String, JsonValue), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{s}'"))?;

    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }

    Ok((key.to_string(), parse_value(value)))
}

/// Parse a command-line value, typing numbers, booleans and `null`
pub fn parse_value(value: &str) -> JsonValue {
    match serde_json::from_str::<JsonValue>(value) {
        Ok(v @ (JsonValue::Number(_) | JsonValue::Bool(_) | JsonValue::Null)) => v,
        _ => JsonValue::String(value.to_string()),
    }
}
