//! CLI runner - executes commands

use crate::cli::commands::{parse_value, Cli, Commands, ParamArgs};
use crate::config::load_config;
use crate::error::{Error, Result};
use crate::gitlab::{Gitlab, ListMode};
use crate::resource::{Resource, ResourceKind};
use crate::session::Session;
use crate::types::{JsonObject, JsonValue};
use serde_json::json;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Kinds => print_json(&kinds()),
            Commands::Whoami => {
                let mut gl = self.client()?;
                let user = gl.auth().await?;
                print_json(&JsonValue::Object(user.into_attrs()))
            }
            Commands::Get { kind, id, params } => {
                let gl = self.connect().await?;
                let obj = gl
                    .get(kind.parse()?, id.as_deref().map(parse_value), &to_object(params))
                    .await?;
                print_json(&JsonValue::Object(obj.into_attrs()))
            }
            Commands::List {
                kind,
                all,
                safe_all,
                page,
                per_page,
                params,
            } => {
                let mode = if *all {
                    ListMode::All
                } else if *safe_all {
                    ListMode::SafeAll
                } else {
                    ListMode::CurrentPage
                };

                let mut params = to_object(params);
                if let Some(page) = page {
                    params.insert("page".to_string(), json!(page));
                }
                if let Some(per_page) = per_page {
                    params.insert("per_page".to_string(), json!(per_page));
                }

                let gl = self.connect().await?;
                let items = gl.list(kind.parse()?, &params, mode).await?;
                let items: Vec<JsonValue> = items
                    .into_iter()
                    .map(|obj| JsonValue::Object(obj.into_attrs()))
                    .collect();
                print_json(&JsonValue::Array(items))
            }
            Commands::Create { kind, attrs } => {
                let gl = self.connect().await?;
                let mut obj = Resource::new(kind.parse()?, attrs.iter().cloned().collect());
                gl.create(&mut obj).await?;
                print_json(&JsonValue::Object(obj.into_attrs()))
            }
            Commands::Update { kind, id, attrs } => {
                let kind: ResourceKind = kind.parse()?;
                let gl = self.connect().await?;
                let mut obj = Resource::new(kind, attrs.iter().cloned().collect());
                obj.set(kind.descriptor().id_attr, parse_value(id));
                gl.update(&mut obj).await?;
                print_json(&JsonValue::Object(obj.into_attrs()))
            }
            Commands::Delete { kind, id, params } => {
                let gl = self.connect().await?;
                let deleted = gl
                    .delete_by_tag(kind, parse_value(id), &to_object(params))
                    .await?;
                print_json(&json!({ "deleted": deleted }))
            }
        }
    }

    /// Session from `--url` or the configuration file, with overrides applied
    fn session(&self) -> Result<Session> {
        let mut session = match (&self.cli.url, &self.cli.config) {
            (Some(url), _) => Session::new(url.clone()),
            (None, Some(path)) => load_config(path)?.session(self.cli.gitlab.as_deref())?,
            (None, None) => {
                return Err(Error::config(
                    "No server given (use --url or --config)",
                ))
            }
        };

        if let Some(token) = &self.cli.private_token {
            session.set_token(Some(token.clone()));
        }
        Ok(session)
    }

    fn client(&self) -> Result<Gitlab> {
        Gitlab::new(self.session()?)
    }

    /// Client ready for resource operations
    ///
    /// A token is sent as-is; credentials are exchanged for one first.
    async fn connect(&self) -> Result<Gitlab> {
        let mut gl = self.client()?;
        if gl.session().private_token.is_none() && gl.session().has_credentials() {
            debug!("No private token configured, authenticating with credentials");
            gl.credentials_auth().await?;
        }
        Ok(gl)
    }
}

/// Descriptor summary for every kind
fn kinds() -> JsonValue {
    let kinds: Vec<JsonValue> = ResourceKind::ALL
        .iter()
        .map(|kind| {
            let desc = kind.descriptor();
            let caps = desc.capabilities;
            let ops: Vec<&str> = [
                ("list", caps.list),
                ("get", caps.get),
                ("create", caps.create),
                ("update", caps.update),
                ("delete", caps.delete),
            ]
            .into_iter()
            .filter_map(|(name, enabled)| enabled.then_some(name))
            .collect();

            json!({
                "kind": kind.tag(),
                "name": desc.name,
                "path": desc.path,
                "operations": ops,
                "create_requires": desc.create_requires,
            })
        })
        .collect();
    JsonValue::Array(kinds)
}

fn to_object(args: &ParamArgs) -> JsonObject {
    args.params.iter().cloned().collect()
}

fn print_json(value: &JsonValue) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
