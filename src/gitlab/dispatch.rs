//! Generic CRUD dispatch
//!
//! Operations work for any [`ResourceKind`] by reading its descriptor:
//! the capability flags gate the operation, the required-parameter lists
//! are checked before any request is made, and the path template is filled
//! with sanitized values. Parameters the template does not consume travel as
//! query parameters on `get` and `list`.

use super::paged::PagedResources;
use super::Gitlab;
use crate::error::{Error, Operation, OperationExt, Result};
use crate::http::RequestConfig;
use crate::resource::{Resource, ResourceDescriptor, ResourceKind};
use crate::sanitize::sanitize;
use crate::template;
use crate::types::{value_to_string, JsonObject, JsonValue};
use tracing::debug;

/// How much of a collection `list` returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListMode {
    /// The first page (or the page named by a `page` parameter)
    #[default]
    CurrentPage,
    /// Every page; a failing page fails the listing
    All,
    /// Every page up to the first failing one
    SafeAll,
}

impl Gitlab {
    /// Fetch one object
    ///
    /// Kinds whose endpoint names a single object (such as the current user)
    /// ignore `id`; for every other kind it is required.
    pub async fn get(
        &self,
        kind: ResourceKind,
        id: Option<JsonValue>,
        params: &JsonObject,
    ) -> Result<Resource> {
        let desc = kind.descriptor();
        if !desc.capabilities.get {
            return Err(Error::unsupported(format!("{kind} objects cannot be fetched")));
        }

        let id = if desc.get_requires_id {
            match id.filter(|v| !v.is_null()) {
                Some(id) => Some(id),
                None => {
                    return Err(Error::operation(
                        Operation::Get,
                        None,
                        format!("{kind} requires an id"),
                    ))
                }
            }
        } else {
            None
        };

        check_required(desc.get_requires, params).during(Operation::Get)?;
        let url = endpoint(desc, params, id.as_ref()).during(Operation::Get)?;
        let config = RequestConfig::new().query_params(&unconsumed(desc, params));

        debug!("get {} {}", kind, url);
        let value = self
            .http
            .get(&url, config)
            .await
            .during(Operation::Get)?
            .into_json()?;
        Resource::from_api(kind, value)
    }

    /// List objects
    pub async fn list(
        &self,
        kind: ResourceKind,
        params: &JsonObject,
        mode: ListMode,
    ) -> Result<Vec<Resource>> {
        let paged = self.list_paged(kind, params).await?;
        match mode {
            ListMode::CurrentPage => paged.into_fetched(),
            ListMode::All => paged.fetch_all().await,
            ListMode::SafeAll => paged.fetch_all_safe().await,
        }
    }

    /// List objects lazily, one page at a time
    pub async fn list_paged(
        &self,
        kind: ResourceKind,
        params: &JsonObject,
    ) -> Result<PagedResources<'_>> {
        let desc = kind.descriptor();
        if !desc.capabilities.list {
            return Err(Error::unsupported(format!("{kind} objects cannot be listed")));
        }

        check_required(desc.list_requires, params).during(Operation::List)?;
        let url = endpoint(desc, params, None).during(Operation::List)?;
        let config = RequestConfig::new().query_params(&unconsumed(desc, params));

        debug!("list {} {}", kind, url);
        let list = self.http.list(&url, config).await?;
        Ok(PagedResources::new(kind, list))
    }

    /// Create `obj` on the server and adopt the server's representation
    pub async fn create(&self, obj: &mut Resource) -> Result<()> {
        let kind = obj.kind();
        let desc = kind.descriptor();
        if !desc.capabilities.create {
            return Err(Error::unsupported(format!("{kind} objects cannot be created")));
        }

        check_required(desc.create_requires, obj.attrs()).during(Operation::Create)?;
        let url = endpoint(desc, obj.attrs(), None).during(Operation::Create)?;
        let body = unconsumed(desc, obj.attrs());

        debug!("create {} {}", kind, url);
        let value = self
            .http
            .post(&url, JsonValue::Object(body))
            .await
            .during(Operation::Create)?
            .into_json()?;
        obj.absorb(into_object(kind, value)?);
        Ok(())
    }

    /// Save the fields of `obj` and adopt the server's representation
    pub async fn update(&self, obj: &mut Resource) -> Result<()> {
        let kind = obj.kind();
        let desc = kind.descriptor();
        if !desc.capabilities.update {
            return Err(Error::unsupported(format!("{kind} objects cannot be updated")));
        }

        let id = require_id(obj, Operation::Update)?;
        check_required(desc.update_requires, obj.attrs()).during(Operation::Update)?;
        let url = endpoint(desc, obj.attrs(), Some(&id)).during(Operation::Update)?;
        let body = unconsumed(desc, obj.attrs());

        debug!("update {} {}", kind, url);
        let value = self
            .http
            .put(&url, JsonValue::Object(body))
            .await
            .during(Operation::Update)?
            .into_json()?;
        obj.absorb(into_object(kind, value)?);
        Ok(())
    }

    /// Delete `obj`
    pub async fn delete(&self, obj: &Resource) -> Result<bool> {
        let kind = obj.kind();
        let desc = kind.descriptor();
        if !desc.capabilities.delete {
            return Err(Error::unsupported(format!("{kind} objects cannot be deleted")));
        }

        let id = require_id(obj, Operation::Delete)?;
        let url = endpoint(desc, obj.attrs(), Some(&id)).during(Operation::Delete)?;

        debug!("delete {} {}", kind, url);
        self.http
            .delete(&url, RequestConfig::new())
            .await
            .during(Operation::Delete)?;
        Ok(true)
    }

    /// Delete the object of `kind` identified by `id`
    ///
    /// `params` supplies the path parameters of nested kinds.
    pub async fn delete_by_id(
        &self,
        kind: ResourceKind,
        id: JsonValue,
        params: &JsonObject,
    ) -> Result<bool> {
        let mut obj = Resource::new(kind, params.clone());
        obj.set(kind.descriptor().id_attr, id);
        self.delete(&obj).await
    }

    /// Delete by kind name or tag, e.g. `"Project"` or `"project-branch"`
    pub async fn delete_by_tag(
        &self,
        tag: &str,
        id: JsonValue,
        params: &JsonObject,
    ) -> Result<bool> {
        let kind: ResourceKind = tag.parse()?;
        self.delete_by_id(kind, id, params).await
    }
}

/// Every required name must be present and non-null
fn check_required(required: &[&str], params: &JsonObject) -> Result<()> {
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|name| params.get(*name).map_or(true, JsonValue::is_null))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::missing(&missing))
    }
}

/// Fill the path template, then append the sanitized id
fn endpoint(
    desc: &ResourceDescriptor,
    params: &JsonObject,
    id: Option<&JsonValue>,
) -> Result<String> {
    let path = template::render(desc.path, params)?;
    Ok(match id {
        Some(id) => format!("{}/{}", path, value_to_string(&sanitize(id))),
        None => path,
    })
}

/// Entries the path template does not consume
fn unconsumed(desc: &ResourceDescriptor, params: &JsonObject) -> JsonObject {
    let consumed = template::extract_variables(desc.path);
    params
        .iter()
        .filter(|(key, _)| !consumed.iter().any(|c| c == *key))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

fn require_id(obj: &Resource, op: Operation) -> Result<JsonValue> {
    obj.id().cloned().ok_or_else(|| {
        Error::operation(
            op,
            None,
            format!("{} has no {}", obj.kind(), obj.descriptor().id_attr),
        )
    })
}

fn into_object(kind: ResourceKind, value: JsonValue) -> Result<JsonObject> {
    match value {
        JsonValue::Object(map) => Ok(map),
        other => Err(Error::parsing(format!(
            "expected a JSON object for {kind}, got {other}"
        ))),
    }
}
