//! Resource instances
//!
//! A [`Resource`] is a bag of JSON fields tagged with its kind. Instances
//! returned by the server are marked as hydrated; instances built locally are
//! not until they have been created.

use super::descriptor::{ResourceDescriptor, ResourceKind};
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// One remote object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    kind: ResourceKind,
    attrs: JsonObject,
    #[serde(default)]
    from_api: bool,
}

impl Resource {
    /// Create a local, not-yet-created instance
    pub fn new(kind: ResourceKind, attrs: JsonObject) -> Self {
        Self {
            kind,
            attrs,
            from_api: false,
        }
    }

    /// Decode a server payload into a hydrated instance
    pub fn from_api(kind: ResourceKind, value: JsonValue) -> Result<Self> {
        match value {
            JsonValue::Object(attrs) => Ok(Self {
                kind,
                attrs,
                from_api: true,
            }),
            other => Err(Error::parsing(format!(
                "expected a JSON object for {kind}, got {other}"
            ))),
        }
    }

    /// Create from a `json!({...})` literal; non-objects give an empty instance
    pub fn from_value(kind: ResourceKind, value: JsonValue) -> Self {
        let attrs = match value {
            JsonValue::Object(map) => map,
            _ => JsonObject::new(),
        };
        Self::new(kind, attrs)
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn descriptor(&self) -> &'static ResourceDescriptor {
        self.kind.descriptor()
    }

    /// Whether the fields came from the server
    pub fn is_from_api(&self) -> bool {
        self.from_api
    }

    pub fn attrs(&self) -> &JsonObject {
        &self.attrs
    }

    pub fn into_attrs(self) -> JsonObject {
        self.attrs
    }

    /// Get a field by name
    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        self.attrs.get(name)
    }

    /// Get a string field
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).and_then(JsonValue::as_str)
    }

    /// Get an integer field
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.attrs.get(name).and_then(JsonValue::as_i64)
    }

    /// Set a field
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<JsonValue>) {
        self.attrs.insert(name.into(), value.into());
    }

    /// Remove a field
    pub fn remove(&mut self, name: &str) -> Option<JsonValue> {
        self.attrs.remove(name)
    }

    /// Primary identifier, if set
    pub fn id(&self) -> Option<&JsonValue> {
        self.attrs
            .get(self.descriptor().id_attr)
            .filter(|v| !v.is_null())
    }

    /// Deserialize the fields into a typed struct
    pub fn to_typed<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(JsonValue::Object(self.attrs.clone()))
            .map_err(|e| Error::parsing(format!("cannot decode {} fields: {e}", self.kind)))
    }

    /// Adopt a server response as the current state
    pub(crate) fn absorb(&mut self, attrs: JsonObject) {
        self.attrs.extend(attrs);
        self.from_api = true;
    }
}
