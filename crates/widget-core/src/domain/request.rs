//! WidgetRequest - one mutation request pulled from the inbox.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// RequestKind is the decoded `type` of a request.
///
/// Only `create` and `delete` mutate storage. Everything else, including the
/// schema-legal `update`, lands in `Unhandled` and is ignored by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RequestKind {
    Create,
    Delete,
    Unhandled(String),
}

impl RequestKind {
    pub fn as_str(&self) -> &str {
        match self {
            RequestKind::Create => "create",
            RequestKind::Delete => "delete",
            RequestKind::Unhandled(other) => other,
        }
    }
}

impl From<String> for RequestKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "create" => RequestKind::Create,
            "delete" => RequestKind::Delete,
            _ => RequestKind::Unhandled(value),
        }
    }
}

impl From<RequestKind> for String {
    fn from(kind: RequestKind) -> Self {
        match kind {
            RequestKind::Unhandled(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `{name, value}` pair from `otherAttributes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherAttribute {
    pub name: String,
    pub value: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OtherAttribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            extra: Map::new(),
        }
    }
}

/// WidgetRequest is the typed view of a validated inbox item.
///
/// Fields the consumer does not know about are kept in `extra` so the request
/// re-serializes to the same JSON object it was decoded from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetRequest {
    #[serde(rename = "type")]
    pub kind: RequestKind,
    pub request_id: String,
    pub widget_id: String,
    pub owner: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_attributes: Option<Vec<OtherAttribute>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WidgetRequest {
    pub fn new(
        kind: RequestKind,
        request_id: impl Into<String>,
        widget_id: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            request_id: request_id.into(),
            widget_id: widget_id.into(),
            owner: owner.into(),
            label: None,
            description: None,
            other_attributes: None,
            extra: Map::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.other_attributes
            .get_or_insert_with(Vec::new)
            .push(OtherAttribute::new(name, value));
        self
    }

    /// Decode an already validated JSON value.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// `otherAttributes` in request order (empty when absent).
    pub fn attributes(&self) -> &[OtherAttribute] {
        self.other_attributes.as_deref().unwrap_or_default()
    }
}
