//! Schema - shape check for raw widget requests
//!
//! # Rules
//! - the request is a JSON object
//! - `type`, `requestId`, `widgetId`, `owner` are present and are strings
//! - `type` contains one of `create`, `delete`, `update` (unanchored match)
//! - `owner` is made only of ASCII letters and spaces
//! - `label` / `description` are strings when present
//! - `otherAttributes` is an array of objects with string `name` and `value`
//!
//! The check is all-or-nothing and never panics.

use serde_json::{Map, Value};
use thiserror::Error;

const REQUIRED_FIELDS: [&str; 4] = ["type", "requestId", "widgetId", "owner"];
const TYPE_TOKENS: [&str; 3] = ["create", "delete", "update"];

/// The first rule a request broke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {reason}")]
pub struct SchemaViolation {
    pub path: String,
    pub reason: String,
}

impl SchemaViolation {
    fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// `true` when the request satisfies every rule.
pub fn validate(request: &Value) -> bool {
    check(request).is_ok()
}

/// Like `validate`, but reports which rule failed.
pub fn check(request: &Value) -> Result<(), SchemaViolation> {
    let object = request
        .as_object()
        .ok_or_else(|| SchemaViolation::new("$", "request must be an object"))?;

    for field in REQUIRED_FIELDS {
        match object.get(field) {
            None => return Err(SchemaViolation::new(field, "required field is missing")),
            Some(value) if !value.is_string() => {
                return Err(SchemaViolation::new(field, "must be a string"));
            }
            Some(_) => {}
        }
    }

    let kind = string_field(object, "type");
    if !TYPE_TOKENS.iter().any(|token| kind.contains(token)) {
        return Err(SchemaViolation::new(
            "type",
            format!("{kind:?} does not match create|delete|update"),
        ));
    }

    let owner = string_field(object, "owner");
    if owner.is_empty() || !owner.chars().all(|c| c.is_ascii_alphabetic() || c == ' ') {
        return Err(SchemaViolation::new(
            "owner",
            format!("{owner:?} must contain only letters and spaces"),
        ));
    }

    for field in ["label", "description"] {
        if let Some(value) = object.get(field)
            && !value.is_string()
        {
            return Err(SchemaViolation::new(field, "must be a string"));
        }
    }

    if let Some(attributes) = object.get("otherAttributes") {
        check_attributes(attributes)?;
    }

    Ok(())
}

fn check_attributes(attributes: &Value) -> Result<(), SchemaViolation> {
    let items = attributes
        .as_array()
        .ok_or_else(|| SchemaViolation::new("otherAttributes", "must be an array"))?;

    for (index, item) in items.iter().enumerate() {
        let path = format!("otherAttributes[{index}]");
        let attribute = item
            .as_object()
            .ok_or_else(|| SchemaViolation::new(path.clone(), "must be an object"))?;
        for field in ["name", "value"] {
            match attribute.get(field) {
                Some(Value::String(_)) => {}
                Some(_) => {
                    return Err(SchemaViolation::new(
                        format!("{path}.{field}"),
                        "must be a string",
                    ));
                }
                None => {
                    return Err(SchemaViolation::new(
                        format!("{path}.{field}"),
                        "required field is missing",
                    ));
                }
            }
        }
    }
    Ok(())
}

fn string_field<'a>(object: &'a Map<String, Value>, field: &str) -> &'a str {
    object.get(field).and_then(Value::as_str).unwrap_or_default()
}
