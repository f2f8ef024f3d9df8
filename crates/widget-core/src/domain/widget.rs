//! Widget - the persisted shape of a create request.

use std::collections::BTreeMap;

use super::request::WidgetRequest;

/// Column holding the table key.
pub const WIDGET_ID_COLUMN: &str = "widget_id";

/// A flat table row: column name -> string value.
pub type TableItem = BTreeMap<String, String>;

/// Widget is the record written by a create request.
///
/// `extensions` keeps `otherAttributes` in request order; flattening happens in
/// `to_item`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Widget {
    pub widget_id: String,
    pub owner: String,
    pub label: Option<String>,
    pub description: Option<String>,
    pub extensions: Vec<(String, String)>,
}

impl Widget {
    pub fn from_request(request: &WidgetRequest) -> Self {
        Self {
            widget_id: request.widget_id.clone(),
            owner: request.owner.clone(),
            label: request.label.clone(),
            description: request.description.clone(),
            extensions: request
                .attributes()
                .iter()
                .map(|attr| (attr.name.clone(), attr.value.clone()))
                .collect(),
        }
    }

    /// Flatten into a table row.
    ///
    /// Extension columns are applied after the core columns, so an attribute
    /// named `label`, `owner` or even `widget_id` silently replaces it. Later
    /// attributes win over earlier ones with the same name.
    pub fn to_item(&self) -> TableItem {
        let mut item = TableItem::new();
        item.insert(WIDGET_ID_COLUMN.to_string(), self.widget_id.clone());
        item.insert("owner".to_string(), self.owner.clone());
        if let Some(label) = &self.label {
            item.insert("label".to_string(), label.clone());
        }
        if let Some(description) = &self.description {
            item.insert("description".to_string(), description.clone());
        }
        for (name, value) in &self.extensions {
            item.insert(name.clone(), value.clone());
        }
        item
    }
}

/// Path segment derived from an owner: lower-cased, spaces become hyphens.
pub fn owner_slug(owner: &str) -> String {
    owner.replace(' ', "-").to_lowercase()
}

/// Object key of a widget in the document store: `{prefix}/{owner-slug}/{id}`.
///
/// The key depends on `owner`, so a delete must carry the owner used at create
/// time or it targets a key that does not exist.
pub fn document_key(prefix: &str, owner: &str, widget_id: &str) -> String {
    format!("{}/{}/{}", prefix, owner_slug(owner), widget_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::request::RequestKind;

    #[test]
    fn document_key_uses_owner_slug() {
        assert_eq!(document_key("widgets", "Jane Doe", "w1"), "widgets/jane-doe/w1");
        assert_eq!(owner_slug("Mary  Ann SMITH"), "mary--ann-smith");
    }

    #[test]
    fn item_flattens_attributes_after_core_fields() {
        let request = WidgetRequest::new(RequestKind::Create, "r1", "w1", "Jane Doe")
            .with_label("L")
            .with_description("D")
            .with_attribute("color", "red")
            .with_attribute("label", "overridden")
            .with_attribute("color", "blue");

        let item = Widget::from_request(&request).to_item();

        assert_eq!(item.get("widget_id").map(String::as_str), Some("w1"));
        assert_eq!(item.get("owner").map(String::as_str), Some("Jane Doe"));
        assert_eq!(item.get("label").map(String::as_str), Some("overridden"));
        assert_eq!(item.get("description").map(String::as_str), Some("D"));
        assert_eq!(item.get("color").map(String::as_str), Some("blue"));
        assert_eq!(item.len(), 5);
    }

    #[test]
    fn item_omits_absent_optional_fields() {
        let request = WidgetRequest::new(RequestKind::Create, "r1", "w1", "Jane Doe");
        let item = Widget::from_request(&request).to_item();
        assert!(!item.contains_key("label"));
        assert!(!item.contains_key("description"));
    }
}
