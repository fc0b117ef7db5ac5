// file: src/models/design_document.rs
// description: design documents holding views and update handlers
// reference: https://docs.couchdb.org/en/stable/ddocs/index.html

use crate::models::document::Document;
use crate::util::validation::DESIGN_PREFIX;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapReduce {
    pub map: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduce: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignDocument {
    #[serde(flatten)]
    pub document: Document,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views: Option<HashMap<String, MapReduce>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validate_doc_update: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shows: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lists: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updates: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexes: Option<Value>,
}

impl DesignDocument {
    /// A javascript design document named `name`, with or without the
    /// `_design/` prefix.
    pub fn new(name: &str) -> Self {
        Self {
            document: Document::with_id(design_id(name)),
            language: Some("javascript".to_string()),
            ..Default::default()
        }
    }

    pub fn add_view(&mut self, name: impl Into<String>, view: MapReduce) {
        self.views
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), view);
    }

    pub fn add_update_handler(&mut self, name: impl Into<String>, function: impl Into<String>) {
        self.updates
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), function.into());
    }
}

/// `name` with a single `_design/` prefix.
pub fn design_id(name: &str) -> String {
    if name.starts_with(DESIGN_PREFIX) {
        name.to_string()
    } else {
        format!("{}{}", DESIGN_PREFIX, name)
    }
}
