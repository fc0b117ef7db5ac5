// file: src/models/document.rs
// description: document metadata fields shared by every stored document
// reference: https://docs.couchdb.org/en/stable/api/document/common.html

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The underscore-prefixed fields the server manages. Embed it in your own
/// types with `#[serde(flatten)]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "_rev", skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,

    #[serde(rename = "_deleted", default, skip_serializing_if = "is_false")]
    pub deleted: bool,

    #[serde(rename = "_attachments", skip_serializing_if = "Option::is_none")]
    pub attachments: Option<HashMap<String, Attachment>>,
}

impl Document {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    pub fn add_attachment(&mut self, name: impl Into<String>, attachment: Attachment) {
        self.attachments
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), attachment);
    }
}

/// An inline (base64) attachment, or a stub describing a stored one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub stub: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revpos: Option<u64>,
}

impl Attachment {
    pub fn inline(data: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            content_type: Some(content_type.into()),
            data: Some(data.into()),
            ..Default::default()
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}
