// file: src/models/all_docs.rs
// description: result of a GET /{db}/_all_docs request
// reference: https://docs.couchdb.org/en/stable/api/database/bulk-api.html

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowValue {
    pub rev: String,
    pub deleted: bool,
}

/// One row per document. Rows for requested keys that do not exist carry
/// only `key` and `error`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllDocsRow {
    pub id: Option<String>,
    pub key: Value,
    pub value: Option<RowValue>,
    pub doc: Option<Value>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllDocsResponse {
    pub total_rows: u64,
    pub offset: u64,
    pub rows: Vec<AllDocsRow>,
}

impl AllDocsResponse {
    pub fn doc_ids(&self) -> Vec<&str> {
        self.rows.iter().filter_map(|row| row.id.as_deref()).collect()
    }

    /// Deserializes the included documents; rows without a `doc` are skipped.
    pub fn docs_as<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.rows
            .iter()
            .filter_map(|row| row.doc.as_ref())
            .filter(|doc| !doc.is_null())
            .map(|doc| Ok(T::deserialize(doc)?))
            .collect()
    }
}
