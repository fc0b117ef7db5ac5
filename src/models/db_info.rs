// file: src/models/db_info.rs
// description: database level metadata returned by GET /{db}
// reference: https://docs.couchdb.org/en/stable/api/database/common.html

use crate::models::partition_info::Sizes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Props {
    pub partitioned: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexCounts {
    pub search: u64,
    pub view: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionedIndexes {
    pub count: u64,
    pub limit: u64,
    pub indexes: IndexCounts,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbInfo {
    pub db_name: String,
    pub doc_count: u64,
    pub doc_del_count: u64,
    /// Numeric on CouchDB 1.x, an opaque string on clustered servers.
    pub update_seq: Value,
    pub purge_seq: Value,
    pub compact_running: bool,
    pub disk_size: u64,
    pub instance_start_time: Value,
    pub disk_format_version: u32,
    pub sizes: Option<Sizes>,
    pub props: Option<Props>,
    pub partitioned_indexes: Option<PartitionedIndexes>,
}

impl DbInfo {
    /// The purge sequence as a number, or 0 when the server sent an opaque value.
    pub fn purge_seq(&self) -> i64 {
        self.purge_seq.as_i64().unwrap_or(0)
    }

    /// The purge sequence exactly as the server sent it (JSON text).
    pub fn string_purge_seq(&self) -> String {
        self.purge_seq.to_string()
    }

    pub fn update_seq(&self) -> String {
        self.update_seq.to_string()
    }

    pub fn is_partitioned(&self) -> bool {
        self.props.as_ref().is_some_and(|p| p.partitioned)
    }
}
