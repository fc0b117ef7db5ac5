// file: src/models/partition_info.rs
// description: metadata of a single partition of a partitioned database
// reference: https://docs.couchdb.org/en/stable/api/partitioned-dbs.html

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sizes {
    pub active: u64,
    pub external: u64,
}

/// Fields missing from the server answer fall back to zero / `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionInfo {
    pub doc_count: u64,
    pub doc_del_count: u64,
    pub partition: Option<String>,
    pub sizes: Sizes,
}

impl fmt::Display for PartitionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PartitionInfo [docCount={}, docDelCount={}, partition={}, sizes=Sizes [active={}, external={}]]",
            self.doc_count,
            self.doc_del_count,
            self.partition.as_deref().unwrap_or("null"),
            self.sizes.active,
            self.sizes.external
        )
    }
}
