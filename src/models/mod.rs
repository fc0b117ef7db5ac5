// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod all_docs;
pub mod db_info;
pub mod design_document;
pub mod document;
pub mod params;
pub mod partition_info;
pub mod response;

pub use all_docs::{AllDocsResponse, AllDocsRow, RowValue};
pub use db_info::{DbInfo, IndexCounts, PartitionedIndexes, Props};
pub use design_document::{DesignDocument, MapReduce, design_id};
pub use document::{Attachment, Document};
pub use params::{Param, Params};
pub use partition_info::{PartitionInfo, Sizes};
pub use response::Response;
