// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod uri;
pub mod util;

pub use client::{ClientBuilder, CouchClient, Database};
pub use config::{Config, ServerConfig};
pub use error::{CouchError, ErrorDetails, Result};
pub use models::{
    AllDocsResponse, Attachment, DbInfo, DesignDocument, Document, MapReduce, Param, Params,
    PartitionInfo, Response, Sizes,
};
pub use uri::{Charset, ComponentType, DatabaseUri, UriBuilder, encode_uri_component};
pub use util::{Validator, json_to_object};
