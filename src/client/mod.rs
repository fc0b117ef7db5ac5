// file: src/client/mod.rs
// description: http client module exports
// reference: internal module structure

pub mod builder;
pub mod couch;
pub mod database;
pub mod http;

pub use builder::ClientBuilder;
pub use couch::CouchClient;
pub use database::Database;
pub use http::HttpTransport;
