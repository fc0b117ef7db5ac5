// file: src/uri/mod.rs
// description: uri encoding and building module exports
// reference: internal module structure

pub mod builder;
pub mod components;

pub use builder::{DatabaseUri, UriBuilder, encode_path};
pub use components::{Charset, ComponentType, encode, encode_uri_component};
