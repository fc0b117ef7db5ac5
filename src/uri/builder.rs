// file: src/uri/builder.rs
// description: incremental construction of account, database and document uris
// reference: https://docs.couchdb.org/en/stable/api/basics.html

use crate::error::{CouchError, Result};
use crate::models::Params;
use crate::uri::components::{ComponentType, encode};
use crate::util::validation::DESIGN_PREFIX;
use url::Url;

const DESIGN_PREFIX_ENCODED: &str = "_design%2F";
const LOCAL_PREFIX_ENCODED: &str = "_local%2F";

/// Appends encoded path segments and query parameters to a base URI.
///
/// The base never keeps a trailing `/`, so every non-empty [`UriBuilder::path`]
/// call contributes exactly one separator.
#[derive(Debug, Clone)]
pub struct UriBuilder {
    base: String,
    path: String,
    params: Params,
    raw_query: String,
}

impl UriBuilder {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            path: String::new(),
            params: Params::new(),
            raw_query: String::new(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Adds one path segment. Slashes inside `segment` are escaped, except the
    /// one after a leading `_design` or `_local`.
    pub fn path(mut self, segment: &str) -> Self {
        if !segment.is_empty() {
            self.path.push('/');
            self.path.push_str(&encode_path(segment));
        }
        self
    }

    pub fn query(mut self, name: &str, value: impl ToString) -> Self {
        self.params.replace_or_add(name, value);
        self
    }

    pub fn add_query(mut self, name: &str, value: impl ToString) -> Self {
        self.params.push(name, value);
        self
    }

    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// An already encoded query string, appended after the parameters.
    pub fn raw_query(mut self, query: &str) -> Self {
        self.raw_query = query.to_string();
        self
    }

    pub fn build(&self) -> String {
        let mut uri = format!("{}{}", self.base, self.path);
        let joined = self.params.to_query_string();

        match (joined.is_empty(), self.raw_query.is_empty()) {
            (false, false) => uri.push_str(&format!("?{}&{}", joined, self.raw_query)),
            (false, true) => uri.push_str(&format!("?{}", joined)),
            (true, false) => uri.push_str(&format!("?{}", self.raw_query)),
            (true, true) => {}
        }

        uri
    }

    pub fn build_url(&self) -> Result<Url> {
        Url::parse(&self.build()).map_err(CouchError::from)
    }
}

/// Encodes a document id or other path piece as a single segment.
pub fn encode_path(segment: &str) -> String {
    let encoded = encode(segment, ComponentType::PathSegment);
    if encoded.starts_with(DESIGN_PREFIX_ENCODED) || encoded.starts_with(LOCAL_PREFIX_ENCODED) {
        encoded.replacen("%2F", "/", 1)
    } else {
        encoded
    }
}

/// URIs below a single database.
#[derive(Debug, Clone)]
pub struct DatabaseUri {
    db_uri: String,
}

impl DatabaseUri {
    pub fn new(base: &str, db_name: &str) -> Self {
        Self {
            db_uri: UriBuilder::new(base).path(db_name).build(),
        }
    }

    pub fn database_uri(&self) -> &str {
        &self.db_uri
    }

    pub fn builder(&self) -> UriBuilder {
        UriBuilder::new(&self.db_uri)
    }

    pub fn document_uri(&self, id: &str) -> String {
        self.document(id).build()
    }

    pub fn document_uri_with_rev(&self, id: &str, rev: &str) -> String {
        self.document(id).query("rev", rev).build()
    }

    pub fn document_uri_with_params(&self, id: &str, params: &Params) -> String {
        self.document(id).params(params.clone()).build()
    }

    pub fn attachment_uri(&self, id: &str, rev: Option<&str>, name: &str) -> String {
        let builder = self.document(id).path(name);
        match rev {
            Some(rev) => builder.query("rev", rev).build(),
            None => builder.build(),
        }
    }

    pub fn database_uri_with_params(&self, params: &Params) -> String {
        self.builder().params(params.clone()).build()
    }

    pub fn all_docs_uri(&self, params: &Params) -> String {
        self.builder()
            .path("_all_docs")
            .params(params.clone())
            .build()
    }

    pub fn bulk_docs_uri(&self) -> String {
        self.builder().path("_bulk_docs").build()
    }

    pub fn ensure_full_commit_uri(&self) -> String {
        self.builder().path("_ensure_full_commit").build()
    }

    pub fn partition_uri(&self, partition_key: &str) -> String {
        self.builder()
            .path("_partition")
            .path(partition_key)
            .build()
    }

    pub fn update_handler_uri(
        &self,
        design_doc: &str,
        handler: &str,
        doc_id: Option<&str>,
        params: &Params,
    ) -> String {
        let builder = self
            .builder()
            .path("_design")
            .path(design_doc)
            .path("_update")
            .path(handler)
            .params(params.clone());

        match doc_id {
            Some(id) if !id.is_empty() => builder.path(id).build(),
            _ => builder.build(),
        }
    }

    fn document(&self, id: &str) -> UriBuilder {
        match id.strip_prefix(DESIGN_PREFIX) {
            Some(name) => self.builder().path("_design").path(name),
            None => self.builder().path(id),
        }
    }
}
