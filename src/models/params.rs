// file: src/models/params.rs
// description: ordered query parameters for document requests
// reference: https://docs.couchdb.org/en/stable/api/document/common.html

use crate::uri::components::{ComponentType, encode};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub key: String,
    pub value: String,
}

impl Param {
    pub fn new(key: impl Into<String>, value: impl ToString) -> Self {
        Self {
            key: key.into(),
            value: value.to_string(),
        }
    }

    pub fn to_url_encoded(&self) -> String {
        format!(
            "{}={}",
            encode(&self.key, ComponentType::QueryParam),
            encode(&self.value, ComponentType::QueryParam)
        )
    }
}

/// Query parameters in insertion order. Duplicate keys are allowed unless
/// [`Params::replace_or_add`] is used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    params: Vec<Param>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl ToString) {
        self.params.push(Param::new(name, value));
    }

    /// Replaces the value of the first parameter named `name`, or appends one.
    pub fn replace_or_add(&mut self, name: impl Into<String>, value: impl ToString) {
        let name = name.into();
        match self.params.iter_mut().find(|p| p.key == name) {
            Some(existing) => existing.value = value.to_string(),
            None => self.params.push(Param::new(name, value)),
        }
    }

    pub fn rev(self, rev: &str) -> Self {
        self.add_param("rev", rev)
    }

    pub fn revs_info(self) -> Self {
        self.add_param("revs_info", true)
    }

    pub fn attachments(self) -> Self {
        self.add_param("attachments", true)
    }

    pub fn revisions(self) -> Self {
        self.add_param("revs", true)
    }

    pub fn conflicts(self) -> Self {
        self.add_param("conflicts", true)
    }

    pub fn local_seq(self) -> Self {
        self.add_param("local_seq", true)
    }

    pub fn read_quorum(self, quorum: u32) -> Self {
        self.add_param("r", quorum)
    }

    pub fn write_quorum(self, quorum: u32) -> Self {
        self.add_param("w", quorum)
    }

    pub fn include_docs(self) -> Self {
        self.add_param("include_docs", true)
    }

    pub fn limit(self, limit: u64) -> Self {
        self.add_param("limit", limit)
    }

    pub fn skip(self, skip: u64) -> Self {
        self.add_param("skip", skip)
    }

    pub fn descending(self) -> Self {
        self.add_param("descending", true)
    }

    /// Keys are JSON values on the wire, so a string key is sent quoted.
    pub fn start_key(self, key: &str) -> Self {
        self.add_param("startkey", Value::from(key))
    }

    pub fn end_key(self, key: &str) -> Self {
        self.add_param("endkey", Value::from(key))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.key == name)
            .map(|p| p.value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Param> {
        self.params.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(Param::to_url_encoded)
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}
