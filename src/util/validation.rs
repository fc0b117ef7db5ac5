// file: src/util/validation.rs
// description: argument validation and document id rules
// reference: input validation patterns

use crate::error::{CouchError, Result};
use url::Url;
use uuid::Uuid;

pub const DESIGN_PREFIX: &str = "_design/";
pub const LOCAL_PREFIX: &str = "_local/";

pub struct Validator;

impl Validator {
    pub fn assert_not_empty(value: &str, name: &str) -> Result<()> {
        if value.is_empty() {
            return Err(CouchError::Validation(format!("{} may not be empty.", name)));
        }
        Ok(())
    }

    pub fn assert_present<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str> {
        match value {
            Some(v) if !v.is_empty() => Ok(v),
            Some(_) => Err(CouchError::Validation(format!("{} may not be empty.", name))),
            None => Err(CouchError::Validation(format!("{} may not be null.", name))),
        }
    }

    pub fn assert_absent(value: Option<&str>, name: &str) -> Result<()> {
        if value.is_some() {
            return Err(CouchError::Validation(format!("{} should be null.", name)));
        }
        Ok(())
    }

    /// Ids starting with `_` are reserved, except design and local documents
    /// with a non-empty name.
    pub fn validate_document_id(id: &str) -> Result<()> {
        if !id.starts_with('_') {
            return Ok(());
        }

        let named = |prefix: &str| id.len() > prefix.len() && id.starts_with(prefix);
        if named(DESIGN_PREFIX) || named(LOCAL_PREFIX) {
            Ok(())
        } else {
            Err(CouchError::Validation(format!(
                "{} is not a valid document ID.",
                id
            )))
        }
    }

    pub fn validate_attachment_name(name: &str) -> Result<()> {
        if name.starts_with('_') {
            return Err(CouchError::Validation(format!(
                "{} is not a valid attachment name.",
                name
            )));
        }
        Ok(())
    }

    pub fn validate_url(url: &str) -> Result<Url> {
        let parsed = Url::parse(url)?;
        match parsed.scheme() {
            "http" | "https" => Ok(parsed),
            other => Err(CouchError::Validation(format!(
                "Unsupported URL scheme {}: {}",
                other, url
            ))),
        }
    }

    /// A random UUID as 32 lower-case hex digits, the id format CouchDB uses.
    pub fn generate_uuid() -> String {
        Uuid::new_v4().simple().to_string()
    }
}
