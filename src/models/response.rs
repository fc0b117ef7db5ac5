// file: src/models/response.rs
// description: write acknowledgement returned by document operations

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub ok: bool,
    pub id: Option<String>,
    pub rev: Option<String>,
    pub error: Option<String>,
    pub reason: Option<String>,
    /// HTTP status of the request; not part of the body.
    #[serde(skip)]
    pub status_code: u16,
}

impl Response {
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    pub fn rev(&self) -> &str {
        self.rev.as_deref().unwrap_or_default()
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Response [id={}, rev={}]",
            self.id.as_deref().unwrap_or("null"),
            self.rev.as_deref().unwrap_or("null")
        )
    }
}
