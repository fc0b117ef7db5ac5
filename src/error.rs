// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CouchError>;

/// What the server told us about a failed request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorDetails {
    pub status: u16,
    pub url: Option<String>,
    pub error: Option<String>,
    pub reason: Option<String>,
    pub message: String,
}

impl ErrorDetails {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_error(mut self, error: Option<String>, reason: Option<String>) -> Self {
        self.error = error;
        self.reason = reason;
        self
    }
}

impl fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.status > 0 {
            write!(f, "{} ", self.status)?;
        }
        write!(f, "{}", self.message.strip_suffix('.').unwrap_or(&self.message))?;
        if let Some(url) = &self.url {
            write!(f, " at {}", url)?;
        }
        write!(f, ".")?;
        if let Some(error) = &self.error {
            write!(f, " Error: {}.", error)?;
        }
        if let Some(reason) = &self.reason {
            write!(f, " Reason: {}.", reason)?;
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum CouchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("{0}")]
    NoDocument(ErrorDetails),

    #[error("{0}")]
    DocumentConflict(ErrorDetails),

    #[error("{0}")]
    PreconditionFailed(ErrorDetails),

    #[error("{0}")]
    TooManyRequests(ErrorDetails),

    #[error("{0}")]
    Server(ErrorDetails),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URI: {0}")]
    InvalidUri(#[from] url::ParseError),
}

impl CouchError {
    /// Maps a non-success status code onto the matching variant.
    pub fn from_status(details: ErrorDetails) -> Self {
        match details.status {
            404 => CouchError::NoDocument(details),
            409 => CouchError::DocumentConflict(details),
            412 => CouchError::PreconditionFailed(details),
            429 => CouchError::TooManyRequests(details),
            _ => CouchError::Server(details),
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            CouchError::NoDocument(d)
            | CouchError::DocumentConflict(d)
            | CouchError::PreconditionFailed(d)
            | CouchError::TooManyRequests(d)
            | CouchError::Server(d) => Some(d.status),
            CouchError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn details(&self) -> Option<&ErrorDetails> {
        match self {
            CouchError::NoDocument(d)
            | CouchError::DocumentConflict(d)
            | CouchError::PreconditionFailed(d)
            | CouchError::TooManyRequests(d)
            | CouchError::Server(d) => Some(d),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CouchError::NoDocument(_))
    }
}
