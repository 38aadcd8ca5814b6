// src/error.rs
// Error taxonomy shared by connectors, store and API layer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    /// Bad caller input (query params, malformed URLs). Never retried.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Network/HTTP failure talking to an external source.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// Source responded, but its payload could not be decoded.
    #[error("parse failed: {0}")]
    Parse(String),

    /// Store uniqueness violation on `(source, url)`. The orchestrator
    /// treats this as "already present"; it is never user-visible.
    #[error("duplicate mention: {0}")]
    Conflict(String),
}

impl IngestError {
    pub fn invalid<S: Into<String>>(msg: S) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

impl From<reqwest::Error> for IngestError {
    fn from(e: reqwest::Error) -> Self {
        // Body-decode errors surface after a 2xx; everything else is a fetch problem.
        if e.is_decode() {
            IngestError::Parse(e.to_string())
        } else {
            IngestError::Fetch(e.to_string())
        }
    }
}
