// src/ingest/types.rs
use async_trait::async_trait;

use crate::error::IngestError;
use crate::mention::Source;

/// Connector output before normalization. Field contents are still in the
/// source's native shape (summaries may carry HTML, links may be missing).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawItem {
    pub title: Option<String>,
    pub link: Option<String>,
    pub summary: Option<String>,
    pub author: Option<String>,
    pub timestamp: Option<RawTimestamp>,
}

/// Source-native timestamp, carried opaquely so only the normalization
/// boundary knows per-source formats.
#[derive(Debug, Clone, PartialEq)]
pub enum RawTimestamp {
    /// RSS `pubDate`, e.g. "Tue, 12 Aug 2025 15:04:05 GMT".
    Rfc2822(String),
    /// Mastodon/Atom, e.g. "2025-08-12T15:04:05.000Z".
    Rfc3339(String),
    /// HN `created_at_i`, Reddit `created_utc`.
    UnixSeconds(i64),
}

/// One external source. A connector makes exactly one outbound call per
/// `fetch` and holds no cross-call state.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn fetch(&self) -> Result<Vec<RawItem>, IngestError>;
    fn source(&self) -> Source;
}
