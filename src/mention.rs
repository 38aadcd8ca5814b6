// src/mention.rs
// Canonical record produced by the ingest pipeline and served by /mentions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of ingestion sources. Serialized as lowercase tags which also
/// appear in the `source=` query filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Rss,
    Hn,
    Mastodon,
    Reddit,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Rss => "rss",
            Source::Hn => "hn",
            Source::Mastodon => "mastodon",
            Source::Reddit => "reddit",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rss" => Ok(Source::Rss),
            "hn" => Ok(Source::Hn),
            "mastodon" => Ok(Source::Mastodon),
            "reddit" => Ok(Source::Reddit),
            _ => Err(()),
        }
    }
}

/// One stored mention. Immutable after insertion; `id` and `fetched_at`
/// are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mention {
    pub id: u64,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub url: String,
    pub source: Source,
    pub author: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub fetched_at: DateTime<Utc>,
    pub sentiment: Option<f32>,
}

impl Mention {
    /// Sort key for recency ordering: origin timestamp when the source
    /// supplied one, insertion time otherwise.
    pub fn recency(&self) -> DateTime<Utc> {
        self.published_at.unwrap_or(self.fetched_at)
    }
}

/// A normalized, scored candidate waiting for the store to assign
/// `id` and `fetched_at`.
#[derive(Debug, Clone)]
pub struct MentionDraft {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub url: String,
    pub source: Source,
    pub author: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub sentiment: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_round_trips_through_str() {
        for s in [Source::Rss, Source::Hn, Source::Mastodon, Source::Reddit] {
            assert_eq!(s.as_str().parse::<Source>(), Ok(s));
        }
        assert!("hackernews".parse::<Source>().is_err());
    }

    #[test]
    fn source_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Source::Hn).unwrap(), "\"hn\"");
    }
}
