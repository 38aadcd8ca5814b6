// src/store.rs
// In-memory mention store. One mutex guards records, the dedup key set and
// the id counter, so check-and-insert is a single critical section and the
// (source, url) uniqueness invariant holds under concurrent ingestion.

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::config::{DEFAULT_QUERY_LIMIT, MAX_QUERY_LIMIT};
use crate::error::IngestError;
use crate::mention::{Mention, MentionDraft, Source};

#[derive(Debug, Default)]
struct Inner {
    mentions: Vec<Mention>,
    /// Dedup keys: (source, url).
    seen: HashSet<(Source, String)>,
    next_id: u64,
    last_fetched_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
pub struct MentionStore {
    inner: Mutex<Inner>,
}

/// Validated parameters for `MentionStore::query`.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    pub text: Option<String>,
    pub source: Option<Source>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl MentionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advisory pre-check; `insert` remains the authoritative gate.
    pub fn contains(&self, source: Source, url: &str) -> bool {
        let inner = self.inner.lock().expect("store mutex poisoned");
        inner.seen.contains(&(source, url.to_string()))
    }

    /// Insert-if-absent. Assigns the next id and a monotonic `fetched_at`,
    /// or rejects a `(source, url)` duplicate with `Conflict`.
    pub fn insert(&self, draft: MentionDraft) -> Result<u64, IngestError> {
        if draft.url.trim().is_empty() {
            return Err(IngestError::invalid("mention url must not be empty"));
        }

        let mut inner = self.inner.lock().expect("store mutex poisoned");

        let key = (draft.source, draft.url.clone());
        if !inner.seen.insert(key) {
            return Err(IngestError::Conflict(format!(
                "{} already stored for source {}",
                draft.url, draft.source
            )));
        }

        // fetched_at never moves backwards even if the wall clock does.
        let now = Utc::now();
        let fetched_at = match inner.last_fetched_at {
            Some(last) if last > now => last,
            _ => now,
        };
        inner.last_fetched_at = Some(fetched_at);

        inner.next_id += 1;
        let id = inner.next_id;

        inner.mentions.push(Mention {
            id,
            title: draft.title,
            summary: draft.summary,
            url: draft.url,
            source: draft.source,
            author: draft.author,
            published_at: draft.published_at,
            fetched_at,
            sentiment: draft.sentiment,
        });

        Ok(id)
    }

    /// Filtered, ordered, paginated read.
    ///
    /// Ordering is by recency (published_at, falling back to fetched_at)
    /// descending, ties broken by id descending.
    pub fn query(&self, params: &QueryParams) -> Result<Vec<Mention>, IngestError> {
        let limit = params.limit.unwrap_or(DEFAULT_QUERY_LIMIT);
        if limit <= 0 {
            return Err(IngestError::invalid(format!(
                "limit must be positive, got {limit}"
            )));
        }
        let limit = limit.min(MAX_QUERY_LIMIT) as usize;

        let offset = params.offset.unwrap_or(0);
        if offset < 0 {
            return Err(IngestError::invalid(format!(
                "offset must be non-negative, got {offset}"
            )));
        }
        let offset = offset as usize;

        let needle = params
            .text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase);

        let inner = self.inner.lock().expect("store mutex poisoned");

        let mut hits: Vec<Mention> = inner
            .mentions
            .iter()
            .filter(|m| params.source.map_or(true, |s| m.source == s))
            .filter(|m| match &needle {
                None => true,
                Some(n) => contains_ci(m.title.as_deref(), n) || contains_ci(m.summary.as_deref(), n),
            })
            .cloned()
            .collect();

        hits.sort_by(|a, b| b.recency().cmp(&a.recency()).then(b.id.cmp(&a.id)));

        Ok(hits.into_iter().skip(offset).take(limit).collect())
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("store mutex poisoned").mentions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn contains_ci(field: Option<&str>, needle_lower: &str) -> bool {
    field.is_some_and(|f| f.to_lowercase().contains(needle_lower))
}
