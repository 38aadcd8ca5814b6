// src/ingest/providers/mastodon.rs
// Mastodon search against one instance's public v2 search endpoint.
// Status content arrives as HTML; the normalizer strips it.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::{DEFAULT_MASTO_LIMIT, MAX_CONNECTOR_LIMIT};
use crate::error::IngestError;
use crate::ingest::types::{Connector, RawItem, RawTimestamp};
use crate::mention::Source;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    statuses: Vec<Status>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct Status {
    id: String,
    url: Option<String>,
    content: Option<String>,
    created_at: Option<String>,
    account: Option<Account>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct Account {
    acct: Option<String>,
}

pub struct MastodonConnector {
    base: String,
    query: String,
    limit: u32,
    client: reqwest::Client,
}

impl MastodonConnector {
    pub fn new(
        client: reqwest::Client,
        instance: &str,
        query: &str,
        limit: Option<u32>,
    ) -> Result<Self, IngestError> {
        let base = instance_base(instance)?;
        let query = query.trim();
        if query.is_empty() {
            return Err(IngestError::invalid("query must not be empty"));
        }
        let limit = match limit {
            None => DEFAULT_MASTO_LIMIT,
            Some(0) => return Err(IngestError::invalid("limit must be positive")),
            Some(n) => n.min(MAX_CONNECTOR_LIMIT),
        };
        Ok(Self {
            base,
            query: query.to_string(),
            limit,
            client,
        })
    }
}

/// Normalize an instance host into a base URL: strip scheme and trailing
/// slashes, then prepend https. Hostnames are only checked for
/// well-formedness, not resolvability.
fn instance_base(instance: &str) -> Result<String, IngestError> {
    let mut host = instance.trim().trim_end_matches('/');
    for prefix in ["https://", "http://"] {
        if let Some(rest) = host.strip_prefix(prefix) {
            host = rest;
            break;
        }
    }
    if host.is_empty() {
        return Err(IngestError::invalid("instance must not be empty"));
    }
    if host.contains('/') || host.contains(char::is_whitespace) {
        return Err(IngestError::invalid(format!(
            "instance must be a bare hostname: {instance}"
        )));
    }
    Ok(format!("https://{host}"))
}

fn raw_from_status(base: &str, status: Status) -> RawItem {
    let acct = status.account.and_then(|a| a.acct);
    // Remote statuses sometimes lack a url; point at the local view then.
    let link = status.url.filter(|u| !u.trim().is_empty()).or_else(|| {
        acct.as_deref()
            .map(|a| format!("{base}/@{a}/{}", status.id))
    });
    RawItem {
        title: None,
        link,
        summary: status.content,
        author: acct,
        timestamp: status.created_at.map(RawTimestamp::Rfc3339),
    }
}

#[async_trait]
impl Connector for MastodonConnector {
    async fn fetch(&self) -> Result<Vec<RawItem>, IngestError> {
        let resp = self
            .client
            .get(format!("{}/api/v2/search", self.base))
            .query(&[
                ("q", self.query.as_str()),
                ("type", "statuses"),
                ("limit", &self.limit.to_string()),
            ])
            .send()
            .await?
            .error_for_status()
            .map_err(|e| IngestError::Fetch(e.to_string()))?;

        let data: SearchResponse = resp.json().await?;
        let base = self.base.clone();
        Ok(data
            .statuses
            .into_iter()
            .map(|s| raw_from_status(&base, s))
            .collect())
    }

    fn source(&self) -> Source {
        Source::Mastodon
    }
}
