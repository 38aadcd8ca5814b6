// src/ingest/providers/hn.rs
// Hacker News search via the Algolia API. One request per ingest; hits
// without an outbound url fall back to the HN item page.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::{DEFAULT_HN_HITS, MAX_CONNECTOR_LIMIT};
use crate::error::IngestError;
use crate::ingest::types::{Connector, RawItem, RawTimestamp};
use crate::mention::Source;

const ALGOLIA_API: &str = "https://hn.algolia.com/api/v1/search";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct Hit {
    #[serde(rename = "objectID")]
    object_id: String,
    title: Option<String>,
    story_title: Option<String>,
    url: Option<String>,
    story_text: Option<String>,
    comment_text: Option<String>,
    author: Option<String>,
    created_at_i: Option<i64>,
}

pub struct HnConnector {
    query: String,
    hits_per_page: u32,
    client: reqwest::Client,
}

impl HnConnector {
    pub fn new(
        client: reqwest::Client,
        query: &str,
        hits_per_page: Option<u32>,
    ) -> Result<Self, IngestError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(IngestError::invalid("query must not be empty"));
        }
        let hits_per_page = match hits_per_page {
            None => DEFAULT_HN_HITS,
            Some(0) => return Err(IngestError::invalid("hits_per_page must be positive")),
            Some(n) => n.min(MAX_CONNECTOR_LIMIT),
        };
        Ok(Self {
            query: query.to_string(),
            hits_per_page,
            client,
        })
    }
}

fn raw_from_hit(hit: Hit) -> RawItem {
    let link = hit.url.filter(|u| !u.trim().is_empty()).unwrap_or_else(|| {
        format!("https://news.ycombinator.com/item?id={}", hit.object_id)
    });
    RawItem {
        title: hit.title.or(hit.story_title),
        link: Some(link),
        summary: hit.comment_text.or(hit.story_text),
        author: hit.author,
        timestamp: hit.created_at_i.map(RawTimestamp::UnixSeconds),
    }
}

#[async_trait]
impl Connector for HnConnector {
    async fn fetch(&self) -> Result<Vec<RawItem>, IngestError> {
        let resp = self
            .client
            .get(ALGOLIA_API)
            .query(&[
                ("query", self.query.as_str()),
                ("tags", "(story,comment)"),
                ("hitsPerPage", &self.hits_per_page.to_string()),
            ])
            .send()
            .await?
            .error_for_status()
            .map_err(|e| IngestError::Fetch(e.to_string()))?;

        let data: SearchResponse = resp.json().await?;
        Ok(data.hits.into_iter().map(raw_from_hit).collect())
    }

    fn source(&self) -> Source {
        Source::Hn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_without_url_links_to_hn_item() {
        let hit = Hit {
            object_id: "12345".into(),
            comment_text: Some("some comment".into()),
            author: Some("pg".into()),
            created_at_i: Some(1_700_000_000),
            ..Default::default()
        };
        let raw = raw_from_hit(hit);
        assert_eq!(
            raw.link.as_deref(),
            Some("https://news.ycombinator.com/item?id=12345")
        );
        assert_eq!(raw.summary.as_deref(), Some("some comment"));
    }

    #[test]
    fn title_falls_back_to_story_title() {
        let hit = Hit {
            object_id: "1".into(),
            story_title: Some("Show HN: thing".into()),
            ..Default::default()
        };
        assert_eq!(raw_from_hit(hit).title.as_deref(), Some("Show HN: thing"));
    }

    #[test]
    fn validates_query_and_cap() {
        let client = reqwest::Client::new();
        assert!(HnConnector::new(client.clone(), "  ", None).is_err());
        assert!(HnConnector::new(client.clone(), "rust", Some(0)).is_err());
        let c = HnConnector::new(client, "rust", Some(500)).unwrap();
        assert_eq!(c.hits_per_page, MAX_CONNECTOR_LIMIT);
    }

    #[test]
    fn deserializes_algolia_shape() {
        let body = r#"{"hits":[{"objectID":"9","title":"T","url":"https://x.example/","author":"a","created_at_i":1700000000}]}"#;
        let resp: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.hits.len(), 1);
        assert_eq!(resp.hits[0].object_id, "9");
    }
}
