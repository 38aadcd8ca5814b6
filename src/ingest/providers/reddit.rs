// src/ingest/providers/reddit.rs
// Reddit search via the public .json listing endpoint, sitewide or scoped
// to one subreddit. Only t3 (post) children are consumed.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::{DEFAULT_REDDIT_LIMIT, MAX_CONNECTOR_LIMIT};
use crate::error::IngestError;
use crate::ingest::types::{Connector, RawItem, RawTimestamp};
use crate::mention::Source;

const REDDIT_BASE: &str = "https://www.reddit.com";

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
    kind: String,
    data: Post,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct Post {
    title: Option<String>,
    selftext: Option<String>,
    permalink: Option<String>,
    author: Option<String>,
    created_utc: Option<f64>,
}

pub struct RedditConnector {
    query: String,
    subreddit: Option<String>,
    limit: u32,
    client: reqwest::Client,
}

impl RedditConnector {
    pub fn new(
        client: reqwest::Client,
        query: &str,
        subreddit: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Self, IngestError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(IngestError::invalid("query must not be empty"));
        }
        let subreddit = subreddit
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.trim_start_matches("r/").to_string());
        if let Some(sub) = &subreddit {
            if sub.contains('/') || sub.contains(char::is_whitespace) {
                return Err(IngestError::invalid(format!(
                    "subreddit must be a bare name: {sub}"
                )));
            }
        }
        let limit = match limit {
            None => DEFAULT_REDDIT_LIMIT,
            Some(0) => return Err(IngestError::invalid("limit must be positive")),
            Some(n) => n.min(MAX_CONNECTOR_LIMIT),
        };
        Ok(Self {
            query: query.to_string(),
            subreddit,
            limit,
            client,
        })
    }

    fn search_path(&self) -> String {
        match &self.subreddit {
            Some(sub) => format!("{REDDIT_BASE}/r/{sub}/search.json"),
            None => format!("{REDDIT_BASE}/search.json"),
        }
    }
}

fn raw_from_post(post: Post) -> RawItem {
    let link = post
        .permalink
        .filter(|p| !p.trim().is_empty())
        .map(|p| format!("{REDDIT_BASE}{p}"));
    RawItem {
        title: post.title,
        link,
        summary: post.selftext.filter(|s| !s.trim().is_empty()),
        author: post.author,
        timestamp: post
            .created_utc
            .map(|secs| RawTimestamp::UnixSeconds(secs as i64)),
    }
}

#[async_trait]
impl Connector for RedditConnector {
    async fn fetch(&self) -> Result<Vec<RawItem>, IngestError> {
        let restrict_sr = if self.subreddit.is_some() { "on" } else { "off" };
        let resp = self
            .client
            .get(self.search_path())
            .query(&[
                ("q", self.query.as_str()),
                ("limit", &self.limit.to_string()),
                ("sort", "new"),
                ("restrict_sr", restrict_sr),
            ])
            .send()
            .await?
            .error_for_status()
            .map_err(|e| IngestError::Fetch(e.to_string()))?;

        let listing: Listing = resp.json().await?;
        Ok(listing
            .data
            .children
            .into_iter()
            .filter(|c| c.kind == "t3")
            .map(|c| raw_from_post(c.data))
            .collect())
    }

    fn source(&self) -> Source {
        Source::Reddit
    }
}
