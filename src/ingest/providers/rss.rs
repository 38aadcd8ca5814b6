// src/ingest/providers/rss.rs
// Feed connector: fetches one feed document and yields every entry.
// Parses RSS 2.0 first, then retries the payload as Atom, since feeds in
// the wild use either shape under the same content types.

use async_trait::async_trait;
use quick_xml::de::from_str;
use serde::Deserialize;

use crate::error::IngestError;
use crate::ingest::types::{Connector, RawItem, RawTimestamp};
use crate::mention::Source;

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    description: Option<String>,
    author: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AtomFeed {
    #[serde(rename = "entry", default)]
    entries: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    title: Option<String>,
    #[serde(rename = "link", default)]
    links: Vec<AtomLink>,
    summary: Option<String>,
    author: Option<AtomAuthor>,
    updated: Option<String>,
    published: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AtomLink {
    #[serde(rename = "@href")]
    href: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AtomAuthor {
    name: Option<String>,
}

pub struct RssConnector {
    feed_url: String,
    client: reqwest::Client,
}

impl RssConnector {
    /// Validates the feed URL up front; no network happens here.
    pub fn new(client: reqwest::Client, feed_url: &str) -> Result<Self, IngestError> {
        let feed_url = feed_url.trim();
        if feed_url.is_empty() {
            return Err(IngestError::invalid("feed url must not be empty"));
        }
        if crate::ingest::normalize::absolute_url(Some(feed_url)).is_none() {
            return Err(IngestError::invalid(format!(
                "feed url must be absolute http(s): {feed_url}"
            )));
        }
        Ok(Self {
            feed_url: feed_url.to_string(),
            client,
        })
    }

    fn parse_feed(body: &str) -> Result<Vec<RawItem>, IngestError> {
        let xml = scrub_html_entities_for_xml(body);

        if let Ok(rss) = from_str::<Rss>(&xml) {
            return Ok(rss.channel.items.into_iter().map(raw_from_rss).collect());
        }
        match from_str::<AtomFeed>(&xml) {
            Ok(feed) => Ok(feed.entries.into_iter().map(raw_from_atom).collect()),
            Err(e) => Err(IngestError::Parse(format!("feed is neither RSS nor Atom: {e}"))),
        }
    }
}

fn raw_from_rss(it: Item) -> RawItem {
    RawItem {
        title: it.title,
        link: it.link,
        summary: it.description,
        author: it.author,
        timestamp: it.pub_date.map(RawTimestamp::Rfc2822),
    }
}

fn raw_from_atom(e: AtomEntry) -> RawItem {
    RawItem {
        title: e.title,
        link: e.links.into_iter().find_map(|l| l.href),
        summary: e.summary,
        author: e.author.and_then(|a| a.name),
        timestamp: e.published.or(e.updated).map(RawTimestamp::Rfc3339),
    }
}

#[async_trait]
impl Connector for RssConnector {
    async fn fetch(&self) -> Result<Vec<RawItem>, IngestError> {
        let resp = self
            .client
            .get(&self.feed_url)
            .header(
                "Accept",
                "application/rss+xml, application/atom+xml, application/xml;q=0.9, */*;q=0.8",
            )
            .send()
            .await?
            .error_for_status()
            .map_err(|e| IngestError::Fetch(e.to_string()))?;

        let body = resp.text().await?;
        Self::parse_feed(&body)
    }

    fn source(&self) -> Source {
        Source::Rss
    }
}

/// Feeds often embed HTML entities the XML parser rejects; replace the
/// usual offenders before deserializing.
fn scrub_html_entities_for_xml(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lsquo;", "'")
        .replace("&rsquo;", "'")
}
