// src/ingest/normalize.rs
// Normalization boundary between connector output and the canonical
// Mention shape: text cleanup, the absolute-URL gate, and per-source
// timestamp parsing.

use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::OnceCell;
use time::format_description::well_known::Rfc2822;
use time::OffsetDateTime;
use url::Url;

use crate::ingest::types::{RawItem, RawTimestamp};
use crate::mention::{MentionDraft, Source};

/// Map a raw item to a mention draft (without sentiment). Returns `None`
/// when the item has no resolvable absolute URL; that is a data-quality
/// rejection, not a pipeline failure.
pub fn normalize(source: Source, raw: &RawItem) -> Option<MentionDraft> {
    let url = match absolute_url(raw.link.as_deref()) {
        Some(u) => u,
        None => {
            tracing::debug!(source = %source, link = ?raw.link, "rejecting item without absolute url");
            return None;
        }
    };

    let title = clean_field(raw.title.as_deref());
    let summary = clean_field(raw.summary.as_deref());
    let author = trim_field(raw.author.as_deref());
    let published_at = raw.timestamp.as_ref().and_then(parse_timestamp);

    Some(MentionDraft {
        title,
        summary,
        url,
        source,
        author,
        published_at,
        sentiment: None,
    })
}

/// Strip HTML to plain text: entity decode, drop tags, collapse whitespace.
pub fn strip_html(s: &str) -> String {
    let decoded = html_escape::decode_html_entities(s).to_string();

    static RE_TAGS: OnceCell<regex::Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    let out = re_tags.replace_all(&decoded, " ").to_string();

    static RE_WS: OnceCell<regex::Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    re_ws.replace_all(&out, " ").trim().to_string()
}

/// Trim + strip markup; empty results map to absent, never to "".
fn clean_field(s: Option<&str>) -> Option<String> {
    let cleaned = strip_html(s?);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

fn trim_field(s: Option<&str>) -> Option<String> {
    let t = s?.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}

/// Accept only absolute http(s) URLs; anything else is rejected upstream.
pub fn absolute_url(link: Option<&str>) -> Option<String> {
    let raw = link?.trim();
    let parsed = Url::parse(raw).ok()?;
    match parsed.scheme() {
        "http" | "https" => Some(parsed.to_string()),
        _ => None,
    }
}

/// Parse a source-native timestamp into a canonical UTC instant. Parse
/// failure degrades to `None` rather than failing the item.
pub fn parse_timestamp(ts: &RawTimestamp) -> Option<DateTime<Utc>> {
    match ts {
        RawTimestamp::Rfc2822(s) => OffsetDateTime::parse(s.trim(), &Rfc2822)
            .ok()
            .and_then(|dt| Utc.timestamp_opt(dt.unix_timestamp(), 0).single()),
        RawTimestamp::Rfc3339(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        RawTimestamp::UnixSeconds(secs) => Utc.timestamp_opt(*secs, 0).single(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_entities() {
        let s = "<p>Hello&nbsp;<b>world</b> &amp; friends</p>";
        assert_eq!(strip_html(s), "Hello world & friends");
    }

    #[test]
    fn relative_and_missing_urls_are_rejected() {
        assert_eq!(absolute_url(None), None);
        assert_eq!(absolute_url(Some("/r/rust/comments/abc")), None);
        assert_eq!(absolute_url(Some("ftp://example.com/x")), None);
        assert!(absolute_url(Some("https://example.com/x")).is_some());
    }

    #[test]
    fn rejects_item_without_url() {
        let raw = RawItem {
            title: Some("no link".into()),
            ..Default::default()
        };
        assert!(normalize(Source::Rss, &raw).is_none());
    }

    #[test]
    fn empty_fields_become_absent() {
        let raw = RawItem {
            title: Some("  <i></i>  ".into()),
            link: Some("https://example.com/a".into()),
            summary: Some("".into()),
            author: Some("   ".into()),
            timestamp: None,
        };
        let draft = normalize(Source::Hn, &raw).unwrap();
        assert_eq!(draft.title, None);
        assert_eq!(draft.summary, None);
        assert_eq!(draft.author, None);
    }

    #[test]
    fn parses_all_three_timestamp_formats() {
        let rfc2822 = RawTimestamp::Rfc2822("Tue, 12 Aug 2025 15:04:05 +0000".into());
        let rfc3339 = RawTimestamp::Rfc3339("2025-08-12T15:04:05.000Z".into());
        let unix = RawTimestamp::UnixSeconds(1_755_011_045);

        let a = parse_timestamp(&rfc2822).unwrap();
        let b = parse_timestamp(&rfc3339).unwrap();
        assert_eq!(a, b);
        assert!(parse_timestamp(&unix).is_some());
    }

    #[test]
    fn bad_timestamp_degrades_to_absent() {
        let raw = RawItem {
            link: Some("https://example.com/a".into()),
            timestamp: Some(RawTimestamp::Rfc2822("not a date".into())),
            ..Default::default()
        };
        let draft = normalize(Source::Rss, &raw).unwrap();
        assert_eq!(draft.published_at, None);
    }
}
