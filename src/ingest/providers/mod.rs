// src/ingest/providers/mod.rs
pub mod hn;
pub mod mastodon;
pub mod reddit;
pub mod rss;

pub use hn::HnConnector;
pub use mastodon::MastodonConnector;
pub use reddit::RedditConnector;
pub use rss::RssConnector;
