// src/ingest/mod.rs
pub mod normalize;
pub mod providers;
pub mod types;

use metrics::{counter, describe_counter, describe_gauge, gauge};
use once_cell::sync::OnceCell;

use crate::error::IngestError;
use crate::ingest::types::Connector;
use crate::sentiment::SentimentAnalyzer;
use crate::store::MentionStore;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("ingest_items_total", "Raw items returned by connectors.");
        describe_counter!("ingest_added_total", "Mentions newly inserted.");
        describe_counter!(
            "ingest_skipped_total",
            "Items rejected during normalization (no absolute url)."
        );
        describe_counter!(
            "ingest_duplicate_total",
            "Items already present under their (source, url) key."
        );
        describe_counter!(
            "ingest_provider_errors_total",
            "Connector fetch/parse errors."
        );
        describe_gauge!("ingest_store_size", "Mentions currently stored.");
    });
}

/// Drive one ingestion request: fetch → normalize → score → dedup →
/// insert. A connector failure aborts the whole request; a failure on one
/// item only skips that item. Returns the count of newly inserted
/// mentions.
pub async fn run_ingest(
    store: &MentionStore,
    analyzer: &SentimentAnalyzer,
    connector: &dyn Connector,
) -> Result<usize, IngestError> {
    ensure_metrics_described();

    let source = connector.source();
    let raw_items = match connector.fetch().await {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(source = %source, error = %e, "connector error");
            counter!("ingest_provider_errors_total").increment(1);
            return Err(e);
        }
    };
    counter!("ingest_items_total").increment(raw_items.len() as u64);

    let mut added = 0usize;
    for raw in &raw_items {
        let mut draft = match normalize::normalize(source, raw) {
            Some(d) => d,
            None => {
                counter!("ingest_skipped_total").increment(1);
                continue;
            }
        };

        // Dedup pre-check; insert stays the authoritative gate.
        if store.contains(source, &draft.url) {
            counter!("ingest_duplicate_total").increment(1);
            continue;
        }

        draft.sentiment = analyzer.score(&score_input(&draft.title, &draft.summary));

        match store.insert(draft) {
            Ok(_) => added += 1,
            Err(IngestError::Conflict(_)) => {
                counter!("ingest_duplicate_total").increment(1);
            }
            Err(e) => return Err(e),
        }
    }

    counter!("ingest_added_total").increment(added as u64);
    gauge!("ingest_store_size").set(store.len() as f64);
    tracing::info!(source = %source, fetched = raw_items.len(), added, "ingest finished");

    Ok(added)
}

/// Sentiment input is whatever of title/summary is present, joined.
fn score_input(title: &Option<String>, summary: &Option<String>) -> String {
    match (title.as_deref(), summary.as_deref()) {
        (Some(t), Some(s)) => format!("{t} {s}"),
        (Some(t), None) => t.to_string(),
        (None, Some(s)) => s.to_string(),
        (None, None) => String::new(),
    }
}
