// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod config;
pub mod error;
pub mod ingest;
pub mod mention;
pub mod metrics;
pub mod sentiment;
pub mod store;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::error::IngestError;
pub use crate::mention::{Mention, MentionDraft, Source};
pub use crate::store::{MentionStore, QueryParams};
