// src/api.rs
// HTTP surface: the /mentions query endpoint and the four per-source
// ingest endpoints, plus /health. Parameter validation happens here and
// in connector constructors, always before any network call.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::config::AppConfig;
use crate::error::IngestError;
use crate::ingest::providers::{HnConnector, MastodonConnector, RedditConnector, RssConnector};
use crate::ingest::run_ingest;
use crate::mention::{Mention, Source};
use crate::sentiment::SentimentAnalyzer;
use crate::store::{MentionStore, QueryParams};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MentionStore>,
    pub analyzer: Arc<SentimentAnalyzer>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: Arc::new(MentionStore::new()),
            analyzer: Arc::new(SentimentAnalyzer::new()),
            http: config.http_client(),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/mentions", get(list_mentions))
        .route("/ingest/rss", post(ingest_rss))
        .route("/ingest/hn-search", post(ingest_hn_search))
        .route("/ingest/masto-search", post(ingest_masto_search))
        .route("/ingest/reddit/search", post(ingest_reddit_search))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

// ---- error mapping ----

struct ApiError(IngestError);

impl From<IngestError> for ApiError {
    fn from(e: IngestError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            IngestError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            IngestError::Fetch(_) | IngestError::Parse(_) => StatusCode::BAD_GATEWAY,
            // Conflicts are absorbed by the orchestrator; seeing one here
            // is a bug, report it as such.
            IngestError::Conflict(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

// ---- GET /mentions ----

#[derive(Debug, Deserialize)]
struct MentionsQuery {
    query: Option<String>,
    source: Option<String>,
    limit: Option<i64>,
    offset: Option<i64>,
}

/// Treat `""`, `"undefined"` and `"null"` as absent; UI clients send these
/// for unset filters.
fn client_param(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && s != "undefined" && s != "null")
}

async fn list_mentions(
    State(state): State<AppState>,
    Query(q): Query<MentionsQuery>,
) -> Result<Json<Vec<Mention>>, ApiError> {
    let source = match client_param(q.source) {
        None => None,
        Some(s) => Some(
            Source::from_str(&s)
                .map_err(|_| IngestError::invalid(format!("unknown source: {s}")))?,
        ),
    };

    let params = QueryParams {
        text: client_param(q.query),
        source,
        limit: q.limit,
        offset: q.offset,
    };
    let rows = state.store.query(&params)?;
    Ok(Json(rows))
}

// ---- ingest endpoints ----

#[derive(Debug, Deserialize)]
struct RssIngestRequest {
    url: String,
}

#[derive(Debug, Deserialize)]
struct HnSearchRequest {
    query: String,
    hits_per_page: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct MastoSearchRequest {
    instance: String,
    query: String,
    limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RedditSearchRequest {
    query: String,
    subreddit: Option<String>,
    limit: Option<u32>,
}

#[derive(Debug, Serialize)]
struct IngestResponse {
    status: &'static str,
    added: usize,
}

impl IngestResponse {
    fn ok(added: usize) -> Json<Self> {
        Json(Self {
            status: "ok",
            added,
        })
    }
}

async fn ingest_rss(
    State(state): State<AppState>,
    Json(body): Json<RssIngestRequest>,
) -> Result<Json<IngestResponse>, ApiError> {
    let connector = RssConnector::new(state.http.clone(), &body.url)?;
    let added = run_ingest(&state.store, &state.analyzer, &connector).await?;
    Ok(IngestResponse::ok(added))
}

async fn ingest_hn_search(
    State(state): State<AppState>,
    Json(body): Json<HnSearchRequest>,
) -> Result<Json<IngestResponse>, ApiError> {
    let connector = HnConnector::new(state.http.clone(), &body.query, body.hits_per_page)?;
    let added = run_ingest(&state.store, &state.analyzer, &connector).await?;
    Ok(IngestResponse::ok(added))
}

async fn ingest_masto_search(
    State(state): State<AppState>,
    Json(body): Json<MastoSearchRequest>,
) -> Result<Json<IngestResponse>, ApiError> {
    let connector = MastodonConnector::new(
        state.http.clone(),
        &body.instance,
        &body.query,
        body.limit,
    )?;
    let added = run_ingest(&state.store, &state.analyzer, &connector).await?;
    Ok(IngestResponse::ok(added))
}

async fn ingest_reddit_search(
    State(state): State<AppState>,
    Json(body): Json<RedditSearchRequest>,
) -> Result<Json<IngestResponse>, ApiError> {
    let connector = RedditConnector::new(
        state.http.clone(),
        &body.query,
        body.subreddit.as_deref(),
        body.limit,
    )?;
    let added = run_ingest(&state.store, &state.analyzer, &connector).await?;
    Ok(IngestResponse::ok(added))
}
