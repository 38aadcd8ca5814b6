//! Social Listening API — Binary Entrypoint
//! Boots the Axum HTTP server, wiring routes, shared state, and middleware.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use social_listening::api::{create_router, AppState};
use social_listening::config::AppConfig;
use social_listening::metrics::Metrics;

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("social_listening=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();

    init_tracing();

    let config = AppConfig::from_env();
    let metrics = Metrics::init();

    let state = AppState::new(&config);
    let router = create_router(state).merge(metrics.router());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, router).await?;

    Ok(())
}
