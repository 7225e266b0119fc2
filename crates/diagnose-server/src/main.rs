//! HTTP server entry point.
//!
//! Loads the model and column-schema artifacts, then serves predictions.
//! Either artifact failing to load aborts startup before the listener binds.

use std::sync::Arc;

use anyhow::{Context, Result};
use diagnose_config::{load_artifacts, Settings};
use diagnose_server::{router, AppContext};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .compact()
        .init();

    let settings = Settings::from_env().context("invalid settings")?;
    let artifacts = load_artifacts(&settings).context("failed to load model artifacts")?;
    let ctx = Arc::new(AppContext::from_artifacts(artifacts));

    let app = router(ctx);

    info!("Starting server on {}", settings.bind_addr);

    let listener = tokio::net::TcpListener::bind(settings.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
