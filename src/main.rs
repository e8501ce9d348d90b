mod api;
mod cache;
mod config;
mod constants;
mod discovery;
mod grib;
mod http_client;
mod ingest;
mod intensity;
mod synthetic;
mod types;
mod utils;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::info;

use crate::api::router;
use crate::cache::RadarCache;
use crate::config::Config;
use crate::types::AppState;
use crate::utils::{init_tracing, SystemClock};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cfg = Arc::new(Config::from_env()?);

    // Per-request timeouts are set on each probe and fetch.
    let http = Client::builder()
        .user_agent("mrms-radar-api/1.0")
        .build()
        .context("Failed to build reqwest client")?;

    let state = AppState {
        cfg: cfg.clone(),
        http,
        cache: Arc::new(RadarCache::new(cfg.cache_duration)),
        clock: Arc::new(SystemClock),
    };

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&cfg.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", cfg.listen_addr))?;

    info!(
        "MRMS radar API listening on {} (product {}, cache {}s, decode {})",
        cfg.listen_addr,
        cfg.product,
        cfg.cache_duration.as_secs(),
        if cfg.decode_enabled { "on" } else { "off" }
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
            sigterm.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
