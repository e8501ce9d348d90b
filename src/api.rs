use std::sync::Arc;

use anyhow::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::constants::{
    COLLECTION_PRODUCT_NAME, COLLECTION_SOURCE, FALLBACK_DATA_URL, MINUTE_TIMESTAMP_FORMAT,
    NOTE_FALLBACK, NOTE_LOCATED, SERVICE_NAME,
};
use crate::discovery::locate_latest;
use crate::ingest::{process_reference, simulate};
use crate::types::{AppState, DataReference, ErrorEnvelope, RadarEnvelope};

#[derive(Debug, Serialize)]
pub(crate) struct HealthResponse {
    status: &'static str,
    service: &'static str,
    data_source: &'static str,
    update_interval: &'static str,
    cache_seconds: u64,
    last_refresh: Option<String>,
    timestamp: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct EndpointDirectory {
    health: &'static str,
    radar_data: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct IndexResponse {
    message: &'static str,
    product: &'static str,
    endpoints: EndpointDirectory,
    timestamp: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/healthz", get(healthz))
        .route("/api/radar/latest", get(radar_latest))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let last_refresh = state
        .cache
        .entry()
        .await
        .map(|entry| entry.fetched_at.to_rfc3339());

    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        data_source: COLLECTION_SOURCE,
        update_interval: "2 minutes",
        cache_seconds: state.cache.ttl().as_secs(),
        last_refresh,
        timestamp: state.clock.now().to_rfc3339(),
    })
}

pub async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "NOAA MRMS Weather Radar API",
        product: COLLECTION_PRODUCT_NAME,
        endpoints: EndpointDirectory {
            health: "/health",
            radar_data: "/api/radar/latest",
        },
        timestamp: Utc::now().to_rfc3339(),
    })
}

pub async fn radar_latest(State(state): State<AppState>) -> Response {
    let result = latest_payload(&state).await;
    payload_response(result, state.clock.now())
}

fn payload_response(result: Result<Arc<RadarEnvelope>>, now: DateTime<Utc>) -> Response {
    match result {
        Ok(payload) => (StatusCode::OK, Json(payload.as_ref())).into_response(),
        Err(error) => failure_response(&error, now),
    }
}

fn failure_response(error: &anyhow::Error, now: DateTime<Utc>) -> Response {
    error!("Radar request failed: {error:#}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorEnvelope {
            success: false,
            error: format!("{error:#}"),
            timestamp: now.to_rfc3339(),
        }),
    )
        .into_response()
}

/// Serves the cached envelope while it is fresh; otherwise locates the newest scan and
/// refreshes the cache from it.
pub async fn latest_payload(state: &AppState) -> Result<Arc<RadarEnvelope>> {
    let now = state.clock.now();
    if let Some(cached) = state.cache.get_fresh(now).await {
        return Ok(cached);
    }

    let reference = locate_latest(state, now).await;
    refresh(state, now, reference).await
}

/// Builds a new envelope for the request instant `now` and stores it stamped with the
/// time the build finished, so the TTL runs from when the data became available.
/// A failed build leaves the previous entry in place.
async fn refresh(
    state: &AppState,
    now: DateTime<Utc>,
    reference: Option<DataReference>,
) -> Result<Arc<RadarEnvelope>> {
    let payload = Arc::new(build_envelope(state, now, reference).await?);
    let fetched_at = state.clock.now();
    state.cache.store(payload.clone(), fetched_at).await;
    info!(
        "Refreshed radar cache with {} points from {} in {}ms",
        payload.data.metadata.count,
        payload.data_url,
        fetched_at.signed_duration_since(now).num_milliseconds()
    );
    Ok(payload)
}

async fn build_envelope(
    state: &AppState,
    now: DateTime<Utc>,
    reference: Option<DataReference>,
) -> Result<RadarEnvelope> {
    let timestamp = now.to_rfc3339();

    if let Some(reference) = reference {
        let data = process_reference(state, &reference).await?;
        return Ok(RadarEnvelope::new(timestamp, reference.url, data, NOTE_LOCATED));
    }

    info!("MRMS data unavailable on both mirrors, simulating current conditions");
    let scan_timestamp = now.format(MINUTE_TIMESTAMP_FORMAT).to_string();
    let data = simulate(&state.cfg, &scan_timestamp)?;
    Ok(RadarEnvelope::new(
        timestamp,
        FALLBACK_DATA_URL.to_string(),
        data,
        NOTE_FALLBACK,
    ))
}
