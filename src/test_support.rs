//! In-process stand-ins for the MRMS mirrors.

use std::collections::HashSet;
use std::io::Write;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use chrono::{DateTime, Utc};
use flate2::write::GzEncoder;
use flate2::Compression;
use reqwest::Client;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

use crate::cache::RadarCache;
use crate::config::Config;
use crate::types::AppState;
use crate::utils::{Clock, SystemClock};

pub const UNREACHABLE_BASE_URL: &str = "http://127.0.0.1:1";

struct MirrorState {
    available: HashSet<String>,
    body: Vec<u8>,
    delay: Duration,
    requests: Mutex<Vec<String>>,
}

pub struct MockMirror {
    base_url: String,
    state: Arc<MirrorState>,
}

impl MockMirror {
    pub async fn spawn(paths: &[&str]) -> Self {
        Self::spawn_with_body(paths, b"mock mirror payload".to_vec()).await
    }

    pub async fn spawn_with_body(paths: &[&str], body: Vec<u8>) -> Self {
        Self::start(paths, body, Duration::ZERO).await
    }

    /// A mirror that stalls every request by `delay` before answering.
    pub async fn spawn_slow(paths: &[&str], delay: Duration) -> Self {
        Self::start(paths, b"mock mirror payload".to_vec(), delay).await
    }

    async fn start(paths: &[&str], body: Vec<u8>, delay: Duration) -> Self {
        let state = Arc::new(MirrorState {
            available: paths.iter().map(|path| path.to_string()).collect(),
            body,
            delay,
            requests: Mutex::new(Vec::new()),
        });
        let app = Router::new().fallback(serve).with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock mirror");
        let addr = listener.local_addr().expect("mock mirror address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub fn body(&self) -> Vec<u8> {
        self.state.body.clone()
    }

    /// Requests seen so far, as `"METHOD /path"`.
    pub async fn requests(&self) -> Vec<String> {
        self.state.requests.lock().await.clone()
    }
}

async fn serve(State(state): State<Arc<MirrorState>>, method: Method, uri: Uri) -> Response {
    let path = uri.path().to_string();
    state.requests.lock().await.push(format!("{method} {path}"));
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    if !state.available.contains(&path) {
        return StatusCode::NOT_FOUND.into_response();
    }
    if method == Method::HEAD {
        return StatusCode::OK.into_response();
    }
    (StatusCode::OK, state.body.clone()).into_response()
}

pub fn test_config(primary_base_url: &str, secondary_base_url: &str) -> Config {
    Config {
        listen_addr: "127.0.0.1:0".to_string(),
        primary_base_url: primary_base_url.to_string(),
        secondary_base_url: secondary_base_url.to_string(),
        product: "MRMS_ReflectivityAtLowestAltitude".to_string(),
        probe_timeout: Duration::from_secs(2),
        fetch_timeout: Duration::from_secs(5),
        cache_duration: Duration::from_secs(120),
        decode_enabled: false,
        simulation_seed: Some(42),
    }
}

/// A clock that only moves when a test sets it.
pub struct ManualClock {
    now: StdMutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: StdMutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().expect("manual clock lock") = now;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("manual clock lock")
    }
}

pub fn test_state(cfg: Config) -> AppState {
    test_state_with_clock(cfg, Arc::new(SystemClock))
}

pub fn test_state_with_clock(cfg: Config, clock: Arc<dyn Clock>) -> AppState {
    let cache = Arc::new(RadarCache::new(cfg.cache_duration));
    AppState {
        cfg: Arc::new(cfg),
        http: Client::new(),
        cache,
        clock,
    }
}

pub fn gzip(bytes: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes).expect("gzip fixture");
    encoder.finish().expect("gzip fixture")
}

pub fn grib_fixture() -> Vec<u8> {
    let mut payload = b"GRIB\0\0\0\x02".to_vec();
    payload.extend_from_slice(&[0_u8; 24]);
    gzip(&payload)
}
