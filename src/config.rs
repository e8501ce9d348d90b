use std::time::Duration;

use anyhow::{bail, Context, Result};
use tracing::warn;

use crate::constants::{
    DEFAULT_CACHE_SECONDS, DEFAULT_FETCH_TIMEOUT_SECONDS, DEFAULT_LISTEN_ADDR,
    DEFAULT_PROBE_TIMEOUT_SECONDS, MAX_FETCH_TIMEOUT_SECONDS, MAX_PROBE_TIMEOUT_SECONDS,
    MIN_TIMEOUT_SECONDS, MRMS_BUCKET_URL, MRMS_NCEP_CONUS_URL, MRMS_PRODUCT,
};

#[derive(Clone, Debug)]
pub struct Config {
    pub listen_addr: String,
    pub primary_base_url: String,
    pub secondary_base_url: String,
    pub product: String,
    pub probe_timeout: Duration,
    pub fetch_timeout: Duration,
    pub cache_duration: Duration,
    pub decode_enabled: bool,
    pub simulation_seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let listen_addr = env_string("RADAR_LISTEN_ADDR", DEFAULT_LISTEN_ADDR);
        let primary_base_url =
            trim_base_url(&env_string("RADAR_PRIMARY_BASE_URL", MRMS_BUCKET_URL));
        let secondary_base_url =
            trim_base_url(&env_string("RADAR_SECONDARY_BASE_URL", MRMS_NCEP_CONUS_URL));
        let product = env_string("RADAR_PRODUCT", MRMS_PRODUCT);
        let probe_timeout = Duration::from_secs(bounded(
            "RADAR_PROBE_TIMEOUT_SECONDS",
            env_u64("RADAR_PROBE_TIMEOUT_SECONDS", DEFAULT_PROBE_TIMEOUT_SECONDS)?,
            MAX_PROBE_TIMEOUT_SECONDS,
        ));
        let fetch_timeout = Duration::from_secs(bounded(
            "RADAR_FETCH_TIMEOUT_SECONDS",
            env_u64("RADAR_FETCH_TIMEOUT_SECONDS", DEFAULT_FETCH_TIMEOUT_SECONDS)?,
            MAX_FETCH_TIMEOUT_SECONDS,
        ));
        let cache_duration =
            Duration::from_secs(env_u64("RADAR_CACHE_SECONDS", DEFAULT_CACHE_SECONDS)?);
        let decode_enabled = env_bool("RADAR_DECODE_ENABLED", false)?;
        let simulation_seed = env_optional("RADAR_SIMULATION_SEED")
            .map(|value| {
                value
                    .parse::<u64>()
                    .with_context(|| format!("Failed to parse RADAR_SIMULATION_SEED={value} as u64"))
            })
            .transpose()?;

        Ok(Self {
            listen_addr,
            primary_base_url,
            secondary_base_url,
            product,
            probe_timeout,
            fetch_timeout,
            cache_duration,
            decode_enabled,
            simulation_seed,
        })
    }
}

fn bounded(name: &str, value: u64, max_value: u64) -> u64 {
    if value < MIN_TIMEOUT_SECONDS {
        warn!("{name}={value} is below the {MIN_TIMEOUT_SECONDS}s floor; using {MIN_TIMEOUT_SECONDS}");
        return MIN_TIMEOUT_SECONDS;
    }
    if value > max_value {
        warn!("{name}={value} exceeds the {max_value}s ceiling; using {max_value}");
        return max_value;
    }
    value
}

fn trim_base_url(value: &str) -> String {
    value.trim().trim_end_matches('/').to_string()
}

fn env_optional(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn env_string(name: &str, default: &str) -> String {
    env_optional(name).unwrap_or_else(|| default.to_string())
}

fn env_u64(name: &str, default: u64) -> Result<u64> {
    match env_optional(name) {
        Some(value) => value
            .parse::<u64>()
            .with_context(|| format!("Failed to parse {}={} as u64", name, value)),
        None => Ok(default),
    }
}

fn env_bool(name: &str, default: bool) -> Result<bool> {
    match env_optional(name) {
        Some(value) => parse_bool(&value).with_context(|| format!("Failed to parse {name}")),
        None => Ok(default),
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean, got {other:?}"),
    }
}
