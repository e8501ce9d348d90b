use std::cmp::max;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::constants::TIMESTAMP_FORMAT;

pub fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .without_time()
        .init();
}

/// Source of wall-clock time for request handling and cache stamping.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

pub fn clamp(value: f64, min_value: f64, max_value: f64) -> f64 {
    value.max(min_value).min(max_value)
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

pub fn parse_timestamp_utc(timestamp: &str) -> Option<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).ok()?;
    Some(DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc))
}

pub fn floor_timestamp(timestamp: DateTime<Utc>, step_seconds: i64) -> DateTime<Utc> {
    let step_ms = max(step_seconds, 1) * 1000;
    let floored_ms = timestamp.timestamp_millis().div_euclid(step_ms) * step_ms;
    DateTime::<Utc>::from_timestamp_millis(floored_ms).unwrap_or(timestamp)
}
