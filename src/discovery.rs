use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use crate::constants::{
    CANDIDATE_OFFSETS_MINUTES, MINUTE_TIMESTAMP_FORMAT, MRMS_BASE_LEVEL_TAG, MRMS_FILE_SUFFIX,
    SCAN_STEP_SECONDS,
};
use crate::http_client::probe_exists;
use crate::types::{AppState, DataReference};
use crate::utils::floor_timestamp;

/// Scan timestamps to try, newest first, starting at the 2-minute boundary at or before `now`.
pub fn candidate_timestamps(now: DateTime<Utc>) -> Vec<String> {
    let anchor = floor_timestamp(now, SCAN_STEP_SECONDS);
    CANDIDATE_OFFSETS_MINUTES
        .iter()
        .map(|offset| {
            (anchor + Duration::minutes(*offset))
                .format(MINUTE_TIMESTAMP_FORMAT)
                .to_string()
        })
        .collect()
}

pub fn primary_url(base_url: &str, product: &str, timestamp: &str) -> String {
    format!("{base_url}/{product}/{timestamp}.{MRMS_FILE_SUFFIX}")
}

/// The secondary mirror keeps a flat directory with the level tag in the file name.
pub fn secondary_url(base_url: &str, product: &str, timestamp: &str) -> Option<String> {
    let (date_part, time_part) = timestamp.split_once('-')?;
    let hour_minute = time_part.get(0..4)?;
    Some(format!(
        "{base_url}/{product}_{MRMS_BASE_LEVEL_TAG}_{date_part}-{hour_minute}00.{MRMS_FILE_SUFFIX}"
    ))
}

/// Walks the candidate window on the primary mirror, then on the secondary one, and
/// returns the first file that answers a probe with 200.
pub async fn locate_latest(state: &AppState, now: DateTime<Utc>) -> Option<DataReference> {
    let cfg = &state.cfg;
    let timestamps = candidate_timestamps(now);

    for timestamp in &timestamps {
        let url = primary_url(&cfg.primary_base_url, &cfg.product, timestamp);
        if let Some(reference) = probe_candidate(state, url, timestamp).await {
            info!("Found MRMS data on primary mirror: {}", reference.url);
            return Some(reference);
        }
    }

    for timestamp in &timestamps {
        let Some(url) = secondary_url(&cfg.secondary_base_url, &cfg.product, timestamp) else {
            continue;
        };
        if let Some(reference) = probe_candidate(state, url, timestamp).await {
            info!("Found MRMS data on secondary mirror: {}", reference.url);
            return Some(reference);
        }
    }

    info!(
        "No MRMS file found on either mirror between {} and {}",
        timestamps.last().map(String::as_str).unwrap_or_default(),
        timestamps.first().map(String::as_str).unwrap_or_default()
    );
    None
}

async fn probe_candidate(state: &AppState, url: String, timestamp: &str) -> Option<DataReference> {
    match probe_exists(&state.http, &url, state.cfg.probe_timeout).await {
        Ok(()) => Some(DataReference {
            url,
            timestamp: timestamp.to_string(),
        }),
        Err(error) => {
            debug!("MRMS candidate unavailable: {error:#}");
            None
        }
    }
}
