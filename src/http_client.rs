use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::{Client, StatusCode};

/// HEAD probe. `Ok` only for a 200; everything else is reported as an error.
pub async fn probe_exists(http: &Client, url: &str, timeout: Duration) -> Result<()> {
    let response = http
        .head(url)
        .timeout(timeout)
        .send()
        .await
        .with_context(|| format!("Probe failed for {url}"))?;

    if response.status() != StatusCode::OK {
        bail!("Probe returned {} for {url}", response.status());
    }
    Ok(())
}

pub async fn fetch_bytes(http: &Client, url: &str, timeout: Duration) -> Result<Vec<u8>> {
    let response = http
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .with_context(|| format!("Request failed for {url}"))?;

    if !response.status().is_success() {
        bail!("Request failed ({}) for {url}", response.status());
    }

    let bytes = response
        .bytes()
        .await
        .with_context(|| format!("Failed to read body for {url}"))?;
    Ok(bytes.to_vec())
}
