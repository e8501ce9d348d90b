use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::config::Config;
use crate::grib::decode_reflectivity_gzipped;
use crate::http_client::fetch_bytes;
use crate::synthetic;
use crate::types::{AppState, DataReference, FeatureCollection};

/// Turns a located MRMS file into a feature collection.
///
/// The decode attempt is optional and its failure is never surfaced: any error there
/// falls back to the simulator keyed on the reference timestamp. Only a simulator
/// error (a malformed timestamp) is returned to the caller.
pub async fn process_reference(
    state: &AppState,
    reference: &DataReference,
) -> Result<FeatureCollection> {
    if state.cfg.decode_enabled {
        match decode_reference(state, reference).await {
            Ok(collection) => return Ok(collection),
            Err(error) => {
                warn!(
                    "Falling back to simulation for {}: {error:#}",
                    reference.url
                );
            }
        }
    }

    simulate(&state.cfg, &reference.timestamp)
}

pub fn simulate(cfg: &Config, timestamp: &str) -> Result<FeatureCollection> {
    let mut rng = match cfg.simulation_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    synthetic::generate(timestamp, &mut rng)
}

async fn decode_reference(state: &AppState, reference: &DataReference) -> Result<FeatureCollection> {
    info!("Downloading MRMS GRIB2 data from {}", reference.url);
    let zipped = fetch_bytes(&state.http, &reference.url, state.cfg.fetch_timeout).await?;
    tokio::task::spawn_blocking(move || decode_reflectivity_gzipped(&zipped))
        .await
        .context("Join error while decoding GRIB")?
}
