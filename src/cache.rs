//! Single-slot response cache for the latest radar envelope.
//!
//! Freshness is judged against the caller's clock so a request sees one consistent
//! instant. Writers simply overwrite the slot; concurrent refreshes are last-writer-wins.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::types::RadarEnvelope;

#[derive(Clone, Debug)]
pub struct CacheEntry {
    pub payload: Arc<RadarEnvelope>,
    pub fetched_at: DateTime<Utc>,
}

pub struct RadarCache {
    slot: RwLock<Option<CacheEntry>>,
    ttl: Duration,
}

impl RadarCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: RwLock::new(None),
            ttl,
        }
    }

    /// Returns the cached payload if it was stored less than the TTL before `now`.
    pub async fn get_fresh(&self, now: DateTime<Utc>) -> Option<Arc<RadarEnvelope>> {
        let guard = self.slot.read().await;
        let entry = guard.as_ref()?;
        let age = now.signed_duration_since(entry.fetched_at);
        // A negative age means another request stored with a later clock reading.
        match age.to_std() {
            Ok(age) if age >= self.ttl => {
                debug!("Radar cache expired after {}s", age.as_secs());
                None
            }
            _ => {
                debug!("Radar cache hit");
                Some(entry.payload.clone())
            }
        }
    }

    pub async fn store(&self, payload: Arc<RadarEnvelope>, fetched_at: DateTime<Utc>) {
        let mut guard = self.slot.write().await;
        *guard = Some(CacheEntry {
            payload,
            fetched_at,
        });
    }

    pub async fn entry(&self) -> Option<CacheEntry> {
        self.slot.read().await.clone()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FeatureCollection;
    use chrono::TimeZone;

    fn envelope(timestamp: &str) -> Arc<RadarEnvelope> {
        Arc::new(RadarEnvelope::new(
            timestamp.to_string(),
            "https://example.test/file.grib2.gz".to_string(),
            FeatureCollection::simulated("20240601-120600", Vec::new()),
            "test",
        ))
    }

    fn at(seconds: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap() + chrono::Duration::seconds(seconds as i64)
    }

    #[tokio::test]
    async fn empty_cache_misses() {
        let cache = RadarCache::new(Duration::from_secs(120));
        assert!(cache.get_fresh(at(0)).await.is_none());
        assert!(cache.entry().await.is_none());
    }

    #[tokio::test]
    async fn hit_within_ttl_returns_same_payload() {
        let cache = RadarCache::new(Duration::from_secs(120));
        let payload = envelope("first");
        cache.store(payload.clone(), at(0)).await;

        let hit = cache.get_fresh(at(119)).await.unwrap();
        assert!(Arc::ptr_eq(&hit, &payload));
    }

    #[tokio::test]
    async fn entry_expires_at_exactly_ttl() {
        let cache = RadarCache::new(Duration::from_secs(120));
        cache.store(envelope("first"), at(0)).await;

        assert!(cache.get_fresh(at(120)).await.is_none());
        // Expiry does not evict; the stale entry stays until overwritten.
        assert_eq!(cache.entry().await.unwrap().fetched_at, at(0));
    }

    #[tokio::test]
    async fn store_overwrites_the_single_slot() {
        let cache = RadarCache::new(Duration::from_secs(120));
        cache.store(envelope("first"), at(0)).await;
        cache.store(envelope("second"), at(10)).await;

        let hit = cache.get_fresh(at(20)).await.unwrap();
        assert_eq!(hit.timestamp, "second");
        assert_eq!(cache.entry().await.unwrap().fetched_at, at(10));
    }

    #[tokio::test]
    async fn entry_stored_by_a_later_clock_counts_as_fresh() {
        let cache = RadarCache::new(Duration::from_secs(120));
        cache.store(envelope("first"), at(30)).await;
        assert!(cache.get_fresh(at(0)).await.is_some());
    }
}
