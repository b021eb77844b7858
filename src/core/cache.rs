//! Key-value collections and the persisted exchange rate record

use super::clock::Clock;
use super::rates::{RateSnapshot, STALENESS_WINDOW};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::DateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Storage key of the single persisted rate record.
pub const RATES_KEY: &[u8] = b"exchange_rates";

#[async_trait]
pub trait KeyValueCollection: Send + Sync {
    async fn get(&self, key: &[u8]) -> Option<Vec<u8>>;
    async fn put(&self, key: &[u8], value: &[u8]) -> Result<()>;
}

pub trait Store: Send + Sync {
    fn get_collection(
        &self,
        name: &str,
        persist: bool,
        create_if_missing: bool,
    ) -> Option<Arc<dyn KeyValueCollection>>;
}

/// On-disk shape of the rate record: `{ "rates": {...}, "timestamp": <ms> }`.
#[derive(Debug, Serialize, Deserialize)]
struct CacheRecord {
    rates: BTreeMap<String, f64>,
    timestamp: i64,
}

impl From<&RateSnapshot> for CacheRecord {
    fn from(snapshot: &RateSnapshot) -> Self {
        Self {
            rates: snapshot.rates.clone(),
            timestamp: snapshot.fetched_at.timestamp_millis(),
        }
    }
}

impl TryFrom<CacheRecord> for RateSnapshot {
    type Error = anyhow::Error;

    fn try_from(record: CacheRecord) -> Result<Self> {
        let fetched_at = DateTime::from_timestamp_millis(record.timestamp)
            .with_context(|| format!("Invalid cache timestamp: {}", record.timestamp))?;
        Ok(RateSnapshot::new(record.rates, fetched_at))
    }
}

/// Owns the single persisted rate record and decides whether it is still fresh.
pub struct RateCache {
    collection: Arc<dyn KeyValueCollection>,
    clock: Arc<dyn Clock>,
    staleness_window: Duration,
}

impl RateCache {
    pub fn new(collection: Arc<dyn KeyValueCollection>, clock: Arc<dyn Clock>) -> Self {
        Self {
            collection,
            clock,
            staleness_window: STALENESS_WINDOW,
        }
    }

    pub fn with_staleness_window(mut self, window: Duration) -> Self {
        self.staleness_window = window;
        self
    }

    pub fn staleness_window(&self) -> Duration {
        self.staleness_window
    }

    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    /// Reads the persisted record regardless of its age. Undecodable records
    /// count as absent.
    pub async fn read(&self) -> Option<RateSnapshot> {
        let bytes = self.collection.get(RATES_KEY).await?;
        let decoded = serde_json::from_slice::<CacheRecord>(&bytes)
            .map_err(anyhow::Error::from)
            .and_then(RateSnapshot::try_from);

        match decoded {
            Ok(snapshot) if snapshot.is_valid() => Some(snapshot),
            Ok(_) => {
                warn!("Ignoring cached rate record with no usable rates");
                None
            }
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable cached rate record");
                None
            }
        }
    }

    /// Fresh while `now - fetched_at < staleness window`.
    pub fn is_fresh(&self, snapshot: &RateSnapshot) -> bool {
        match snapshot.age_at(self.clock.now()) {
            Some(age) => age < self.staleness_window,
            None => true,
        }
    }

    /// Reads the persisted record if it is still within the staleness window.
    pub async fn read_fresh(&self) -> Option<RateSnapshot> {
        let snapshot = self.read().await?;
        if self.is_fresh(&snapshot) {
            debug!(fetched_at = %snapshot.fetched_at, "Cache HIT for exchange rates");
            Some(snapshot)
        } else {
            debug!(fetched_at = %snapshot.fetched_at, "Cached exchange rates are stale");
            None
        }
    }

    /// Overwrites the persisted record.
    pub async fn write(&self, snapshot: &RateSnapshot) -> Result<()> {
        let bytes = serde_json::to_vec(&CacheRecord::from(snapshot))
            .context("Failed to serialize rate record")?;
        self.collection.put(RATES_KEY, &bytes).await?;
        debug!(fetched_at = %snapshot.fetched_at, "Cache PUT for exchange rates");
        Ok(())
    }
}
