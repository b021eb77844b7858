//! Exchange rate snapshots and the provider abstractions around them

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

/// Maximum age of a cached snapshot before it has to be fetched again.
pub const STALENESS_WINDOW: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Error)]
pub enum RateError {
    #[error("Failed to fetch exchange rates from {url}: {reason}")]
    Fetch { url: String, reason: String },
    #[error("Unexpected exchange rate response from {url}: {reason}")]
    Parse { url: String, reason: String },
}

/// One fetched set of USD based exchange rates plus its fetch time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSnapshot {
    pub rates: BTreeMap<String, f64>,
    pub fetched_at: DateTime<Utc>,
}

impl RateSnapshot {
    pub fn new(rates: BTreeMap<String, f64>, fetched_at: DateTime<Utc>) -> Self {
        Self { rates, fetched_at }
    }

    /// Conversion factor from USD to `code`, if the snapshot carries one.
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    /// A snapshot is usable when it has at least one rate and every rate is
    /// a positive finite number.
    pub fn is_valid(&self) -> bool {
        !self.rates.is_empty() && self.rates.values().all(|r| r.is_finite() && *r > 0.0)
    }

    /// Age of the snapshot at `now`. `None` when `fetched_at` lies in the future.
    pub fn age_at(&self, now: DateTime<Utc>) -> Option<Duration> {
        (now - self.fetched_at).to_std().ok()
    }
}

/// Remote source of the latest USD rates.
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch_rates(&self) -> Result<BTreeMap<String, f64>, RateError>;
}

/// Hands out rate snapshots, deciding between the cached record and a fresh fetch.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Returns the cached snapshot while it is younger than the staleness
    /// window, otherwise fetches, persists and returns a new one.
    async fn get_rates(&self) -> Result<RateSnapshot, RateError>;

    /// Always fetches and persists a new snapshot.
    async fn refresh(&self) -> Result<RateSnapshot, RateError>;
}
