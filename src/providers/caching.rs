use crate::core::cache::RateCache;
use crate::core::rates::{RateError, RateProvider, RateSnapshot, RateSource};
use async_trait::async_trait;
use tracing::{debug, warn};

/// Serves rates from the persisted cache while it is fresh and falls back to
/// the wrapped source otherwise.
pub struct CachingRateProvider<S: RateSource> {
    source: S,
    cache: RateCache,
}

impl<S: RateSource> CachingRateProvider<S> {
    pub fn new(source: S, cache: RateCache) -> Self {
        Self { source, cache }
    }

    pub fn cache(&self) -> &RateCache {
        &self.cache
    }

    async fn fetch_and_store(&self) -> Result<RateSnapshot, RateError> {
        let rates = self.source.fetch_rates().await?;
        let snapshot = RateSnapshot::new(rates, self.cache.now());

        if let Err(e) = self.cache.write(&snapshot).await {
            warn!(error = %e, "Failed to persist exchange rates");
        }
        Ok(snapshot)
    }
}

#[async_trait]
impl<S: RateSource> RateProvider for CachingRateProvider<S> {
    async fn get_rates(&self) -> Result<RateSnapshot, RateError> {
        if let Some(cached) = self.cache.read_fresh().await {
            return Ok(cached);
        }
        debug!("Cache miss for exchange rates");
        self.fetch_and_store().await
    }

    async fn refresh(&self) -> Result<RateSnapshot, RateError> {
        debug!("Manual refresh of exchange rates");
        self.fetch_and_store().await
    }
}
