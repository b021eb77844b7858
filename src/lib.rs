pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::core::cache::{KeyValueCollection, RateCache, Store};
use crate::core::clock::SystemClock;
use crate::core::config::AppConfig;
use crate::core::convert::SortOrder;
use crate::core::format::try_parse_amount;
use crate::providers::{CachingRateProvider, ExchangeRateApiProvider};
use crate::store::KeyValueStore;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Name of the store collection holding the rate record.
pub const RATES_COLLECTION: &str = "rates";

pub enum AppCommand {
    Convert {
        amount: String,
        order: SortOrder,
        columns: Option<usize>,
        refresh: bool,
    },
    Export {
        amount: String,
        order: SortOrder,
    },
    Refresh,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("usdfx starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider = build_rate_provider(&config)?;

    match command {
        AppCommand::Convert {
            amount,
            order,
            columns,
            refresh,
        } => {
            let amount = parse_amount_input(&amount);
            let columns = columns.unwrap_or(config.columns);
            cli::convert::run(&provider, amount, order, columns, refresh).await
        }
        AppCommand::Export { amount, order } => {
            cli::export::run(&provider, parse_amount_input(&amount), order).await
        }
        AppCommand::Refresh => cli::refresh::run(&provider).await,
    }
}

/// Wires the HTTP source, the persisted cache and the system clock together.
pub fn build_rate_provider(
    config: &AppConfig,
) -> Result<CachingRateProvider<ExchangeRateApiProvider>> {
    let collection = open_rate_collection(config)?;
    let cache = RateCache::new(collection, Arc::new(SystemClock))
        .with_staleness_window(config.staleness_window());
    let source = ExchangeRateApiProvider::new(config.rates_base_url());
    Ok(CachingRateProvider::new(source, cache))
}

/// Opens the on-disk rate collection, falling back to memory when the data
/// directory is unusable.
fn open_rate_collection(config: &AppConfig) -> Result<Arc<dyn KeyValueCollection>> {
    let disk_collection = config
        .default_data_path()
        .and_then(|path| KeyValueStore::open(&path))
        .map(|store| store.get_collection(RATES_COLLECTION, true, true));

    match disk_collection {
        Ok(Some(collection)) => return Ok(collection),
        Ok(None) => warn!("Could not open the on-disk rate collection"),
        Err(e) => warn!(error = %e, "Could not open the on-disk rate cache"),
    }

    warn!("Rates will only be cached for this run");
    KeyValueStore::in_memory()
        .get_collection(RATES_COLLECTION, false, true)
        .context("Failed to create an in-memory rate collection")
}

/// Parses the amount typed by the user. Unparseable input counts as 0.
pub fn parse_amount_input(input: &str) -> u64 {
    try_parse_amount(input).unwrap_or_else(|| {
        warn!(input, "Amount is not a number, using 0");
        0
    })
}
