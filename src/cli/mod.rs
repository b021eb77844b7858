pub mod convert;
pub mod export;
pub mod refresh;
pub mod setup;
pub mod ui;

use crate::core::rates::{RateProvider, RateSnapshot};
use anyhow::Result;
use tracing::error;

/// Loads rates behind a spinner. On failure the static error message is
/// shown and the error is handed back to the caller.
pub async fn load_rates(provider: &dyn RateProvider, force_refresh: bool) -> Result<RateSnapshot> {
    let spinner = ui::new_spinner("Fetching exchange rates...");
    let result = if force_refresh {
        provider.refresh().await
    } else {
        provider.get_rates().await
    };
    spinner.finish_and_clear();

    result.map_err(|e| {
        error!(error = %e, "Failed to load exchange rates");
        ui::print_rates_error();
        e.into()
    })
}
