use crate::core::convert::{self, SortOrder};
use crate::core::rates::{RateProvider, RateSnapshot};
use anyhow::Result;

/// Prints the conversion list as plain `"<Country> - <CODE>: <amount>"`
/// lines, ready to be piped into a clipboard tool.
pub async fn run(provider: &dyn RateProvider, amount: u64, order: SortOrder) -> Result<()> {
    let snapshot = super::load_rates(provider, false).await?;
    println!("{}", export_text(&snapshot, amount, order));
    Ok(())
}

pub fn export_text(snapshot: &RateSnapshot, amount: u64, order: SortOrder) -> String {
    let mut amounts = convert::convert_all(snapshot, amount);
    convert::sort_amounts(&mut amounts, order);
    convert::clipboard_text(&amounts)
}
