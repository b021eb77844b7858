use super::ui;
use crate::core::rates::RateProvider;
use anyhow::Result;

pub async fn run(provider: &dyn RateProvider) -> Result<()> {
    let snapshot = super::load_rates(provider, true).await?;

    println!(
        "Refreshed {} rates at {}",
        ui::style_text(&snapshot.rates.len().to_string(), ui::StyleType::Value),
        ui::style_text(
            &snapshot.fetched_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            ui::StyleType::Label
        )
    );
    Ok(())
}
