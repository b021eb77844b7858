use super::ui;
use crate::core::convert::{self, ConvertedAmount, SortOrder};
use crate::core::format::format_integer;
use crate::core::rates::{RateProvider, RateSnapshot};
use anyhow::Result;
use comfy_table::{Cell, Table};

pub async fn run(
    provider: &dyn RateProvider,
    amount: u64,
    order: SortOrder,
    columns: usize,
    force_refresh: bool,
) -> Result<()> {
    let snapshot = super::load_rates(provider, force_refresh).await?;

    let mut amounts = convert::convert_all(&snapshot, amount);
    convert::sort_amounts(&mut amounts, order);

    println!("{}", render(&snapshot, amount, &amounts, columns));
    Ok(())
}

/// Renders the converted amounts as a table of `columns` currency/amount pairs.
pub fn render(
    snapshot: &RateSnapshot,
    amount: u64,
    amounts: &[ConvertedAmount],
    columns: usize,
) -> String {
    let mut output = format!(
        "{} {}\n\n",
        ui::style_text("Converting", ui::StyleType::Label),
        ui::style_text(
            &format!("${} USD", format_integer(amount)),
            ui::StyleType::Title
        )
    );

    if amounts.is_empty() {
        output.push_str(&ui::style_text(
            "No supported currencies in the current rates.",
            ui::StyleType::Error,
        ));
    } else {
        output.push_str(&amounts_table(amounts, columns).to_string());
    }

    output.push_str(&format!(
        "\n\n{}",
        ui::style_text(
            &format!(
                "Rates fetched at {}",
                snapshot.fetched_at.format("%Y-%m-%d %H:%M UTC")
            ),
            ui::StyleType::Subtle
        )
    ));
    output
}

fn amounts_table(amounts: &[ConvertedAmount], columns: usize) -> Table {
    let chunks = convert::chunk_columns(amounts, columns);
    let rows = chunks.first().map_or(0, |c| c.len());

    let mut table = ui::new_styled_table();
    table.set_header(
        chunks
            .iter()
            .flat_map(|_| [ui::header_cell("Currency"), ui::header_cell("Amount")])
            .collect::<Vec<_>>(),
    );

    for row in 0..rows {
        let cells: Vec<Cell> = chunks
            .iter()
            .flat_map(|chunk| match chunk.get(row) {
                Some(converted) => [
                    Cell::new(converted.label()),
                    ui::amount_cell(&converted.formatted_amount()),
                ],
                None => [Cell::new(""), Cell::new("")],
            })
            .collect();
        table.add_row(cells);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::convert::SortKey;
    use chrono::{TimeZone, Utc};

    fn snapshot() -> RateSnapshot {
        let rates = [("USD", 1.0), ("EUR", 0.92), ("JPY", 149.5), ("GBP", 0.79)]
            .into_iter()
            .map(|(c, r)| (c.to_string(), r))
            .collect();
        RateSnapshot::new(rates, Utc.with_ymd_and_hms(2024, 5, 10, 8, 30, 0).unwrap())
    }

    #[test]
    fn test_render_columns() {
        console::set_colors_enabled(false);
        let snapshot = snapshot();
        let mut amounts = convert::convert_all(&snapshot, 1000);
        convert::sort_amounts(&mut amounts, SortOrder::new(SortKey::Code, false));

        let output = render(&snapshot, 1000, &amounts, 2);

        assert!(output.starts_with("Converting $1,000 USD"));
        assert!(output.contains("European Union - EUR"));
        assert!(output.contains("149,500"));
        assert!(output.ends_with("Rates fetched at 2024-05-10 08:30 UTC"));

        // Two column groups: EUR/GBP on the left, JPY/USD on the right
        let eur_line = output
            .lines()
            .find(|l| l.contains("European Union - EUR"))
            .unwrap();
        assert!(eur_line.contains("Japan - JPY"));
        assert_eq!(output.matches("Currency").count(), 2);
    }

    #[test]
    fn test_render_pads_short_last_column() {
        console::set_colors_enabled(false);
        let snapshot = snapshot();
        let mut amounts = convert::convert_all(&snapshot, 10);
        convert::sort_amounts(&mut amounts, SortOrder::new(SortKey::Code, false));
        amounts.truncate(3);

        let output = render(&snapshot, 10, &amounts, 2);
        assert_eq!(output.matches("Currency").count(), 2);
        let gbp_line = output
            .lines()
            .find(|l| l.contains("United Kingdom - GBP"))
            .unwrap();
        assert!(!gbp_line.contains("JPY"));
    }

    #[test]
    fn test_render_uses_only_needed_columns() {
        console::set_colors_enabled(false);
        let snapshot = snapshot();
        let amounts = convert::convert_all(&snapshot, 10);

        // Four currencies fill two rows, so a third column is never needed
        let output = render(&snapshot, 10, &amounts, 3);
        assert_eq!(output.matches("Currency").count(), 2);
        assert!(output.contains("United States - USD"));
    }

    #[test]
    fn test_render_keeps_large_amount_exact() {
        console::set_colors_enabled(false);
        let output = render(&snapshot(), 9_007_199_254_740_993, &[], 3);
        assert!(output.starts_with("Converting $9,007,199,254,740,993 USD"));
    }

    #[test]
    fn test_render_without_rates() {
        console::set_colors_enabled(false);
        let output = render(&snapshot(), 5, &[], 3);
        assert!(output.contains("Converting $5 USD"));
        assert!(!output.contains("Currency"));
        assert!(output.contains("No supported currencies"));
    }
}
