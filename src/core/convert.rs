//! Converting a USD amount across the currency table

use super::currency::CURRENCIES;
use super::format::format_amount;
use super::rates::RateSnapshot;
use std::cmp::Ordering;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedAmount {
    pub code: String,
    pub country: String,
    pub rate: f64,
    pub amount: f64,
}

impl ConvertedAmount {
    /// `"<Country> - <CODE>"`
    pub fn label(&self) -> String {
        format!("{} - {}", self.country, self.code)
    }

    pub fn formatted_amount(&self) -> String {
        format_amount(self.amount)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Country,
    Code,
    Amount,
}

impl Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SortKey::Country => "country",
                SortKey::Code => "code",
                SortKey::Amount => "amount",
            }
        )
    }
}

impl FromStr for SortKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "country" => Ok(SortKey::Country),
            "code" => Ok(SortKey::Code),
            "amount" => Ok(SortKey::Amount),
            _ => Err(anyhow::anyhow!("Invalid sort key: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortOrder {
    pub key: SortKey,
    pub descending: bool,
}

impl SortOrder {
    pub fn new(key: SortKey, descending: bool) -> Self {
        Self { key, descending }
    }

    fn compare(&self, a: &ConvertedAmount, b: &ConvertedAmount) -> Ordering {
        let ordering = match self.key {
            SortKey::Country => a.country.cmp(&b.country),
            SortKey::Code => a.code.cmp(&b.code),
            SortKey::Amount => a.amount.total_cmp(&b.amount),
        }
        .then_with(|| a.code.cmp(&b.code));

        if self.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

/// Converts `amount` USD into every tabled currency the snapshot has a rate for.
pub fn convert_all(snapshot: &RateSnapshot, amount: u64) -> Vec<ConvertedAmount> {
    CURRENCIES
        .iter()
        .filter_map(|(code, country)| {
            snapshot.rate(code).map(|rate| ConvertedAmount {
                code: code.to_string(),
                country: country.to_string(),
                rate,
                amount: amount as f64 * rate,
            })
        })
        .collect()
}

pub fn sort_amounts(amounts: &mut [ConvertedAmount], order: SortOrder) {
    amounts.sort_by(|a, b| order.compare(a, b));
}

/// Splits `items` into `columns` consecutive chunks so that reading the
/// chunks left to right keeps the sort order top to bottom.
pub fn chunk_columns<T>(items: &[T], columns: usize) -> Vec<&[T]> {
    if items.is_empty() {
        return Vec::new();
    }
    let columns = columns.max(1);
    let rows = items.len().div_ceil(columns);
    items.chunks(rows).collect()
}

/// Newline joined `"<Country> - <CODE>: <amount>"` lines.
pub fn clipboard_text(amounts: &[ConvertedAmount]) -> String {
    amounts
        .iter()
        .map(|a| format!("{}: {}", a.label(), a.formatted_amount()))
        .collect::<Vec<_>>()
        .join("\n")
}
