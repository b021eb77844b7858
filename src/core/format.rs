//! Amount formatting and user input parsing

/// Groups the digits of `n` with `,` every three places.
pub fn format_integer(n: u64) -> String {
    group_digits(&n.to_string())
}

/// Rounds to the nearest integer and groups digits with `,` every three places.
///
/// Non-finite values format as `"0"`.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }

    let rounded = value.round();
    let magnitude = rounded.abs();
    let grouped = if magnitude < u64::MAX as f64 {
        format_integer(magnitude as u64)
    } else {
        group_digits(&format!("{magnitude:.0}"))
    };

    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Parses a user entered amount such as `"1,250"`.
///
/// Separators and surrounding whitespace are ignored and the leading run of
/// digits is taken, so `"12.75"` reads as `12`. Returns `None` when there are
/// no leading digits or the value does not fit in a `u64`.
pub fn try_parse_amount(input: &str) -> Option<u64> {
    let digits: String = input
        .trim()
        .chars()
        .filter(|c| *c != ',')
        .take_while(|c| c.is_ascii_digit())
        .collect();

    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Like [`try_parse_amount`] but falls back to 0.
pub fn parse_amount(input: &str) -> u64 {
    try_parse_amount(input).unwrap_or(0)
}
