//! Price formatting for the ticker header.
//!
//! Mirrors en-US currency display: `$` prefix, comma thousands separators,
//! exactly two decimals.

use crate::Price;

/// Formats `value` as US dollars, e.g. `$1,234.56` or `-$0.42`.
///
/// Any negative value keeps its sign, even when it rounds to `-$0.00`.
#[must_use]
pub fn format_usd(value: Price) -> String {
    let cents = to_cents(value);
    let sign = if value.is_sign_negative() { "-" } else { "" };
    format!("{sign}${}", dollars(cents.unsigned_abs()))
}

/// Formats a price change with an explicit sign, e.g. `+$1.23` or `-$1.23`.
///
/// A change that rounds to zero cents carries no sign.
#[must_use]
pub fn format_signed_usd(value: Price) -> String {
    let cents = to_cents(value);
    let sign = match cents.signum() {
        1 => "+",
        -1 => "-",
        _ => "",
    };
    format!("{sign}${}", dollars(cents.unsigned_abs()))
}

/// Magnitude of `change` relative to the price before it, in percent.
///
/// `current - change` is the previous price; a zero base yields `0`.
#[must_use]
pub fn change_percent(current: Price, change: Price) -> f64 {
    let base = current - change;
    if base == 0.0 {
        return 0.0;
    }

    (change / base * 100.0).abs()
}

/// Percentage with two decimals, e.g. `0.12`. Ties round away from zero.
#[must_use]
pub fn format_percent(percent: f64) -> String {
    let rounded = (percent * 100.0).round() / 100.0;
    format!("{rounded:.2}")
}

#[allow(clippy::cast_possible_truncation)]
fn to_cents(value: Price) -> i64 {
    (value * 100.0).round() as i64
}

fn dollars(cents: u64) -> String {
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);

    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{grouped}.{:02}", cents % 100)
}
