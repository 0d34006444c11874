//! Number formatting for conversion results
//!
//! Decimal style: `,` thousands grouping, at most N fractional digits,
//! trailing zeros dropped.

use crate::units::Unit;

/// Largest number of fractional digits an f64 can meaningfully show
pub const MAX_DECIMAL_PLACES: usize = 17;

/// Format a number with grouping and at most `decimal_places` fractional digits
///
/// Examples:
/// - `format_number(100000.0, 2)` -> "100,000"
/// - `format_number(1234.5678, 2)` -> "1,234.57"
/// - `format_number(2.5, 0)` -> "2" (ties round to even)
///
/// `decimal_places` is capped at [`MAX_DECIMAL_PLACES`].
pub fn format_number(value: f64, decimal_places: usize) -> String {
    let decimal_places = decimal_places.min(MAX_DECIMAL_PLACES);

    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let rounded = round_to(value.abs(), decimal_places);
    let fixed = format!("{:.*}", decimal_places, rounded);

    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac)) => (int_part, frac.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    let is_zero = int_part.chars().all(|c| c == '0') && frac_part.is_empty();
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Format a value followed by the unit label, e.g. "100 Watts"
pub fn format_quantity(value: f64, unit: Unit, decimal_places: usize) -> String {
    format!("{} {}", format_number(value, decimal_places), unit.display_name())
}

/// Round ties to even at the given number of fractional digits
fn round_to(value: f64, decimal_places: usize) -> f64 {
    // Beyond ~15 digits the scaling itself loses precision
    if decimal_places > 15 {
        return value;
    }
    let factor = 10f64.powi(decimal_places as i32);
    let scaled = (value * factor).round_ties_even() / factor;
    if scaled.is_finite() {
        scaled
    } else {
        value
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
