//! Display formatters for computed values and helpers for numeric input fields
//!
//! The calculation modules return raw numbers; everything that turns them into
//! text with currency symbols, K/M suffixes or percent signs lives here.

mod display;
mod input;

pub use display::{format_currency, format_percentage, format_price_value};
pub use input::{extract_numeric_value, format_input_display, parse_numeric_input, InputKind};

/// Round half away from zero at `decimals` places
fn round_half_away(value: f64, decimals: usize) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Fixed-point rendering with ties rounded away from zero
fn to_fixed(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, round_half_away(value, decimals))
}

/// Drop trailing fractional zeros, and the point itself if nothing remains
fn trim_fraction_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Add thousands separators to an unsigned number string
fn add_thousands_separator(s: &str) -> String {
    let (integer_part, decimal_part) = match s.split_once('.') {
        Some((int, dec)) => (int, Some(dec)),
        None => (s, None),
    };

    let digits: Vec<char> = integer_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    match decimal_part {
        Some(dec) if !dec.is_empty() => format!("{}.{}", grouped, dec),
        _ => grouped,
    }
}

/// Whole-number amount with separators; sign handled by the caller
fn whole_amount(abs_amount: f64) -> String {
    add_thousands_separator(&to_fixed(abs_amount, 0))
}
