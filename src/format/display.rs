//! Compact read-only formatters for dashboards and listing overlays

use super::{to_fixed, trim_fraction_zeros, whole_amount};

fn sign_prefix(amount: f64) -> &'static str {
    if amount < 0.0 {
        "-$"
    } else {
        "$"
    }
}

/// Currency with K/M notation ("$2.5M", "$125K", "$950")
///
/// `monthly` shows the whole amount with thousands separators instead, for
/// payment-sized figures.
pub fn format_currency(amount: f64, monthly: bool) -> String {
    if !amount.is_finite() {
        return "N/A".to_string();
    }

    let prefix = sign_prefix(amount);
    let abs_amount = amount.abs();

    if monthly {
        return format!("{}{}", prefix, whole_amount(abs_amount));
    }

    if abs_amount >= 1_000_000.0 {
        let millions = to_fixed(abs_amount / 1_000_000.0, 3);
        format!("{}{}M", prefix, trim_fraction_zeros(&millions))
    } else if abs_amount >= 1_000.0 {
        let thousands = to_fixed(abs_amount / 1_000.0, 3);
        format!("{}{}K", prefix, trim_fraction_zeros(&thousands))
    } else {
        format!("{}{}", prefix, whole_amount(abs_amount))
    }
}

/// Price with fixed precision: one decimal in millions, none in thousands
pub fn format_price_value(amount: f64) -> String {
    if !amount.is_finite() {
        return "N/A".to_string();
    }

    let prefix = sign_prefix(amount);
    let abs_amount = amount.abs();

    if abs_amount >= 1_000_000.0 {
        format!("{}{}M", prefix, to_fixed(abs_amount / 1_000_000.0, 1))
    } else if abs_amount >= 1_000.0 {
        format!("{}{}K", prefix, to_fixed(abs_amount / 1_000.0, 0))
    } else {
        format!("{}{}", prefix, whole_amount(abs_amount))
    }
}

/// Percent-scale value (7.5 means 7.5%), truncated to two decimals
pub fn format_percentage(percent: f64) -> String {
    if !percent.is_finite() {
        return "N/A".to_string();
    }

    let text = percent.to_string();
    match text.split_once('.') {
        None => format!("{}%", text),
        Some((int_part, dec_part)) => {
            let truncated = &dec_part[..dec_part.len().min(2)];
            let cleaned = truncated.trim_end_matches('0');
            if cleaned.is_empty() {
                format!("{}%", int_part)
            } else {
                format!("{}.{}%", int_part, cleaned)
            }
        }
    }
}
