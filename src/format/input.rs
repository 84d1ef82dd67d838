//! Input-field rendering and parsing

use super::{add_thousands_separator, round_half_away};
use serde::{Deserialize, Serialize};

/// Kind of value an input field holds, selecting its affix and precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Currency,
    Percent,
    Years,
    Months,
    Number,
}

/// Separated rendering with between `min_fraction` and `max_fraction` decimals
fn format_grouped(value: f64, min_fraction: usize, max_fraction: usize) -> String {
    let rounded = round_half_away(value, max_fraction);
    let negative = rounded < 0.0;
    let fixed = format!("{:.*}", max_fraction, rounded.abs());

    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let mut frac = frac_part.trim_end_matches('0');
    if frac.len() < min_fraction {
        frac = &frac_part[..min_fraction.min(frac_part.len())];
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&add_thousands_separator(int_part));
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Render a committed field value ("$1,234.50", "7.5%", "7 yrs.", "12 mos.")
///
/// Non-finite values render as 0.
pub fn format_input_display(value: f64, kind: InputKind) -> String {
    let num = if value.is_finite() { value } else { 0.0 };
    let has_decimals = num.fract() != 0.0;

    match kind {
        InputKind::Currency => {
            let min = if has_decimals { 2 } else { 0 };
            let body = format_grouped(num, min, 2);
            match body.strip_prefix('-') {
                Some(abs) => format!("-${}", abs),
                None => format!("${}", body),
            }
        }
        InputKind::Percent => {
            let min = match (has_decimals, num.abs() >= 0.1) {
                (true, true) => 1,
                (true, false) => 3,
                _ => 0,
            };
            let max = if num.abs() < 1.0 { 3 } else { 2 };
            format!("{}%", format_grouped(num, min, max))
        }
        InputKind::Years => {
            let min = if has_decimals { 1 } else { 0 };
            format!("{} yrs.", format_grouped(num, min, 1))
        }
        InputKind::Months => format!("{} mos.", format_grouped(num, 0, 0)),
        InputKind::Number => {
            let min = if has_decimals { 2 } else { 0 };
            format_grouped(num, min, 2)
        }
    }
}

/// Longest leading decimal literal after optional whitespace and sign
fn parse_leading_number(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'-') | Some(b'+')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'-') | Some(b'+')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

fn zero_if_unusable(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v != 0.0 => v,
        _ => 0.0,
    }
}

/// Number typed into a field: everything except digits, '.' and '-' is dropped
/// and the longest numeric prefix is read; 0 when nothing parses
pub fn parse_numeric_input(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    zero_if_unusable(parse_leading_number(&cleaned))
}

/// Number from a rendered field value, removing the kind's affix and separators
pub fn extract_numeric_value(text: &str, kind: InputKind) -> f64 {
    let mut cleaned = text.trim();

    cleaned = match kind {
        InputKind::Currency => cleaned.strip_prefix('$').unwrap_or(cleaned),
        InputKind::Percent => cleaned.strip_suffix('%').unwrap_or(cleaned),
        InputKind::Years => cleaned.strip_suffix("yrs.").unwrap_or(cleaned),
        InputKind::Months => cleaned.strip_suffix("mos.").unwrap_or(cleaned),
        InputKind::Number => cleaned,
    }
    .trim();

    let without_commas = cleaned.replace(',', "");
    zero_if_unusable(parse_leading_number(&without_commas))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_currency() {
        assert_eq!(format_input_display(1_234.5, InputKind::Currency), "$1,234.50");
        assert_eq!(format_input_display(1_234.0, InputKind::Currency), "$1,234");
        assert_eq!(format_input_display(-1_234.5, InputKind::Currency), "-$1,234.50");
        assert_eq!(format_input_display(500_000.0, InputKind::Currency), "$500,000");
    }

    #[test]
    fn test_display_percent() {
        assert_eq!(format_input_display(7.5, InputKind::Percent), "7.5%");
        assert_eq!(format_input_display(7.0, InputKind::Percent), "7%");
        assert_eq!(format_input_display(7.125, InputKind::Percent), "7.13%");
        assert_eq!(format_input_display(0.25, InputKind::Percent), "0.25%");
        assert_eq!(format_input_display(0.05, InputKind::Percent), "0.050%");
    }

    #[test]
    fn test_display_terms() {
        assert_eq!(format_input_display(7.5, InputKind::Years), "7.5 yrs.");
        assert_eq!(format_input_display(30.0, InputKind::Years), "30 yrs.");
        assert_eq!(format_input_display(12.0, InputKind::Months), "12 mos.");
        assert_eq!(format_input_display(12.6, InputKind::Months), "13 mos.");
    }

    #[test]
    fn test_display_number() {
        assert_eq!(format_input_display(1_234.0, InputKind::Number), "1,234");
        assert_eq!(format_input_display(1_234.567, InputKind::Number), "1,234.57");
        assert_eq!(format_input_display(f64::NAN, InputKind::Number), "0");
    }

    #[test]
    fn test_parse_numeric_input() {
        assert_eq!(parse_numeric_input("$1,234.56"), 1_234.56);
        assert_eq!(parse_numeric_input("7.5%"), 7.5);
        assert_eq!(parse_numeric_input("-500"), -500.0);
        assert_eq!(parse_numeric_input("1.2.3"), 1.2);
        assert_eq!(parse_numeric_input("12-34"), 12.0);
        assert_eq!(parse_numeric_input(".5"), 0.5);
        assert_eq!(parse_numeric_input("abc"), 0.0);
        assert_eq!(parse_numeric_input(""), 0.0);
        assert_eq!(parse_numeric_input("-"), 0.0);
    }

    #[test]
    fn test_extract_numeric_value() {
        assert_eq!(extract_numeric_value("$ 1,234.50", InputKind::Currency), 1_234.5);
        assert_eq!(extract_numeric_value("7.5 %", InputKind::Percent), 7.5);
        assert_eq!(extract_numeric_value("30 yrs.", InputKind::Years), 30.0);
        assert_eq!(extract_numeric_value("12 mos.", InputKind::Months), 12.0);
        assert_eq!(extract_numeric_value("1,234", InputKind::Number), 1_234.0);
        assert_eq!(extract_numeric_value("", InputKind::Currency), 0.0);
        assert_eq!(extract_numeric_value("N/A", InputKind::Currency), 0.0);
    }

    #[test]
    fn test_display_then_extract() {
        let shown = format_input_display(1_234.5, InputKind::Currency);
        assert_eq!(extract_numeric_value(&shown, InputKind::Currency), 1_234.5);
        let shown = format_input_display(7.5, InputKind::Years);
        assert_eq!(extract_numeric_value(&shown, InputKind::Years), 7.5);
    }
}
