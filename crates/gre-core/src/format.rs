//! Number coercion and money formatting.

use serde_json::Value;

const CRORE: f64 = 10_000_000.0;
const LAKH: f64 = 100_000.0;

/// Coerces a loosely typed JSON value into a number.
///
/// `null`, unparseable strings and non-scalar values become `0`. Strings
/// are read like a lenient float parser: the longest numeric prefix wins,
/// so `"25 lakh"` is `25`.
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => parse_leading_float(s).unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Same as [`to_number`] for an optional field.
pub fn to_number_opt(value: Option<&Value>) -> f64 {
    value.map(to_number).unwrap_or(0.0)
}

fn parse_leading_float(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let candidate_len = trimmed
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        .map(|(i, c)| i + c.len_utf8())
        .last()?;

    (1..=candidate_len)
        .rev()
        .find_map(|len| trimmed[..len].parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

/// Compact rupee amount: `₹1.2Cr`, `₹25.0L`, or the grouped plain value.
pub fn format_budget(amount: f64) -> String {
    if amount >= CRORE {
        format!("₹{:.1}Cr", amount / CRORE)
    } else if amount >= LAKH {
        format!("₹{:.1}L", amount / LAKH)
    } else {
        format!("₹{}", group_western(amount))
    }
}

/// Full rupee amount with Indian digit grouping and no decimals.
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{}", rounded.abs() as u64);
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}₹{}", sign, group_indian(&digits))
}

/// Groups by thousands and keeps up to three fraction digits.
fn group_western(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.3}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((&fixed, ""));
    let frac = frac_part.trim_end_matches('0');

    let mut grouped = String::new();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if frac.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac)
    }
}

/// Last three digits, then groups of two: `1234567` -> `12,34,567`.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);

    let mut grouped = String::new();
    for (i, c) in head.chars().enumerate() {
        if i > 0 && (head.len() - i) % 2 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{},{}", grouped, tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_number_coercion() {
        assert_eq!(to_number(&json!(null)), 0.0);
        assert_eq!(to_number(&json!(1500)), 1500.0);
        assert_eq!(to_number(&json!("2500000")), 2_500_000.0);
        assert_eq!(to_number(&json!("  12.5abc")), 12.5);
        assert_eq!(to_number(&json!("abc")), 0.0);
        assert_eq!(to_number(&json!("")), 0.0);
        assert_eq!(to_number(&json!(["1"])), 0.0);
        assert_eq!(to_number_opt(None), 0.0);
    }

    #[test]
    fn test_format_budget_tiers() {
        assert_eq!(format_budget(to_number(&json!("2500000"))), "₹25.0L");
        assert_eq!(format_budget(12_000_000.0), "₹1.2Cr");
        assert_eq!(format_budget(100_000.0), "₹1.0L");
        assert_eq!(format_budget(99_999.0), "₹99,999");
        assert_eq!(format_budget(1234.5), "₹1,234.5");
        assert_eq!(format_budget(0.0), "₹0");
    }

    #[test]
    fn test_format_currency_indian_grouping() {
        assert_eq!(format_currency(1_234_567.0), "₹12,34,567");
        assert_eq!(format_currency(999.4), "₹999");
        assert_eq!(format_currency(100_000.0), "₹1,00,000");
        assert_eq!(format_currency(-2500.0), "-₹2,500");
    }
}
