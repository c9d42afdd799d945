//! Parsing boundary between the untyped sheet feed and [`Transaction`]
//!
//! Nothing in here fails: every unparsable cell degrades to a default value so
//! a single bad row can never abort a reconcile pass.

use bigdecimal::{BigDecimal, Zero};
use serde_json::Value;
use std::str::FromStr;

use crate::config::ReconcilerConfig;
use crate::types::*;

/// Text content of a cell, or `None` for missing/null/structured values
pub fn value_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Parse a money cell such as `"Rs. 1,250.00"`; anything unparsable is zero
pub fn parse_money(value: Option<&Value>) -> BigDecimal {
    match value {
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => BigDecimal::from(i),
            None => BigDecimal::from_str(&n.to_string()).unwrap_or_else(|_| BigDecimal::zero()),
        },
        Some(Value::String(s)) => parse_money_text(s),
        _ => BigDecimal::zero(),
    }
}

/// Strip everything but digits, `.` and `-`, then read the leading decimal.
///
/// A `.` only counts as a decimal point when a digit follows it and it does not
/// close an abbreviation (`Rs.`).
pub fn parse_money_text(text: &str) -> BigDecimal {
    let chars: Vec<char> = text.chars().collect();
    let mut cleaned = String::with_capacity(chars.len());

    for (i, c) in chars.iter().enumerate() {
        match c {
            '0'..='9' | '-' => cleaned.push(*c),
            '.' => {
                let next_is_digit = chars.get(i + 1).is_some_and(|n| n.is_ascii_digit());
                let after_letter = i > 0 && chars[i - 1].is_alphabetic();
                if next_is_digit && !after_letter {
                    cleaned.push('.');
                }
            }
            _ => {}
        }
    }

    leading_decimal(&cleaned).unwrap_or_else(BigDecimal::zero)
}

/// Longest `-?digits(.digits)?` prefix, the way a lenient float parser reads it
fn leading_decimal(s: &str) -> Option<BigDecimal> {
    let bytes = s.as_bytes();
    let mut pos = 0;

    let negative = bytes.first() == Some(&b'-');
    if negative {
        pos = 1;
    }

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_digits = &s[int_start..pos];

    let mut frac_digits = "";
    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        frac_digits = &s[frac_start..frac_end];
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    let mut literal = String::new();
    if negative {
        literal.push('-');
    }
    literal.push_str(if int_digits.is_empty() { "0" } else { int_digits });
    if !frac_digits.is_empty() {
        literal.push('.');
        literal.push_str(frac_digits);
    }

    BigDecimal::from_str(&literal).ok()
}

/// Keep both columns non-negative; a negative amount moves to the other column
pub fn split_columns(debit: BigDecimal, credit: BigDecimal) -> (BigDecimal, BigDecimal) {
    let zero = BigDecimal::zero();
    let mut debit_column = BigDecimal::zero();
    let mut credit_column = BigDecimal::zero();

    if debit < zero {
        credit_column += debit.abs();
    } else {
        debit_column += debit;
    }

    if credit < zero {
        debit_column += credit.abs();
    } else {
        credit_column += credit;
    }

    (debit_column, credit_column)
}

/// Numeric-adjacent text (`item`, `rate`, `weightQty`): trimmed, sentinel or missing becomes ""
pub fn clean_text(value: Option<&Value>, config: &ReconcilerConfig) -> String {
    let text = value_text(value).unwrap_or_default();
    let trimmed = text.trim();
    if config.is_sentinel(trimmed) {
        String::new()
    } else {
        trimmed.to_string()
    }
}

/// Display text: missing or blank becomes the placeholder, a sentinel becomes ""
pub fn display_text(value: Option<&Value>, config: &ReconcilerConfig) -> String {
    let text = value_text(value).unwrap_or_default();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        config.display_placeholder.clone()
    } else if config.is_sentinel(trimmed) {
        String::new()
    } else {
        trimmed.to_string()
    }
}

/// Serial number from the sheet, or the 1-based position when unusable
pub fn parse_sn(value: Option<&Value>, index: usize) -> u32 {
    let parsed = match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .or_else(|| n.as_f64().and_then(truncate_serial)),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            trimmed
                .parse::<u32>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().and_then(truncate_serial))
        }
        _ => None,
    };

    parsed
        .filter(|sn| *sn > 0)
        .unwrap_or_else(|| u32::try_from(index + 1).unwrap_or(u32::MAX))
}

fn truncate_serial(value: f64) -> Option<u32> {
    if value.is_finite() && value >= 1.0 && value <= f64::from(u32::MAX) {
        Some(value.trunc() as u32)
    } else {
        None
    }
}

/// Coerce one surviving row into a [`Transaction`] with an empty running balance
pub fn normalize_row(
    row: &RawTransactionRow,
    index: usize,
    config: &ReconcilerConfig,
) -> Transaction {
    let (debit, credit) = split_columns(
        parse_money(row.debit.as_ref()),
        parse_money(row.credit.as_ref()),
    );

    let transaction_type = display_text(row.transaction_type.as_ref(), config);
    let transaction_type = config.canonical_transaction_type(&transaction_type).to_string();

    Transaction {
        sn: parse_sn(row.sn.as_ref(), index),
        date: value_text(row.date.as_ref())
            .map(|d| d.trim().to_string())
            .unwrap_or_default(),
        description: value_text(row.description.as_ref())
            .map(|d| d.trim().to_string())
            .unwrap_or_default(),
        item: clean_text(row.item.as_ref(), config),
        weight_qty: clean_text(row.weight_qty.as_ref(), config),
        rate: clean_text(row.rate.as_ref(), config),
        transaction_type,
        payment_method: display_text(row.payment_method.as_ref(), config),
        bank_name: display_text(row.bank_name.as_ref(), config),
        cheque_no: display_text(row.cheque_no.as_ref(), config),
        debit,
        credit,
        balance: parse_money(row.balance.as_ref()),
        calculated_balance: BigDecimal::zero(),
        calculated_dr_cr: DrCr::Dr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_money_strips_currency_and_separators() {
        assert_eq!(
            parse_money(Some(&json!("Rs. 1,250.00"))),
            BigDecimal::from(1250)
        );
        assert_eq!(parse_money(Some(&json!("Rs.1250"))), BigDecimal::from(1250));
        assert_eq!(
            parse_money(Some(&json!("PKR 12,500.75"))),
            BigDecimal::from_str("12500.75").unwrap()
        );
        assert_eq!(parse_money(Some(&json!("-1,000"))), BigDecimal::from(-1000));
    }

    #[test]
    fn test_parse_money_defaults_to_zero() {
        assert_eq!(parse_money(None), BigDecimal::zero());
        assert_eq!(parse_money(Some(&json!(null))), BigDecimal::zero());
        assert_eq!(parse_money(Some(&json!(""))), BigDecimal::zero());
        assert_eq!(parse_money(Some(&json!("-"))), BigDecimal::zero());
        assert_eq!(parse_money(Some(&json!("NaN"))), BigDecimal::zero());
        assert_eq!(parse_money(Some(&json!(true))), BigDecimal::zero());
    }

    #[test]
    fn test_parse_money_reads_numbers() {
        assert_eq!(parse_money(Some(&json!(500))), BigDecimal::from(500));
        assert_eq!(
            parse_money(Some(&json!(99.5))),
            BigDecimal::from_str("99.5").unwrap()
        );
    }

    #[test]
    fn test_parse_money_takes_leading_number() {
        assert_eq!(parse_money_text("12-3"), BigDecimal::from(12));
        assert_eq!(
            parse_money_text("1.5.2"),
            BigDecimal::from_str("1.5").unwrap()
        );
        assert_eq!(
            parse_money_text(".75"),
            BigDecimal::from_str("0.75").unwrap()
        );
    }

    #[test]
    fn test_split_columns_moves_negative_amounts() {
        let (debit, credit) = split_columns(BigDecimal::from(-200), BigDecimal::from(50));
        assert_eq!(debit, BigDecimal::zero());
        assert_eq!(credit, BigDecimal::from(250));

        let (debit, credit) = split_columns(BigDecimal::from(100), BigDecimal::from(-40));
        assert_eq!(debit, BigDecimal::from(140));
        assert_eq!(credit, BigDecimal::zero());
    }

    #[test]
    fn test_text_fields() {
        let config = ReconcilerConfig::default();

        assert_eq!(clean_text(Some(&json!("NaN")), &config), "");
        assert_eq!(clean_text(Some(&json!("Rs. NaN")), &config), "");
        assert_eq!(clean_text(Some(&json!("  Chrome ")), &config), "Chrome");
        assert_eq!(clean_text(None, &config), "");
        assert_eq!(clean_text(Some(&json!(40)), &config), "40");

        assert_eq!(display_text(None, &config), "-");
        assert_eq!(display_text(Some(&json!("   ")), &config), "-");
        assert_eq!(display_text(Some(&json!("NaN")), &config), "");
        assert_eq!(display_text(Some(&json!(" Cash ")), &config), "Cash");
    }

    #[test]
    fn test_parse_sn() {
        assert_eq!(parse_sn(Some(&json!("abc")), 3), 4);
        assert_eq!(parse_sn(Some(&json!("12")), 0), 12);
        assert_eq!(parse_sn(Some(&json!(" 7 ")), 0), 7);
        assert_eq!(parse_sn(Some(&json!(5)), 0), 5);
        assert_eq!(parse_sn(Some(&json!("3.9")), 0), 3);
        assert_eq!(parse_sn(Some(&json!("0")), 1), 2);
        assert_eq!(parse_sn(Some(&json!(-4)), 2), 3);
        assert_eq!(parse_sn(None, 0), 1);
    }

    #[test]
    fn test_normalize_row() {
        let config = ReconcilerConfig::default();
        let row: RawTransactionRow = serde_json::from_value(json!({
            "sn": "abc",
            "date": " 2024-01-05 ",
            "description": "Sale of chrome",
            "item": "NaN",
            "weightQty": "120",
            "rate": "Rs. NaN",
            "transactionType": "Sale/Purchase",
            "debit": "Rs. 1,250.00",
            "credit": "-",
            "balance": 1250
        }))
        .unwrap();

        let txn = normalize_row(&row, 3, &config);

        assert_eq!(txn.sn, 4);
        assert_eq!(txn.date, "2024-01-05");
        assert_eq!(txn.item, "");
        assert_eq!(txn.weight_qty, "120");
        assert_eq!(txn.rate, "");
        assert_eq!(txn.transaction_type, "Sale");
        assert_eq!(txn.payment_method, "-");
        assert_eq!(txn.bank_name, "-");
        assert_eq!(txn.cheque_no, "-");
        assert_eq!(txn.debit, BigDecimal::from(1250));
        assert_eq!(txn.credit, BigDecimal::zero());
        assert_eq!(txn.balance, BigDecimal::from(1250));
    }
}
