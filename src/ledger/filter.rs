//! Row filtering: discard spreadsheet artifacts before normalization

use serde_json::Value;
use std::fmt;

use crate::config::ReconcilerConfig;
use crate::ledger::normalize::value_text;
use crate::traits::*;
use crate::types::*;

/// Why a raw row was discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRejection {
    /// A header row leaked into the data
    HeaderRow,
    /// Date is absent, blank or a placeholder
    MissingDate,
    /// Item, rate or weight carries a sentinel value
    SentinelValue,
}

impl fmt::Display for RowRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            RowRejection::HeaderRow => "header row",
            RowRejection::MissingDate => "missing date",
            RowRejection::SentinelValue => "sentinel value",
        };
        f.write_str(reason)
    }
}

fn trimmed_equals(value: Option<&Value>, expected: &str) -> bool {
    value_text(value).is_some_and(|text| text.trim() == expected)
}

/// Check whether a row is the sheet's header repeated as data
pub fn is_header_row(row: &RawTransactionRow, config: &ReconcilerConfig) -> bool {
    trimmed_equals(row.description.as_ref(), &config.header_description)
        || trimmed_equals(row.sn.as_ref(), &config.header_sn)
        || trimmed_equals(row.date.as_ref(), &config.header_date)
}

/// Check whether a row lacks a usable date
///
/// `false` and numeric zero count as missing, as do blanks and placeholders.
pub fn is_missing_date(row: &RawTransactionRow, config: &ReconcilerConfig) -> bool {
    match &row.date {
        Some(Value::Bool(false)) => return true,
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => return true,
        _ => {}
    }

    match value_text(row.date.as_ref()) {
        None => true,
        Some(date) => {
            let date = date.trim();
            date.is_empty() || config.missing_date_placeholders.iter().any(|p| p == date)
        }
    }
}

/// Check whether item, rate or weight hold a sentinel value
pub fn has_sentinel_values(row: &RawTransactionRow, config: &ReconcilerConfig) -> bool {
    [&row.item, &row.rate, &row.weight_qty].iter().any(|field| {
        value_text(field.as_ref()).is_some_and(|text| config.is_sentinel(text.trim()))
    })
}

/// Filter that also drops rows carrying sentinel values in item, rate or weight
pub struct StrictRowFilter;

impl RowFilter for StrictRowFilter {
    fn rejection(
        &self,
        row: &RawTransactionRow,
        config: &ReconcilerConfig,
    ) -> Option<RowRejection> {
        DefaultRowFilter.rejection(row, config).or_else(|| {
            has_sentinel_values(row, config).then_some(RowRejection::SentinelValue)
        })
    }
}

/// Filter chosen by the configuration
pub fn filter_for(config: &ReconcilerConfig) -> Box<dyn RowFilter> {
    if config.strict_sentinel_filter {
        Box::new(StrictRowFilter)
    } else {
        Box::new(DefaultRowFilter)
    }
}
