//! Core types and data structures for the ledger reconciler

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Ledger side of a balance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrCr {
    /// Debit - the customer owes this amount
    #[default]
    #[serde(rename = "DR")]
    Dr,
    /// Credit - the amount is owed to the customer
    #[serde(rename = "CR")]
    Cr,
}

impl DrCr {
    /// The other side of the ledger
    pub fn opposite(self) -> Self {
        match self {
            DrCr::Dr => DrCr::Cr,
            DrCr::Cr => DrCr::Dr,
        }
    }

    /// Short label as printed in the ledger ("DR" / "CR")
    pub fn as_str(&self) -> &'static str {
        match self {
            DrCr::Dr => "DR",
            DrCr::Cr => "CR",
        }
    }
}

impl fmt::Display for DrCr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transaction row exactly as the spreadsheet API returns it.
///
/// Every field is an untyped JSON value: numbers frequently arrive as strings,
/// and spreadsheet artifacts such as `"NaN"`, `"-"` or a leaked header row are
/// common. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTransactionRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sn: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_qty: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cheque_no: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debit: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<Value>,
}

impl RawTransactionRow {
    /// Parse a list of rows from the JSON array returned by the read API
    pub fn list_from_json(value: Value) -> LedgerResult<Vec<Self>> {
        serde_json::from_value(value)
            .map_err(|e| LedgerError::Source(format!("Malformed transaction rows: {}", e)))
    }
}

/// A cleaned transaction annotated with its running balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// 1-based serial number
    pub sn: u32,
    pub date: String,
    pub description: String,
    pub item: String,
    pub weight_qty: String,
    pub rate: String,
    pub transaction_type: String,
    pub payment_method: String,
    pub bank_name: String,
    pub cheque_no: String,
    /// Debit amount, never negative
    pub debit: BigDecimal,
    /// Credit amount, never negative
    pub credit: BigDecimal,
    /// Balance column as reported by the sheet; only used to seed an opening balance row
    pub balance: BigDecimal,
    /// Absolute running balance after this row
    pub calculated_balance: BigDecimal,
    /// Side of the running balance after this row
    pub calculated_dr_cr: DrCr,
}

/// Per-customer totals derived from a reconciled transaction list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    pub total_debit: BigDecimal,
    pub total_credit: BigDecimal,
    /// Running balance of the last transaction
    pub final_balance: BigDecimal,
    #[serde(rename = "finalDRCR")]
    pub final_dr_cr: DrCr,
    pub transaction_count: usize,
    /// |total debit - total credit|
    pub net_balance: BigDecimal,
    #[serde(rename = "netDRCR")]
    pub net_dr_cr: DrCr,
}

/// Output of a reconcile pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation {
    pub transactions: Vec<Transaction>,
    pub summary: CustomerSummary,
    /// Number of input rows discarded by the row filter
    pub dropped_rows: usize,
}

/// Errors that can occur outside the (infallible) reconcile pass
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Source error: {0}")]
    Source(String),
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Export error: {0}")]
    Export(String),
    #[error("Pricing error: {0}")]
    Pricing(String),
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
