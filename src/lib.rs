//! # ERP Ledger Core
//!
//! Customer ledger reconciliation for transaction feeds exported from a
//! spreadsheet-backed accounting API.
//!
//! ## Features
//!
//! - **Row filtering**: Drops leaked header rows, undated rows and (optionally) sentinel rows
//! - **Normalization**: Turns untyped cells such as `"Rs. 1,250.00"` or `"NaN"` into typed values
//! - **Running balances**: Per-row balance with DR/CR side under one explicit sign convention
//! - **Summaries**: Customer totals plus a balance sheet overview across customers
//! - **Entry side**: Validated transaction and customer drafts, weight x rate pricing
//! - **Export**: CSV export of reconciled transactions
//!
//! ## Quick Start
//!
//! ```rust
//! use bigdecimal::BigDecimal;
//! use erp_ledger_core::{reconcile, DrCr, RawTransactionRow};
//! use serde_json::json;
//!
//! let rows = RawTransactionRow::list_from_json(json!([
//!     {"sn": "1", "date": "2024-01-01", "description": "Sale", "debit": "Rs. 1,250.00"},
//!     {"sn": "2", "date": "2024-01-05", "description": "Payment", "credit": "250"}
//! ]))
//! .unwrap();
//!
//! let result = reconcile(&rows);
//! assert_eq!(result.summary.final_dr_cr, DrCr::Dr);
//! assert_eq!(result.summary.final_balance, BigDecimal::from(1000));
//! ```

pub mod config;
pub mod export;
pub mod ledger;
pub mod pricing;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::*;
pub use ledger::*;
pub use pricing::*;
pub use traits::*;
pub use types::*;

// Re-export draft patterns for convenience
pub use ledger::draft::patterns;
