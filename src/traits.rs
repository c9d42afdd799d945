//! Traits for the external data source and the pluggable reconcile/entry rules

use async_trait::async_trait;

use crate::config::ReconcilerConfig;
use crate::ledger::filter::{is_header_row, is_missing_date, RowRejection};
use crate::ledger::{CustomerBalance, NewCustomer, TransactionDraft};
use crate::types::*;

/// Access to the spreadsheet-backed ledger API
///
/// This trait allows the reconciler to work with any client (HTTP, a local
/// sheet export, in-memory fixtures) by implementing these methods.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// List all customer names
    async fn list_customers(&self) -> LedgerResult<Vec<String>>;

    /// Raw transaction rows for one customer, in sheet order
    async fn get_customer_transactions(
        &self,
        customer_name: &str,
    ) -> LedgerResult<Vec<RawTransactionRow>>;

    /// Create a customer and its opening balance row
    async fn create_customer(&mut self, customer: &NewCustomer) -> LedgerResult<()>;

    /// Append a transaction to a customer's ledger
    async fn create_transaction(&mut self, draft: &TransactionDraft) -> LedgerResult<()>;

    /// Closing balance of every customer as the backend reports it
    async fn get_customer_balances(&self) -> LedgerResult<Vec<CustomerBalance>>;
}

/// Decides which raw rows are real transactions
pub trait RowFilter: Send + Sync {
    /// Reason to drop the row, or `None` to keep it
    fn rejection(
        &self,
        row: &RawTransactionRow,
        config: &ReconcilerConfig,
    ) -> Option<RowRejection>;

    /// Whether the row survives filtering
    fn accept(&self, row: &RawTransactionRow, config: &ReconcilerConfig) -> bool {
        self.rejection(row, config).is_none()
    }
}

/// Default filter: drops leaked header rows and rows without a date
pub struct DefaultRowFilter;

impl RowFilter for DefaultRowFilter {
    fn rejection(
        &self,
        row: &RawTransactionRow,
        config: &ReconcilerConfig,
    ) -> Option<RowRejection> {
        if is_header_row(row, config) {
            Some(RowRejection::HeaderRow)
        } else if is_missing_date(row, config) {
            Some(RowRejection::MissingDate)
        } else {
            None
        }
    }
}

/// Trait for implementing custom rules on the write side
pub trait DraftValidator: Send + Sync {
    /// Validate a transaction before it is sent to the source
    fn validate_transaction(&self, draft: &TransactionDraft) -> LedgerResult<()>;

    /// Validate a new customer before it is sent to the source
    fn validate_customer(&self, customer: &NewCustomer) -> LedgerResult<()>;
}

/// Default draft validator with basic rules
pub struct DefaultDraftValidator;

impl DraftValidator for DefaultDraftValidator {
    fn validate_transaction(&self, draft: &TransactionDraft) -> LedgerResult<()> {
        draft.validate()
    }

    fn validate_customer(&self, customer: &NewCustomer) -> LedgerResult<()> {
        customer.validate()
    }
}
