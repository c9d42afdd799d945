//! Reconciler and the customer ledger orchestrator that drives it

use tracing::{debug, info, warn};

use crate::config::ReconcilerConfig;
use crate::ledger::balance::apply_running_balance;
use crate::ledger::filter::filter_for;
use crate::ledger::normalize::normalize_row;
use crate::ledger::summary::summarize;
use crate::ledger::{BalanceSheet, CustomerBalance, NewCustomer, TransactionDraft};
use crate::traits::*;
use crate::types::*;

/// Turns raw sheet rows into annotated transactions and a summary.
///
/// Holds only configuration; every call rebuilds its output from the input.
pub struct LedgerReconciler {
    config: ReconcilerConfig,
    filter: Box<dyn RowFilter>,
}

impl Default for LedgerReconciler {
    fn default() -> Self {
        Self::new(ReconcilerConfig::default())
    }
}

impl LedgerReconciler {
    /// Create a reconciler; the row filter follows `strict_sentinel_filter`
    pub fn new(config: ReconcilerConfig) -> Self {
        let filter = filter_for(&config);
        Self { config, filter }
    }

    /// Create a reconciler with a custom row filter
    pub fn with_filter(config: ReconcilerConfig, filter: Box<dyn RowFilter>) -> Self {
        Self { config, filter }
    }

    pub fn config(&self) -> &ReconcilerConfig {
        &self.config
    }

    /// Rows that survive the filter, in input order
    pub fn filter_rows<'a>(&self, rows: &'a [RawTransactionRow]) -> Vec<&'a RawTransactionRow> {
        rows.iter()
            .enumerate()
            .filter(|(index, row)| match self.filter.rejection(row, &self.config) {
                Some(reason) => {
                    debug!(row = index, %reason, "dropping ledger row");
                    false
                }
                None => true,
            })
            .map(|(_, row)| row)
            .collect()
    }

    /// Filter and normalize rows, without running balances
    pub fn normalize(&self, rows: &[RawTransactionRow]) -> Vec<Transaction> {
        self.filter_rows(rows)
            .into_iter()
            .enumerate()
            .map(|(index, row)| normalize_row(row, index, &self.config))
            .collect()
    }

    /// Full pass: filter, normalize, running balance, summary. Never fails.
    pub fn reconcile(&self, rows: &[RawTransactionRow]) -> Reconciliation {
        let transactions = self.normalize(rows);
        let dropped_rows = rows.len() - transactions.len();

        let mut reconciliation = self.rebalance(transactions);
        reconciliation.dropped_rows = dropped_rows;

        debug!(
            kept = reconciliation.transactions.len(),
            dropped = dropped_rows,
            final_balance = %reconciliation.summary.final_balance,
            final_side = %reconciliation.summary.final_dr_cr,
            "reconciled ledger"
        );

        reconciliation
    }

    /// Recompute running balances and the summary for already-normalized transactions
    pub fn rebalance(&self, mut transactions: Vec<Transaction>) -> Reconciliation {
        apply_running_balance(&mut transactions, &self.config);
        let summary = summarize(&transactions);

        Reconciliation {
            transactions,
            summary,
            dropped_rows: 0,
        }
    }
}

/// Reconcile with the default configuration
pub fn reconcile(rows: &[RawTransactionRow]) -> Reconciliation {
    LedgerReconciler::default().reconcile(rows)
}

/// Customer ledger backed by a [`TransactionSource`]
pub struct CustomerLedger<S: TransactionSource> {
    source: S,
    reconciler: LedgerReconciler,
    validator: Box<dyn DraftValidator>,
}

impl<S: TransactionSource> CustomerLedger<S> {
    /// Create a customer ledger with the default reconciler
    pub fn new(source: S) -> Self {
        Self::with_reconciler(source, LedgerReconciler::default())
    }

    /// Create a customer ledger with a configured reconciler
    pub fn with_reconciler(source: S, reconciler: LedgerReconciler) -> Self {
        Self {
            source,
            reconciler,
            validator: Box::new(DefaultDraftValidator),
        }
    }

    /// Create a customer ledger with a custom draft validator
    pub fn with_validator(
        source: S,
        reconciler: LedgerReconciler,
        validator: Box<dyn DraftValidator>,
    ) -> Self {
        Self {
            source,
            reconciler,
            validator,
        }
    }

    pub fn reconciler(&self) -> &LedgerReconciler {
        &self.reconciler
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// List all customers
    pub async fn list_customers(&self) -> LedgerResult<Vec<String>> {
        self.source.list_customers().await
    }

    /// Customers whose name contains `term`, ignoring case; an empty term matches all
    pub async fn search_customers(&self, term: &str) -> LedgerResult<Vec<String>> {
        let needle = term.trim().to_lowercase();
        let customers = self.source.list_customers().await?;

        Ok(customers
            .into_iter()
            .filter(|name| name.to_lowercase().contains(&needle))
            .collect())
    }

    /// Fetch and reconcile one customer's ledger
    pub async fn load_customer(&self, customer_name: &str) -> LedgerResult<Reconciliation> {
        let rows = self.source.get_customer_transactions(customer_name).await?;
        if rows.is_empty() {
            warn!(customer = customer_name, "source returned no rows");
        }

        let reconciliation = self.reconciler.reconcile(&rows);
        info!(
            customer = customer_name,
            transactions = reconciliation.summary.transaction_count,
            dropped = reconciliation.dropped_rows,
            "loaded customer ledger"
        );

        Ok(reconciliation)
    }

    /// Create a customer
    pub async fn create_customer(&mut self, customer: NewCustomer) -> LedgerResult<()> {
        self.validator.validate_customer(&customer)?;

        let existing = self.source.list_customers().await?;
        if existing.iter().any(|name| name.eq_ignore_ascii_case(&customer.name)) {
            return Err(LedgerError::Validation(format!(
                "Customer '{}' already exists",
                customer.name
            )));
        }

        self.source.create_customer(&customer).await?;
        info!(
            customer = %customer.name,
            opening_balance = %customer.opening_balance,
            "created customer"
        );
        Ok(())
    }

    /// Record a transaction and return the customer's refreshed ledger
    pub async fn record_transaction(
        &mut self,
        draft: TransactionDraft,
    ) -> LedgerResult<Reconciliation> {
        self.validator.validate_transaction(&draft)?;

        let customers = self.source.list_customers().await?;
        if !customers.contains(&draft.customer_name) {
            return Err(LedgerError::CustomerNotFound(draft.customer_name.clone()));
        }

        self.source.create_transaction(&draft).await?;
        info!(
            customer = %draft.customer_name,
            side = %draft.side,
            amount = %draft.amount,
            "recorded transaction"
        );

        self.load_customer(&draft.customer_name).await
    }

    /// Balance sheet from the balances the source reports
    pub async fn balance_sheet(&self) -> LedgerResult<BalanceSheet> {
        let balances = self.source.get_customer_balances().await?;
        Ok(BalanceSheet::from_balances(balances))
    }

    /// Balance sheet recomputed by reconciling every customer locally
    pub async fn reconciled_balance_sheet(&self) -> LedgerResult<BalanceSheet> {
        let mut balances = Vec::new();
        for customer_name in self.source.list_customers().await? {
            let reconciliation = self.load_customer(&customer_name).await?;
            balances.push(CustomerBalance::from_summary(
                customer_name,
                &reconciliation.summary,
            ));
        }
        Ok(BalanceSheet::from_balances(balances))
    }
}
