//! In-memory transaction source for testing

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::ledger::{CustomerBalance, LedgerReconciler, NewCustomer, TransactionDraft};
use crate::traits::*;
use crate::types::*;

type Sheets = BTreeMap<String, Vec<RawTransactionRow>>;

/// In-memory stand-in for the spreadsheet API, one "sheet" of raw rows per customer
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    sheets: Arc<RwLock<Sheets>>,
}

impl MemorySource {
    /// Create an empty memory source
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> LedgerResult<RwLockReadGuard<'_, Sheets>> {
        self.sheets
            .read()
            .map_err(|_| LedgerError::Source("Memory source lock poisoned".to_string()))
    }

    fn write(&self) -> LedgerResult<RwLockWriteGuard<'_, Sheets>> {
        self.sheets
            .write()
            .map_err(|_| LedgerError::Source("Memory source lock poisoned".to_string()))
    }

    /// Replace a customer's sheet with the given rows (creating the customer)
    pub fn insert_rows(
        &self,
        customer_name: &str,
        rows: Vec<RawTransactionRow>,
    ) -> LedgerResult<()> {
        self.write()?.insert(customer_name.to_string(), rows);
        Ok(())
    }

    /// Replace a customer's sheet with rows given as a JSON array
    pub fn insert_json(&self, customer_name: &str, rows: Value) -> LedgerResult<()> {
        let rows = RawTransactionRow::list_from_json(rows)?;
        self.insert_rows(customer_name, rows)
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) -> LedgerResult<()> {
        self.write()?.clear();
        Ok(())
    }
}

#[async_trait]
impl TransactionSource for MemorySource {
    async fn list_customers(&self) -> LedgerResult<Vec<String>> {
        Ok(self.read()?.keys().cloned().collect())
    }

    async fn get_customer_transactions(
        &self,
        customer_name: &str,
    ) -> LedgerResult<Vec<RawTransactionRow>> {
        self.read()?
            .get(customer_name)
            .cloned()
            .ok_or_else(|| LedgerError::CustomerNotFound(customer_name.to_string()))
    }

    async fn create_customer(&mut self, customer: &NewCustomer) -> LedgerResult<()> {
        let mut sheets = self.write()?;
        if sheets.contains_key(&customer.name) {
            return Err(LedgerError::Source(format!(
                "Sheet '{}' already exists",
                customer.name
            )));
        }

        let today = chrono::Utc::now().date_naive();
        sheets.insert(customer.name.clone(), vec![customer.opening_row(today)]);
        Ok(())
    }

    async fn create_transaction(&mut self, draft: &TransactionDraft) -> LedgerResult<()> {
        let mut sheets = self.write()?;
        let rows = sheets
            .get_mut(&draft.customer_name)
            .ok_or_else(|| LedgerError::CustomerNotFound(draft.customer_name.clone()))?;

        let sn = u32::try_from(rows.len() + 1).unwrap_or(u32::MAX);
        rows.push(draft.to_raw_row(sn));
        Ok(())
    }

    async fn get_customer_balances(&self) -> LedgerResult<Vec<CustomerBalance>> {
        let reconciler = LedgerReconciler::default();
        let sheets = self.read()?;

        Ok(sheets
            .iter()
            .map(|(name, rows)| {
                let summary = reconciler.reconcile(rows).summary;
                CustomerBalance::from_summary(name.clone(), &summary)
            })
            .collect())
    }
}
