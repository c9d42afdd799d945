//! Validation utilities for the write side

use crate::ledger::{NewCustomer, TransactionDraft};
use crate::traits::*;
use crate::types::*;
use bigdecimal::BigDecimal;

/// Validate that an amount is positive
pub fn validate_positive_amount(amount: &BigDecimal) -> LedgerResult<()> {
    if *amount <= BigDecimal::from(0) {
        Err(LedgerError::Validation("Amount must be positive".to_string()))
    } else {
        Ok(())
    }
}

/// Validate that a customer name is usable as a sheet name
pub fn validate_customer_name(name: &str) -> LedgerResult<()> {
    if name.trim().is_empty() {
        return Err(LedgerError::Validation("Customer name cannot be empty".to_string()));
    }

    if name.chars().count() > 100 {
        return Err(LedgerError::Validation(
            "Customer name cannot exceed 100 characters".to_string(),
        ));
    }

    // Sheet tab names cannot contain these
    if name.chars().any(|c| matches!(c, '/' | '\\' | '?' | '*' | '[' | ']' | ':')) {
        return Err(LedgerError::Validation(
            "Customer name cannot contain / \\ ? * [ ] or :".to_string(),
        ));
    }

    Ok(())
}

/// Validate that a transaction description is valid
pub fn validate_transaction_description(description: &str) -> LedgerResult<()> {
    if description.trim().is_empty() {
        return Err(LedgerError::Validation("Transaction description cannot be empty".to_string()));
    }

    if description.chars().count() > 500 {
        return Err(LedgerError::Validation(
            "Transaction description cannot exceed 500 characters".to_string(),
        ));
    }

    Ok(())
}

/// Enhanced draft validator with payment detail checks
pub struct EnhancedDraftValidator;

impl DraftValidator for EnhancedDraftValidator {
    fn validate_transaction(&self, draft: &TransactionDraft) -> LedgerResult<()> {
        // Basic validation
        draft.validate()?;

        // Cheque payments must be traceable
        if draft.payment_method.eq_ignore_ascii_case("cheque") {
            if draft.cheque_no.trim().is_empty() {
                return Err(LedgerError::Validation(
                    "Cheque payments require a cheque number".to_string(),
                ));
            }
            if draft.bank_name.trim().is_empty() {
                return Err(LedgerError::Validation(
                    "Cheque payments require a bank name".to_string(),
                ));
            }
        }

        // Item lines need both a weight and a rate
        if !draft.item.trim().is_empty()
            && (draft.weight_qty.trim().is_empty() || draft.rate.trim().is_empty())
        {
            return Err(LedgerError::Validation(format!(
                "Item '{}' requires both weight and rate",
                draft.item
            )));
        }

        Ok(())
    }

    fn validate_customer(&self, customer: &NewCustomer) -> LedgerResult<()> {
        customer.validate()
    }
}
