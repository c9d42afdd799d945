//! New customer records and their opening balance row

use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ledger::draft::SHEET_DATE_FORMAT;
use crate::types::*;
use crate::utils::validation::validate_customer_name;

/// Description written on a customer's first row
pub const OPENING_BALANCE_DESCRIPTION: &str = "Opening Balance";

/// A customer to be created in the sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub name: String,
    /// Positive means the customer owes (DR), negative means we owe them (CR)
    pub opening_balance: BigDecimal,
    /// Tab colour in the sheet, "none" for default
    pub color: String,
}

impl NewCustomer {
    /// Create a customer with no opening balance
    pub fn new(name: String) -> Self {
        Self {
            name,
            opening_balance: BigDecimal::zero(),
            color: "none".to_string(),
        }
    }

    pub fn with_opening_balance(mut self, opening_balance: BigDecimal) -> Self {
        self.opening_balance = opening_balance;
        self
    }

    pub fn with_color(mut self, color: String) -> Self {
        self.color = color;
        self
    }

    /// Validate the customer
    pub fn validate(&self) -> LedgerResult<()> {
        validate_customer_name(&self.name)?;

        if self.color.trim().is_empty() {
            return Err(LedgerError::Validation(
                "Customer color cannot be empty (use \"none\")".to_string(),
            ));
        }

        Ok(())
    }

    /// First ledger row carrying the opening balance
    pub fn opening_row(&self, date: NaiveDate) -> RawTransactionRow {
        let magnitude = Some(Value::String(self.opening_balance.abs().to_plain_string()));
        let (debit, credit) = if self.opening_balance < BigDecimal::zero() {
            (None, magnitude)
        } else {
            (magnitude, None)
        };

        RawTransactionRow {
            sn: Some(Value::from(1)),
            date: Some(Value::String(date.format(SHEET_DATE_FORMAT).to_string())),
            description: Some(Value::String(OPENING_BALANCE_DESCRIPTION.to_string())),
            debit,
            credit,
            balance: Some(Value::String(self.opening_balance.to_plain_string())),
            ..RawTransactionRow::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_opening_row_for_receivable() {
        let customer = NewCustomer::new("Akram Traders".to_string())
            .with_opening_balance(BigDecimal::from(2500));
        let row = customer.opening_row(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        assert_eq!(row.description, Some(json!("Opening Balance")));
        assert_eq!(row.debit, Some(json!("2500")));
        assert_eq!(row.credit, None);
        assert_eq!(row.balance, Some(json!("2500")));
    }

    #[test]
    fn test_opening_row_for_payable() {
        let customer = NewCustomer::new("Bilal Steel".to_string())
            .with_opening_balance(BigDecimal::from(-800));
        let row = customer.opening_row(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        assert_eq!(row.debit, None);
        assert_eq!(row.credit, Some(json!("800")));
        assert_eq!(row.balance, Some(json!("-800")));
    }

    #[test]
    fn test_validation() {
        assert!(NewCustomer::new("Akram Traders".to_string()).validate().is_ok());
        assert!(NewCustomer::new(String::new()).validate().is_err());
        assert!(NewCustomer::new("Akram".to_string())
            .with_color(" ".to_string())
            .validate()
            .is_err());
    }
}
