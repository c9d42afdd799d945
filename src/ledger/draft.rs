//! Transaction drafts for the write side of the ledger

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::pricing::AmountCalculator;
use crate::types::*;
use crate::utils::validation::{
    validate_customer_name, validate_positive_amount, validate_transaction_description,
};

/// Date format the sheet stores
pub const SHEET_DATE_FORMAT: &str = "%Y-%m-%d";

/// A transaction to be appended to a customer's ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    pub customer_name: String,
    pub date: NaiveDate,
    pub description: String,
    pub item: String,
    pub weight_qty: String,
    pub rate: String,
    pub transaction_type: String,
    pub payment_method: String,
    pub bank_name: String,
    pub cheque_no: String,
    /// Column the amount is posted to
    pub side: DrCr,
    pub amount: BigDecimal,
}

impl TransactionDraft {
    /// Validate the draft
    pub fn validate(&self) -> LedgerResult<()> {
        validate_customer_name(&self.customer_name)?;
        validate_transaction_description(&self.description)?;
        validate_positive_amount(&self.amount)?;
        Ok(())
    }

    /// The row as the sheet stores it, with the amount in the debit or credit column
    pub fn to_raw_row(&self, sn: u32) -> RawTransactionRow {
        let amount = Some(Value::String(self.amount.to_plain_string()));
        let (debit, credit) = match self.side {
            DrCr::Dr => (amount, None),
            DrCr::Cr => (None, amount),
        };

        RawTransactionRow {
            sn: Some(Value::from(sn)),
            date: Some(Value::String(self.date.format(SHEET_DATE_FORMAT).to_string())),
            description: text_cell(&self.description),
            item: text_cell(&self.item),
            weight_qty: text_cell(&self.weight_qty),
            rate: text_cell(&self.rate),
            transaction_type: text_cell(&self.transaction_type),
            payment_method: text_cell(&self.payment_method),
            bank_name: text_cell(&self.bank_name),
            cheque_no: text_cell(&self.cheque_no),
            debit,
            credit,
            balance: None,
        }
    }
}

fn text_cell(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(Value::String(trimmed.to_string()))
    }
}

/// Builder for transaction drafts
#[derive(Debug)]
pub struct TransactionDraftBuilder {
    draft: TransactionDraft,
}

impl TransactionDraftBuilder {
    /// Create a new draft builder; the type defaults to "Sale" and the side to DR
    pub fn new(customer_name: String, date: NaiveDate, description: String) -> Self {
        Self {
            draft: TransactionDraft {
                customer_name,
                date,
                description,
                item: String::new(),
                weight_qty: String::new(),
                rate: String::new(),
                transaction_type: "Sale".to_string(),
                payment_method: String::new(),
                bank_name: String::new(),
                cheque_no: String::new(),
                side: DrCr::Dr,
                amount: BigDecimal::from(0),
            },
        }
    }

    pub fn item(mut self, item: String) -> Self {
        self.draft.item = item;
        self
    }

    pub fn weight_qty(mut self, weight_qty: String) -> Self {
        self.draft.weight_qty = weight_qty;
        self
    }

    pub fn rate(mut self, rate: String) -> Self {
        self.draft.rate = rate;
        self
    }

    pub fn transaction_type(mut self, transaction_type: String) -> Self {
        self.draft.transaction_type = transaction_type;
        self
    }

    pub fn payment_method(mut self, payment_method: String) -> Self {
        self.draft.payment_method = payment_method;
        self
    }

    pub fn bank_name(mut self, bank_name: String) -> Self {
        self.draft.bank_name = bank_name;
        self
    }

    pub fn cheque_no(mut self, cheque_no: String) -> Self {
        self.draft.cheque_no = cheque_no;
        self
    }

    /// Post the amount to the debit column
    pub fn debit(mut self, amount: BigDecimal) -> Self {
        self.draft.side = DrCr::Dr;
        self.draft.amount = amount;
        self
    }

    /// Post the amount to the credit column
    pub fn credit(mut self, amount: BigDecimal) -> Self {
        self.draft.side = DrCr::Cr;
        self.draft.amount = amount;
        self
    }

    /// Set item, weight and rate, pricing the line with the calculator
    pub fn priced_item(
        mut self,
        calculator: &AmountCalculator,
        item: String,
        weight_qty: String,
        rate: String,
    ) -> LedgerResult<Self> {
        self.draft.amount = calculator.amount_from_text(&item, &weight_qty, &rate)?;
        self.draft.item = item;
        self.draft.weight_qty = weight_qty;
        self.draft.rate = rate;
        Ok(self)
    }

    /// Build the draft
    pub fn build(self) -> LedgerResult<TransactionDraft> {
        self.draft.validate()?;
        Ok(self.draft)
    }
}

/// Common ledger entries
pub mod patterns {
    use super::*;

    /// Goods sold on account: the customer is debited with weight x rate
    pub fn create_sale(
        customer_name: String,
        date: NaiveDate,
        calculator: &AmountCalculator,
        item: String,
        weight_qty: String,
        rate: String,
    ) -> LedgerResult<TransactionDraft> {
        let description = format!("Sale of {}", item);
        TransactionDraftBuilder::new(customer_name, date, description)
            .transaction_type("Sale".to_string())
            .priced_item(calculator, item, weight_qty, rate)?
            .build()
    }

    /// Goods bought from the customer: the customer is credited
    pub fn create_purchase(
        customer_name: String,
        date: NaiveDate,
        calculator: &AmountCalculator,
        item: String,
        weight_qty: String,
        rate: String,
    ) -> LedgerResult<TransactionDraft> {
        let description = format!("Purchase of {}", item);
        let draft = TransactionDraftBuilder::new(customer_name, date, description)
            .transaction_type("Purchase".to_string())
            .priced_item(calculator, item, weight_qty, rate)?
            .build()?;
        Ok(TransactionDraft {
            side: DrCr::Cr,
            ..draft
        })
    }

    /// Payment received from the customer: the customer is credited
    pub fn create_payment_received(
        customer_name: String,
        date: NaiveDate,
        payment_method: String,
        amount: BigDecimal,
    ) -> LedgerResult<TransactionDraft> {
        let description = format!("Payment received ({})", payment_method);
        TransactionDraftBuilder::new(customer_name, date, description)
            .transaction_type("Payment".to_string())
            .payment_method(payment_method)
            .credit(amount)
            .build()
    }

    /// Cheque received from the customer
    pub fn create_cheque_received(
        customer_name: String,
        date: NaiveDate,
        bank_name: String,
        cheque_no: String,
        amount: BigDecimal,
    ) -> LedgerResult<TransactionDraft> {
        let description = format!("Cheque {} received", cheque_no);
        TransactionDraftBuilder::new(customer_name, date, description)
            .transaction_type("Payment".to_string())
            .payment_method("Cheque".to_string())
            .bank_name(bank_name)
            .cheque_no(cheque_no)
            .credit(amount)
            .build()
    }
}
