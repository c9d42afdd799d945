//! Reconciler configuration: sign convention and the spreadsheet artifact strings

use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::types::*;

/// Which ledger column grows the running balance.
///
/// Older revisions of the dashboard disagreed on this, so the choice is made
/// once here and nowhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignConvention {
    /// Debits increase what the customer owes: positive balance is DR
    DebitIncreases,
    /// Credits increase the balance: positive balance is CR
    CreditIncreases,
}

/// Convention used unless the configuration says otherwise
pub const LEDGER_SIGN_CONVENTION: SignConvention = SignConvention::DebitIncreases;

impl Default for SignConvention {
    fn default() -> Self {
        LEDGER_SIGN_CONVENTION
    }
}

impl SignConvention {
    /// Signed effect of one row on the running balance
    pub fn movement(&self, debit: &BigDecimal, credit: &BigDecimal) -> BigDecimal {
        match self {
            SignConvention::DebitIncreases => debit - credit,
            SignConvention::CreditIncreases => credit - debit,
        }
    }

    /// Side for a signed running balance; zero counts as positive
    pub fn side(&self, running: &BigDecimal) -> DrCr {
        let positive_side = match self {
            SignConvention::DebitIncreases => DrCr::Dr,
            SignConvention::CreditIncreases => DrCr::Cr,
        };
        if *running >= BigDecimal::zero() {
            positive_side
        } else {
            positive_side.opposite()
        }
    }

    /// Accumulator value for an opening balance row.
    ///
    /// The magnitude prefers the sheet's balance column; the sign follows the
    /// row's own debit/credit movement, falling back to the balance column's sign.
    pub fn opening_seed(&self, balance: &BigDecimal, movement: &BigDecimal) -> BigDecimal {
        let magnitude = if balance.is_zero() {
            movement.abs()
        } else {
            balance.abs()
        };
        let negative = if movement.is_zero() {
            *balance < BigDecimal::zero()
        } else {
            *movement < BigDecimal::zero()
        };
        if negative {
            -magnitude
        } else {
            magnitude
        }
    }
}

/// Reconciler settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReconcilerConfig {
    pub sign_convention: SignConvention,
    /// Also drop rows whose item/rate/weight carry a sentinel value
    pub strict_sentinel_filter: bool,
    pub header_description: String,
    pub header_sn: String,
    pub header_date: String,
    pub missing_date_placeholders: Vec<String>,
    /// Literal values the sheet writes for unparsable cells
    pub sentinels: Vec<String>,
    pub display_placeholder: String,
    /// Case-insensitive substring identifying an opening balance row
    pub opening_balance_marker: String,
    pub transaction_type_synonyms: HashMap<String, String>,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            sign_convention: LEDGER_SIGN_CONVENTION,
            strict_sentinel_filter: false,
            header_description: "Description".to_string(),
            header_sn: "S.N".to_string(),
            header_date: "Date".to_string(),
            missing_date_placeholders: vec![String::new(), "-".to_string()],
            sentinels: vec!["NaN".to_string(), "Rs. NaN".to_string()],
            display_placeholder: "-".to_string(),
            opening_balance_marker: "opening balance".to_string(),
            transaction_type_synonyms: HashMap::from([(
                "Sale/Purchase".to_string(),
                "Sale".to_string(),
            )]),
        }
    }
}

impl ReconcilerConfig {
    /// Create the default configuration with a specific sign convention
    pub fn with_convention(sign_convention: SignConvention) -> Self {
        Self {
            sign_convention,
            ..Self::default()
        }
    }

    /// Parse a configuration from JSON; missing keys keep their defaults
    pub fn from_json_str(json: &str) -> LedgerResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| LedgerError::Config(format!("Invalid reconciler config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> LedgerResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            LedgerError::Config(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    /// Reject settings that would make the reconciler misbehave
    pub fn validate(&self) -> LedgerResult<()> {
        if self.opening_balance_marker.trim().is_empty() {
            return Err(LedgerError::Validation(
                "Opening balance marker cannot be empty".to_string(),
            ));
        }

        if self.display_placeholder.is_empty() {
            return Err(LedgerError::Validation("Display placeholder cannot be empty".to_string()));
        }

        Ok(())
    }

    /// Whether a trimmed text value is one of the sheet's sentinels
    pub fn is_sentinel(&self, value: &str) -> bool {
        self.sentinels.iter().any(|s| s == value)
    }

    /// Whether a description marks an opening balance row
    pub fn is_opening_balance(&self, description: &str) -> bool {
        description
            .to_lowercase()
            .contains(&self.opening_balance_marker.to_lowercase())
    }

    /// Canonical transaction type for a synonym, or the input unchanged
    pub fn canonical_transaction_type<'a>(&'a self, transaction_type: &'a str) -> &'a str {
        self.transaction_type_synonyms
            .get(transaction_type)
            .map(String::as_str)
            .unwrap_or(transaction_type)
    }
}
