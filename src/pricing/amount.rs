//! Amount calculation for transaction entry (weight x rate)

use bigdecimal::{BigDecimal, RoundingMode, Zero};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

use crate::types::*;

/// Kilograms in one maund, the unit scrap rates are quoted in
pub const KG_PER_MAUND: &str = "37.324";

/// How an item's rate relates to its recorded weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    /// Rate is per recorded unit
    Standard,
    /// Weight is recorded in kg, rate is per maund
    Scrap,
}

impl ItemCategory {
    /// Weight expressed in the unit the rate is quoted in
    pub fn billable_quantity(&self, weight: &BigDecimal) -> BigDecimal {
        match self {
            ItemCategory::Standard => weight.clone(),
            ItemCategory::Scrap => weight / kg_per_maund(),
        }
    }
}

fn kg_per_maund() -> BigDecimal {
    BigDecimal::new(37324.into(), 3)
}

/// Detailed amount breakdown for one line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountCalculation {
    pub item: String,
    pub category: ItemCategory,
    pub weight: BigDecimal,
    pub rate: BigDecimal,
    /// Amount rounded to two decimal places
    pub amount: BigDecimal,
}

impl AmountCalculation {
    /// Calculate the line amount for a weight and rate
    pub fn calculate(
        item: String,
        category: ItemCategory,
        weight: BigDecimal,
        rate: BigDecimal,
    ) -> LedgerResult<Self> {
        if weight < BigDecimal::zero() {
            return Err(LedgerError::Pricing(format!(
                "Weight cannot be negative: {}",
                weight
            )));
        }

        if rate < BigDecimal::zero() {
            return Err(LedgerError::Pricing(format!(
                "Rate cannot be negative: {}",
                rate
            )));
        }

        let amount =
            (category.billable_quantity(&weight) * &rate).with_scale_round(2, RoundingMode::HalfUp);

        Ok(Self {
            item,
            category,
            weight,
            rate,
            amount,
        })
    }
}

/// Items the entry form knows about, with their pricing category
#[derive(Debug, Clone)]
pub struct AmountCalculator {
    item_categories: HashMap<String, ItemCategory>,
    default_category: ItemCategory,
}

impl Default for AmountCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl AmountCalculator {
    /// Create a calculator preloaded with the standard item list
    pub fn new() -> Self {
        let mut calculator = Self {
            item_categories: HashMap::new(),
            default_category: ItemCategory::Standard,
        };

        calculator.setup_standard_items();
        calculator
    }

    fn setup_standard_items(&mut self) {
        let standard = [
            "Chilled Gots",
            "Chilled Scrape",
            "Guides",
            "Chilled Rolls",
            "Fire Bricks",
            "H Oil",
            "Magnese",
            "Chrome",
        ];
        let scrap = ["Black Scrape", "White Scrape", "Toka Scrape", "Pig Scrape"];

        for item in standard {
            self.item_categories
                .insert(item.to_string(), ItemCategory::Standard);
        }
        for item in scrap {
            self.item_categories
                .insert(item.to_string(), ItemCategory::Scrap);
        }
    }

    /// Register or re-categorize an item
    pub fn set_item_category(&mut self, item: String, category: ItemCategory) {
        self.item_categories.insert(item, category);
    }

    /// Category for an item; unknown items use the default category
    pub fn category_for(&self, item: &str) -> ItemCategory {
        self.item_categories
            .get(item.trim())
            .copied()
            .unwrap_or(self.default_category)
    }

    /// Known item names, sorted
    pub fn items(&self) -> Vec<&str> {
        let mut items: Vec<&str> = self.item_categories.keys().map(String::as_str).collect();
        items.sort_unstable();
        items
    }

    /// Full calculation for an item line
    pub fn calculate(
        &self,
        item: &str,
        weight: BigDecimal,
        rate: BigDecimal,
    ) -> LedgerResult<AmountCalculation> {
        AmountCalculation::calculate(item.to_string(), self.category_for(item), weight, rate)
    }

    /// Line amount for an item
    pub fn amount(
        &self,
        item: &str,
        weight: BigDecimal,
        rate: BigDecimal,
    ) -> LedgerResult<BigDecimal> {
        Ok(self.calculate(item, weight, rate)?.amount)
    }

    /// Line amount from form text such as `"1,200"` and `"Rs. 55.5"`
    pub fn amount_from_text(
        &self,
        item: &str,
        weight: &str,
        rate: &str,
    ) -> LedgerResult<BigDecimal> {
        let weight = parse_form_number(weight, "weight")?;
        let rate = parse_form_number(rate, "rate")?;
        self.amount(item, weight, rate)
    }
}

/// Strict number parsing for user-entered values: separators and a leading
/// currency label are allowed, anything else is an error
fn parse_form_number(text: &str, field: &str) -> LedgerResult<BigDecimal> {
    let trimmed = text.trim();
    let unlabelled = ["Rs.", "Rs", "PKR"]
        .iter()
        .find_map(|label| trimmed.strip_prefix(label))
        .unwrap_or(trimmed);
    let cleaned: String = unlabelled.trim().chars().filter(|c| *c != ',').collect();

    if cleaned.is_empty() {
        return Err(LedgerError::Pricing(format!("Missing {}", field)));
    }

    BigDecimal::from_str(&cleaned)
        .map_err(|_| LedgerError::Pricing(format!("Invalid {}: '{}'", field, text)))
}
