//! Balance sheet overview across all customers

use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};

use crate::types::*;

/// Closing balance of one customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerBalance {
    pub customer_name: String,
    /// Magnitude of the balance; the side is carried by `dr_cr`
    pub balance: BigDecimal,
    pub dr_cr: DrCr,
}

impl CustomerBalance {
    /// Create a balance entry; the amount is stored as a magnitude
    pub fn new(customer_name: String, balance: BigDecimal, dr_cr: DrCr) -> Self {
        Self {
            customer_name,
            balance: balance.abs(),
            dr_cr,
        }
    }

    /// Balance entry for a reconciled customer ledger
    pub fn from_summary(customer_name: String, summary: &CustomerSummary) -> Self {
        Self::new(
            customer_name,
            summary.final_balance.clone(),
            summary.final_dr_cr,
        )
    }
}

/// Overall position of the book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetPosition {
    #[serde(rename = "NET DR")]
    NetDr,
    #[serde(rename = "NET CR")]
    NetCr,
    #[serde(rename = "BALANCED")]
    Balanced,
}

/// DR/CR totals across every customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheet {
    pub balances: Vec<CustomerBalance>,
    pub total_dr: BigDecimal,
    pub total_cr: BigDecimal,
    /// |total DR - total CR|
    pub net_position: BigDecimal,
    pub status: NetPosition,
}

impl BalanceSheet {
    /// Build the overview from per-customer balances
    pub fn from_balances(balances: Vec<CustomerBalance>) -> Self {
        let side_total = |side: DrCr| -> BigDecimal {
            balances
                .iter()
                .filter(|b| b.dr_cr == side)
                .map(|b| b.balance.abs())
                .sum()
        };

        let total_dr = side_total(DrCr::Dr);
        let total_cr = side_total(DrCr::Cr);
        let net = &total_dr - &total_cr;

        let status = if net > BigDecimal::zero() {
            NetPosition::NetDr
        } else if net < BigDecimal::zero() {
            NetPosition::NetCr
        } else {
            NetPosition::Balanced
        };

        Self {
            balances,
            total_dr,
            total_cr,
            net_position: net.abs(),
            status,
        }
    }

    /// Customers with the largest absolute balances, largest first
    pub fn top(&self, n: usize) -> Vec<&CustomerBalance> {
        let mut ranked: Vec<&CustomerBalance> = self.balances.iter().collect();
        ranked.sort_by(|a, b| b.balance.abs().cmp(&a.balance.abs()));
        ranked.truncate(n);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balance(name: &str, amount: i64, dr_cr: DrCr) -> CustomerBalance {
        CustomerBalance::new(name.to_string(), BigDecimal::from(amount), dr_cr)
    }

    #[test]
    fn test_net_dr_position() {
        let sheet = BalanceSheet::from_balances(vec![
            balance("Akram Traders", 5000, DrCr::Dr),
            balance("Bilal Steel", 1500, DrCr::Cr),
            balance("Chaudhry & Sons", 500, DrCr::Dr),
        ]);

        assert_eq!(sheet.total_dr, BigDecimal::from(5500));
        assert_eq!(sheet.total_cr, BigDecimal::from(1500));
        assert_eq!(sheet.net_position, BigDecimal::from(4000));
        assert_eq!(sheet.status, NetPosition::NetDr);
    }

    #[test]
    fn test_net_cr_and_balanced() {
        let sheet = BalanceSheet::from_balances(vec![balance("Bilal Steel", 100, DrCr::Cr)]);
        assert_eq!(sheet.status, NetPosition::NetCr);
        assert_eq!(sheet.net_position, BigDecimal::from(100));

        let empty = BalanceSheet::from_balances(Vec::new());
        assert_eq!(empty.status, NetPosition::Balanced);
        assert_eq!(empty.net_position, BigDecimal::zero());
    }

    #[test]
    fn test_negative_amounts_are_stored_as_magnitudes() {
        let entry = balance("Akram Traders", -750, DrCr::Cr);
        assert_eq!(entry.balance, BigDecimal::from(750));
    }

    #[test]
    fn test_top_customers() {
        let sheet = BalanceSheet::from_balances(vec![
            balance("A", 10, DrCr::Dr),
            balance("B", 300, DrCr::Cr),
            balance("C", 20, DrCr::Dr),
        ]);

        let names: Vec<&str> = sheet
            .top(2)
            .iter()
            .map(|b| b.customer_name.as_str())
            .collect();
        assert_eq!(names, vec!["B", "C"]);
    }

    #[test]
    fn test_status_serializes_like_dashboard() {
        let value = serde_json::to_value(NetPosition::NetDr).unwrap();
        assert_eq!(value, "NET DR");
    }
}
