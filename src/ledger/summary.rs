//! Per-customer summary aggregation

use bigdecimal::BigDecimal;

use crate::types::*;

/// Reduce an annotated transaction list into its [`CustomerSummary`].
///
/// Totals do not depend on the sign convention; the final balance is whatever
/// the running balance says for the last row.
pub fn summarize(transactions: &[Transaction]) -> CustomerSummary {
    let Some(last) = transactions.last() else {
        return CustomerSummary::default();
    };

    let total_debit: BigDecimal = transactions.iter().map(|t| &t.debit).sum();
    let total_credit: BigDecimal = transactions.iter().map(|t| &t.credit).sum();

    let net_dr_cr = if total_debit >= total_credit {
        DrCr::Dr
    } else {
        DrCr::Cr
    };
    let net_balance = (&total_debit - &total_credit).abs();

    CustomerSummary {
        total_debit,
        total_credit,
        final_balance: last.calculated_balance.clone(),
        final_dr_cr: last.calculated_dr_cr,
        transaction_count: transactions.len(),
        net_balance,
        net_dr_cr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReconcilerConfig;
    use crate::ledger::balance::apply_running_balance;
    use bigdecimal::Zero;

    fn txn(debit: i64, credit: i64) -> Transaction {
        Transaction {
            sn: 1,
            date: "2024-02-01".to_string(),
            description: "Entry".to_string(),
            item: String::new(),
            weight_qty: String::new(),
            rate: String::new(),
            transaction_type: "-".to_string(),
            payment_method: "-".to_string(),
            bank_name: "-".to_string(),
            cheque_no: "-".to_string(),
            debit: BigDecimal::from(debit),
            credit: BigDecimal::from(credit),
            balance: BigDecimal::zero(),
            calculated_balance: BigDecimal::zero(),
            calculated_dr_cr: DrCr::Dr,
        }
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize(&[]);

        assert_eq!(summary.total_debit, BigDecimal::zero());
        assert_eq!(summary.total_credit, BigDecimal::zero());
        assert_eq!(summary.final_balance, BigDecimal::zero());
        assert_eq!(summary.final_dr_cr, DrCr::Dr);
        assert_eq!(summary.transaction_count, 0);
        assert_eq!(summary.net_balance, BigDecimal::zero());
        assert_eq!(summary.net_dr_cr, DrCr::Dr);
    }

    #[test]
    fn test_summary_totals() {
        let config = ReconcilerConfig::default();
        let mut transactions = vec![txn(1200, 0), txn(0, 200), txn(300, 0), txn(0, 2000)];
        apply_running_balance(&mut transactions, &config);

        let summary = summarize(&transactions);

        assert_eq!(summary.total_debit, BigDecimal::from(1500));
        assert_eq!(summary.total_credit, BigDecimal::from(2200));
        assert_eq!(summary.net_balance, BigDecimal::from(700));
        assert_eq!(summary.net_dr_cr, DrCr::Cr);
        assert_eq!(summary.final_balance, BigDecimal::from(700));
        assert_eq!(summary.final_dr_cr, DrCr::Cr);
        assert_eq!(summary.transaction_count, 4);
    }

    #[test]
    fn test_equal_totals_are_dr() {
        let summary = summarize(&[txn(500, 0), txn(0, 500)]);
        assert_eq!(summary.net_balance, BigDecimal::zero());
        assert_eq!(summary.net_dr_cr, DrCr::Dr);
    }

    #[test]
    fn test_summary_serializes_with_ledger_keys() {
        let value = serde_json::to_value(summarize(&[])).unwrap();
        assert_eq!(value["finalDRCR"], "DR");
        assert_eq!(value["netDRCR"], "DR");
        assert_eq!(value["transactionCount"], 0);
    }
}
