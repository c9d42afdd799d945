//! Running balance calculation over a normalized transaction sequence

use bigdecimal::{BigDecimal, Zero};

use crate::config::ReconcilerConfig;
use crate::types::*;

/// Annotate each transaction with the cumulative balance after it.
///
/// Rows are processed in the order given. A first row described as an opening
/// balance seeds the accumulator instead of moving it.
pub fn apply_running_balance(transactions: &mut [Transaction], config: &ReconcilerConfig) {
    let convention = config.sign_convention;
    let mut running = BigDecimal::zero();

    for (index, txn) in transactions.iter_mut().enumerate() {
        let movement = convention.movement(&txn.debit, &txn.credit);

        if index == 0 && config.is_opening_balance(&txn.description) {
            running = convention.opening_seed(&txn.balance, &movement);
        } else {
            running += movement;
        }

        txn.calculated_balance = running.abs();
        txn.calculated_dr_cr = convention.side(&running);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SignConvention;

    fn txn(description: &str, debit: i64, credit: i64, balance: i64) -> Transaction {
        Transaction {
            sn: 1,
            date: "2024-01-01".to_string(),
            description: description.to_string(),
            item: String::new(),
            weight_qty: String::new(),
            rate: String::new(),
            transaction_type: "-".to_string(),
            payment_method: "-".to_string(),
            bank_name: "-".to_string(),
            cheque_no: "-".to_string(),
            debit: BigDecimal::from(debit),
            credit: BigDecimal::from(credit),
            balance: BigDecimal::from(balance),
            calculated_balance: BigDecimal::zero(),
            calculated_dr_cr: DrCr::Dr,
        }
    }

    fn balances(transactions: &[Transaction]) -> Vec<(BigDecimal, DrCr)> {
        transactions
            .iter()
            .map(|t| (t.calculated_balance.clone(), t.calculated_dr_cr))
            .collect()
    }

    #[test]
    fn test_debit_increases_running_balance() {
        let config = ReconcilerConfig::with_convention(SignConvention::DebitIncreases);
        let mut transactions = vec![
            txn("Sale", 1000, 0, 0),
            txn("Payment", 0, 400, 0),
            txn("Payment", 0, 900, 0),
        ];

        apply_running_balance(&mut transactions, &config);

        assert_eq!(
            balances(&transactions),
            vec![
                (BigDecimal::from(1000), DrCr::Dr),
                (BigDecimal::from(600), DrCr::Dr),
                (BigDecimal::from(300), DrCr::Cr),
            ]
        );
    }

    #[test]
    fn test_credit_increases_with_opening_balance() {
        let config = ReconcilerConfig::with_convention(SignConvention::CreditIncreases);
        let mut transactions = vec![
            txn("Opening Balance", 0, 1000, 1000),
            txn("Sale", 500, 0, 0),
        ];

        apply_running_balance(&mut transactions, &config);

        assert_eq!(
            balances(&transactions),
            vec![
                (BigDecimal::from(1000), DrCr::Cr),
                (BigDecimal::from(500), DrCr::Cr),
            ]
        );
    }

    #[test]
    fn test_opening_balance_side_is_convention_independent() {
        let mut debit_first = vec![
            txn("Opening Balance", 0, 1000, 1000),
            txn("Sale", 500, 0, 0),
        ];
        let mut credit_first = debit_first.clone();

        apply_running_balance(
            &mut debit_first,
            &ReconcilerConfig::with_convention(SignConvention::DebitIncreases),
        );
        apply_running_balance(
            &mut credit_first,
            &ReconcilerConfig::with_convention(SignConvention::CreditIncreases),
        );

        assert_eq!(balances(&debit_first), balances(&credit_first));
    }

    #[test]
    fn test_opening_balance_seeds_from_balance_column() {
        let config = ReconcilerConfig::default();
        let mut transactions = vec![
            txn("Opening balance b/f", 0, 0, 2500),
            txn("Sale", 500, 0, 0),
        ];

        apply_running_balance(&mut transactions, &config);

        assert_eq!(transactions[0].calculated_balance, BigDecimal::from(2500));
        assert_eq!(transactions[0].calculated_dr_cr, DrCr::Dr);
        assert_eq!(transactions[1].calculated_balance, BigDecimal::from(3000));
    }

    #[test]
    fn test_opening_balance_only_seeds_first_row() {
        let config = ReconcilerConfig::default();
        let mut transactions = vec![
            txn("Sale", 100, 0, 0),
            txn("Opening Balance", 0, 0, 5000),
        ];

        apply_running_balance(&mut transactions, &config);

        assert_eq!(transactions[1].calculated_balance, BigDecimal::from(100));
    }

    #[test]
    fn test_reapplying_is_idempotent() {
        let config = ReconcilerConfig::default();
        let mut transactions = vec![
            txn("Opening Balance", 300, 0, 300),
            txn("Payment", 0, 700, 0),
        ];

        apply_running_balance(&mut transactions, &config);
        let first = transactions.clone();
        apply_running_balance(&mut transactions, &config);

        assert_eq!(first, transactions);
    }

    #[test]
    fn test_empty_sequence() {
        let config = ReconcilerConfig::default();
        let mut transactions: Vec<Transaction> = Vec::new();
        apply_running_balance(&mut transactions, &config);
        assert!(transactions.is_empty());
    }
}
