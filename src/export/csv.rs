//! CSV export of reconciled transactions
//!
//! One header row with the transaction field names, then one row per
//! transaction. Money is written as plain decimal text.

use csv::WriterBuilder;
use serde::Serialize;
use std::io::Write;

use crate::types::*;

/// Column order of the export
pub const CSV_HEADERS: [&str; 14] = [
    "sn",
    "date",
    "description",
    "item",
    "weightQty",
    "rate",
    "transactionType",
    "paymentMethod",
    "bankName",
    "chequeNo",
    "debit",
    "credit",
    "calculatedBalance",
    "calculatedDrCr",
];

#[derive(Serialize)]
struct CsvTransactionRow<'a> {
    sn: u32,
    date: &'a str,
    description: &'a str,
    item: &'a str,
    weight_qty: &'a str,
    rate: &'a str,
    transaction_type: &'a str,
    payment_method: &'a str,
    bank_name: &'a str,
    cheque_no: &'a str,
    debit: String,
    credit: String,
    calculated_balance: String,
    calculated_dr_cr: &'a str,
}

impl<'a> From<&'a Transaction> for CsvTransactionRow<'a> {
    fn from(txn: &'a Transaction) -> Self {
        Self {
            sn: txn.sn,
            date: &txn.date,
            description: &txn.description,
            item: &txn.item,
            weight_qty: &txn.weight_qty,
            rate: &txn.rate,
            transaction_type: &txn.transaction_type,
            payment_method: &txn.payment_method,
            bank_name: &txn.bank_name,
            cheque_no: &txn.cheque_no,
            debit: txn.debit.to_plain_string(),
            credit: txn.credit.to_plain_string(),
            calculated_balance: txn.calculated_balance.to_plain_string(),
            calculated_dr_cr: txn.calculated_dr_cr.as_str(),
        }
    }
}

fn export_error(e: csv::Error) -> LedgerError {
    LedgerError::Export(e.to_string())
}

/// Write transactions as CSV; the header row is written even for an empty list
pub fn write_transactions<W: Write>(writer: W, transactions: &[Transaction]) -> LedgerResult<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);

    wtr.write_record(CSV_HEADERS).map_err(export_error)?;
    for txn in transactions {
        wtr.serialize(CsvTransactionRow::from(txn))
            .map_err(export_error)?;
    }

    wtr.flush().map_err(|e| LedgerError::Export(e.to_string()))
}

/// Render transactions as a CSV string
pub fn transactions_to_csv_string(transactions: &[Transaction]) -> LedgerResult<String> {
    let mut buffer = Vec::new();
    write_transactions(&mut buffer, transactions)?;
    String::from_utf8(buffer).map_err(|e| LedgerError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::normalize::parse_money_text;
    use crate::ledger::reconcile;
    use serde_json::json;

    #[test]
    fn test_empty_export_has_header() {
        let csv = transactions_to_csv_string(&[]).unwrap();
        assert_eq!(
            csv,
            "sn,date,description,item,weightQty,rate,transactionType,paymentMethod,bankName,chequeNo,debit,credit,calculatedBalance,calculatedDrCr\n"
        );
    }

    #[test]
    fn test_export_rows() {
        let rows = RawTransactionRow::list_from_json(json!([
            {"sn": 1, "date": "2024-01-01", "description": "Sale, chrome", "item": "Chrome",
             "weightQty": "10", "rate": "50", "transactionType": "Sale", "debit": "500"},
            {"sn": 2, "date": "2024-01-02", "description": "Payment", "paymentMethod": "Cash",
             "credit": "800"}
        ]))
        .unwrap();
        let result = reconcile(&rows);

        let csv = transactions_to_csv_string(&result.transactions).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "1,2024-01-01,\"Sale, chrome\",Chrome,10,50,Sale,-,-,-,500,0,500,DR"
        );
        assert_eq!(lines[2], "2,2024-01-02,Payment,,,,-,Cash,-,-,0,800,300,CR");
    }

    #[test]
    fn test_export_never_uses_exponent_notation() {
        let rows = RawTransactionRow::list_from_json(json!([
            {"sn": 1, "date": "2024-01-01", "description": "Big", "debit": 1.5e21},
            {"sn": 2, "date": "2024-01-02", "description": "Tiny", "credit": 1e-7}
        ]))
        .unwrap();
        let result = reconcile(&rows);

        let csv = transactions_to_csv_string(&result.transactions).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[1],
            "1,2024-01-01,Big,,,,-,-,-,-,1500000000000000000000,0,1500000000000000000000,DR"
        );
        assert_eq!(
            lines[2],
            "2,2024-01-02,Tiny,,,,-,-,-,-,0,0.0000001,1499999999999999999999.9999999,DR"
        );

        // Exported cells read back to the same amounts
        let cells: Vec<&str> = lines[2].split(',').collect();
        assert_eq!(parse_money_text(cells[11]), result.transactions[1].credit);
        assert_eq!(
            parse_money_text(cells[12]),
            result.transactions[1].calculated_balance
        );
    }
}
