//! Customer ledger example: load a sheet, reconcile it, record entries, export

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use erp_ledger_core::export::csv::write_transactions;
use erp_ledger_core::utils::MemorySource;
use erp_ledger_core::{patterns, AmountCalculator, CustomerLedger, NewCustomer};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_target(false).init();

    println!("📒 ERP Ledger Core - Customer Ledger Example\n");

    // 1. A sheet as the API returns it, artifacts included
    let source = MemorySource::new();
    source.insert_json(
        "Akram Traders",
        json!([
            {"sn": "S.N", "date": "Date", "description": "Description", "debit": "Debit"},
            {"sn": "1", "date": "2024-01-01", "description": "Opening Balance",
             "debit": "Rs. 12,000", "credit": "-", "balance": "Rs. 12,000"},
            {"sn": "2", "date": "2024-01-04", "description": "Sale of chrome", "item": "Chrome",
             "weightQty": "250", "rate": "Rs. 40", "transactionType": "Sale/Purchase",
             "debit": "Rs. 10,000.00"},
            {"sn": "", "date": "-", "description": "", "item": "NaN", "rate": "Rs. NaN"},
            {"sn": "4", "date": "2024-01-10", "description": "Cash received",
             "paymentMethod": "Cash", "credit": "Rs. 15,000"}
        ]),
    )?;

    let mut ledger = CustomerLedger::new(source);

    // 2. Add a second customer through the write side
    ledger
        .create_customer(
            NewCustomer::new("Bilal Steel".to_string())
                .with_opening_balance(BigDecimal::from(-4500)),
        )
        .await?;
    println!("  ✓ Created customer: Bilal Steel (opening balance 4,500 CR)");

    // 3. Record entries priced by weight x rate
    let calculator = AmountCalculator::new();
    let sale = patterns::create_sale(
        "Akram Traders".to_string(),
        NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
        &calculator,
        "Black Scrape".to_string(),
        "746.48".to_string(),
        "900".to_string(),
    )?;
    println!("  ✓ Priced sale: {} kg Black Scrape = Rs. {}", sale.weight_qty, sale.amount);
    ledger.record_transaction(sale).await?;

    let cheque = patterns::create_cheque_received(
        "Bilal Steel".to_string(),
        NaiveDate::from_ymd_opt(2024, 1, 22).unwrap(),
        "Meezan Bank".to_string(),
        "118822".to_string(),
        BigDecimal::from(2000),
    )?;
    ledger.record_transaction(cheque).await?;
    println!("  ✓ Recorded cheque 118822 from Bilal Steel\n");

    // 4. Reconciled ledger for one customer
    let akram = ledger.load_customer("Akram Traders").await?;
    println!("🔍 Akram Traders ({} rows dropped):", akram.dropped_rows);
    for txn in &akram.transactions {
        println!(
            "  {:>2}  {}  {:<20} DR {:>10}  CR {:>10}  Bal {:>10} {}",
            txn.sn,
            txn.date,
            txn.description,
            txn.debit,
            txn.credit,
            txn.calculated_balance,
            txn.calculated_dr_cr
        );
    }
    let summary = &akram.summary;
    println!("  Total Debit:   Rs. {}", summary.total_debit);
    println!("  Total Credit:  Rs. {}", summary.total_credit);
    println!("  Net Balance:   Rs. {} {}", summary.net_balance, summary.net_dr_cr);
    println!("  Final Balance: Rs. {} {}\n", summary.final_balance, summary.final_dr_cr);

    // 5. Balance sheet across customers
    let sheet = ledger.reconciled_balance_sheet().await?;
    println!("📊 Balance Sheet:");
    for balance in sheet.top(10) {
        println!("  {:<20} Rs. {:>12} {}", balance.customer_name, balance.balance, balance.dr_cr);
    }
    println!("  Total DR: Rs. {}", sheet.total_dr);
    println!("  Total CR: Rs. {}", sheet.total_cr);
    println!("  Net:      Rs. {} ({:?})\n", sheet.net_position, sheet.status);

    // 6. CSV export
    println!("📄 CSV export:");
    write_transactions(std::io::stdout(), &akram.transactions)?;

    Ok(())
}
