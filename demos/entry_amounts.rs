//! Entry amount examples: weight x rate pricing for standard and scrap items

use bigdecimal::BigDecimal;
use erp_ledger_core::{AmountCalculator, ItemCategory, KG_PER_MAUND};
use std::str::FromStr;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("⚖️  ERP Ledger Core - Entry Amount Examples\n");

    let mut calculator = AmountCalculator::new();

    // 1. Known items and how they are priced
    println!("📦 Items:");
    for item in calculator.items() {
        println!("  {:<16} {:?}", item, calculator.category_for(item));
    }
    println!();

    // 2. Standard item: amount = weight x rate
    let chrome = calculator.calculate("Chrome", BigDecimal::from(250), BigDecimal::from(40))?;
    println!("🔩 Chrome: {} x Rs. {} = Rs. {}", chrome.weight, chrome.rate, chrome.amount);

    // 3. Scrap item: weight in kg, rate per maund
    let scrap = calculator.calculate(
        "Black Scrape",
        BigDecimal::from_str("746.48")?,
        BigDecimal::from(900),
    )?;
    println!(
        "♻️  Black Scrape: {} kg / {} x Rs. {} = Rs. {}",
        scrap.weight, KG_PER_MAUND, scrap.rate, scrap.amount
    );

    // 4. Form input with separators and currency labels
    let from_form = calculator.amount_from_text("Fire Bricks", "1,200", "Rs. 12.5")?;
    println!("🧱 Fire Bricks from form text: Rs. {}", from_form);

    // 5. Registering a new scrap item
    calculator.set_item_category("Copper Scrape".to_string(), ItemCategory::Scrap);
    let copper = calculator.amount("Copper Scrape", BigDecimal::from(100), BigDecimal::from(3000))?;
    println!("🟠 Copper Scrape (registered as scrap): Rs. {}", copper);

    // 6. Invalid input is reported, not guessed
    match calculator.amount_from_text("Chrome", "ten", "40") {
        Ok(amount) => println!("Unexpected amount: {}", amount),
        Err(e) => println!("❌ {}", e),
    }

    Ok(())
}
