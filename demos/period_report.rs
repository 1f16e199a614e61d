//! Period statistics and reconciliation example

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use lending_core::utils::MemoryStorage;
use lending_core::{CollectionLine, LoanBook, NewCustomer, NewDailyEntry, PaymentMode};

fn registration(name: &str, phone: &str, line: CollectionLine, principal: i64) -> NewCustomer {
    NewCustomer {
        customer_number: None,
        name: name.to_string(),
        area_name: "Gandhi Nagar".to_string(),
        phone_number: phone.to_string(),
        amount_given: BigDecimal::from(principal),
        interest_amount: BigDecimal::from(principal / 10),
        document_charge: BigDecimal::from(100),
        number_of_weeks: None,
        start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        collection_line: line,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("📊 Lending Core - Period Report Example\n");

    let storage = MemoryStorage::new();
    let mut book = LoanBook::new(storage);

    // Seed a small roster across two routes
    let ravi = book
        .register_customer(registration(
            "Ravi Kumar",
            "9876543210",
            CollectionLine::MondayMorning,
            5000,
        ))
        .await?;
    let meena = book
        .register_customer(registration(
            "Meena Devi",
            "9876543211",
            CollectionLine::MondayMorning,
            10000,
        ))
        .await?;
    let arjun = book
        .register_customer(registration(
            "Arjun Raj",
            "9876543212",
            CollectionLine::ThursdayMorning,
            3000,
        ))
        .await?;

    // Monday's visits
    let monday = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
    for (customer, amount) in [(&ravi, 550), (&meena, 1100), (&arjun, 0)] {
        if amount > 0 {
            book.record_payment(
                &customer.id,
                monday,
                customer.collection_line,
                BigDecimal::from(amount),
                PaymentMode::Cash,
            )
            .await?;
        }
    }

    // End-of-route summary with the day's expenses
    let entry = book
        .save_daily_entry(NewDailyEntry {
            entry_date: monday,
            collection_line: CollectionLine::MondayMorning,
            target_amount: BigDecimal::from(1650),
            total_collected: BigDecimal::from(1650),
            expenses: BigDecimal::from(200),
            new_loans_given: 0,
            new_loans_amount: BigDecimal::from(0),
            document_charges: BigDecimal::from(0),
            completed_loans: 0,
        })
        .await?;

    // Pull the week's numbers
    let stats = book
        .period_stats(
            NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 14).unwrap(),
            None,
        )
        .await?;

    println!("Week of Jan 8:");
    println!("  Active loans:     {}", stats.active_loans);
    println!("  Collected:        ₹{}", stats.amount_collected);
    println!("  Target:           ₹{}", stats.target_amount);
    println!("  Collection rate:  {}%", stats.collection_rate);
    println!("  Expenses:         ₹{}", stats.total_expenses);
    println!("  Collection profit ₹{}", stats.collection_profit);
    println!("  New-loan profit:  ₹{}", stats.new_loans_profit);
    println!("  Total profit:     ₹{}", stats.total_profit);
    println!("  Outstanding:      ₹{}\n", stats.total_outstanding);

    println!("Principal out per route:");
    for route in CollectionLine::all() {
        println!(
            "  {:<20} ₹{}",
            route.display_name(),
            stats.line_amounts[&route]
        );
    }
    println!();

    // Does the typed-in summary match the recorded payments?
    let reconciliation = book.reconcile_daily_entry(&entry.id).await?;
    println!(
        "Reconciliation for {} on {}:",
        entry.collection_line.display_name(),
        entry.entry_date
    );
    println!("  Entry total:  ₹{}", reconciliation.recorded_total);
    println!("  Ledger total: ₹{}", reconciliation.ledger_total);
    if reconciliation.is_consistent {
        println!("  ✓ Consistent");
    } else {
        println!("  ✗ Off by ₹{}", reconciliation.difference);
    }

    Ok(())
}
