//! Basic loan book usage example

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use lending_core::utils::MemoryStorage;
use lending_core::{CollectionLine, LoanBook, NewCustomer, PaymentMode};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("💰 Lending Core - Basic Workflow Example\n");

    // Create a new loan book with in-memory storage
    let storage = MemoryStorage::new();
    let mut book = LoanBook::new(storage);

    // 1. Register a customer
    println!("📋 Registering a customer...");
    let customer = book
        .register_customer(NewCustomer {
            customer_number: None,
            name: "Ravi Kumar".to_string(),
            area_name: "Market Road".to_string(),
            phone_number: "9876543210".to_string(),
            amount_given: BigDecimal::from(5000),
            interest_amount: BigDecimal::from(500),
            document_charge: BigDecimal::from(100),
            number_of_weeks: None,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            collection_line: CollectionLine::MondayMorning,
        })
        .await?;

    println!(
        "  ✓ {} ({}) on {} — total ₹{}, weekly ₹{}, until {}\n",
        customer.name,
        customer.customer_number,
        customer.collection_line.display_name(),
        customer.total_amount,
        book.weekly_due(&customer),
        customer.end_date
    );

    // 2. Record the first three weekly visits
    println!("🚶 Recording collection visits...");
    let visits = [
        (NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(), 550, PaymentMode::Cash),
        (NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(), 275, PaymentMode::Gpay),
        (NaiveDate::from_ymd_opt(2024, 1, 22).unwrap(), 0, PaymentMode::Cash),
    ];

    for (date, amount, mode) in visits {
        let collection = book
            .record_payment(
                &customer.id,
                date,
                customer.collection_line,
                BigDecimal::from(amount),
                mode,
            )
            .await?;
        println!(
            "  ✓ {}: paid ₹{} of ₹{} ({:?})",
            date, collection.amount_paid, collection.due_amount, collection.payment_status
        );
    }
    println!();

    // 3. The customer settles the missed week later the same day
    println!("🔁 Correcting the pending visit...");
    let corrected = book
        .record_payment(
            &customer.id,
            NaiveDate::from_ymd_opt(2024, 1, 22).unwrap(),
            customer.collection_line,
            BigDecimal::from(550),
            PaymentMode::Cash,
        )
        .await?;
    println!(
        "  ✓ Same record updated in place, now {:?}\n",
        corrected.payment_status
    );

    // 4. Check repayment progress
    let progress = book.loan_progress(&customer.id).await?;
    println!("📈 Progress:");
    println!("  Paid:      ₹{}", progress.total_paid);
    println!("  Remaining: ₹{}", progress.remaining);
    println!("  Weeks:     {}/10", progress.completed_weeks);
    println!("  Percent:   {}%", progress.percent);

    Ok(())
}
