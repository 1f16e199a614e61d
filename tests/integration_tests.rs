//! Integration tests for lending-core

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use lending_core::{
    utils::MemoryStorage, CollectionLine, CustomerPatch, CustomerStatus, DailyEntryPatch,
    EntryRange, ExpenseFilter, LendingError, LoanBook, NewCustomer, NewDailyEntry, NewExpense,
    PaymentMode, PaymentStatus,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn registration(name: &str, phone: &str, line: CollectionLine) -> NewCustomer {
    NewCustomer {
        customer_number: None,
        name: name.to_string(),
        area_name: "Market Road".to_string(),
        phone_number: phone.to_string(),
        amount_given: BigDecimal::from(5000),
        interest_amount: BigDecimal::from(500),
        document_charge: BigDecimal::from(100),
        number_of_weeks: None,
        start_date: date(2024, 1, 1),
        collection_line: line,
    }
}

fn daily_entry(line: CollectionLine, collected: i64, expenses: i64) -> NewDailyEntry {
    NewDailyEntry {
        entry_date: date(2024, 1, 8),
        collection_line: line,
        target_amount: BigDecimal::from(550),
        total_collected: BigDecimal::from(collected),
        expenses: BigDecimal::from(expenses),
        new_loans_given: 1,
        new_loans_amount: BigDecimal::from(5000),
        document_charges: BigDecimal::from(100),
        completed_loans: 0,
    }
}

#[tokio::test]
async fn test_complete_lending_workflow() {
    let storage = MemoryStorage::new();
    let mut book = LoanBook::new(storage);

    // Register two customers; numbers come from the roster count
    let ravi = book
        .register_customer(registration(
            "Ravi Kumar",
            "9876543210",
            CollectionLine::MondayMorning,
        ))
        .await
        .unwrap();
    let meena = book
        .register_customer(registration(
            "Meena Devi",
            "9876543211",
            CollectionLine::TuesdayMorning,
        ))
        .await
        .unwrap();

    assert_eq!(ravi.customer_number, "C0001");
    assert_eq!(meena.customer_number, "C0002");
    assert_eq!(ravi.total_amount, BigDecimal::from(5500));
    assert_eq!(ravi.end_date, date(2024, 3, 11));
    assert_eq!(ravi.status, CustomerStatus::Active);
    assert_eq!(book.weekly_due(&ravi), BigDecimal::from(550));

    // Week one collections
    book.record_payment(
        &ravi.id,
        date(2024, 1, 8),
        CollectionLine::MondayMorning,
        BigDecimal::from(550),
        PaymentMode::Cash,
    )
    .await
    .unwrap();
    book.record_payment(
        &meena.id,
        date(2024, 1, 9),
        CollectionLine::TuesdayMorning,
        BigDecimal::from(450),
        PaymentMode::Gpay,
    )
    .await
    .unwrap();

    // End-of-route entry for the Monday line
    book.save_daily_entry(daily_entry(CollectionLine::MondayMorning, 550, 200))
        .await
        .unwrap();

    let stats = book
        .period_stats(date(2024, 1, 1), date(2024, 1, 31), None)
        .await
        .unwrap();

    assert_eq!(stats.active_loans, 2);
    assert_eq!(stats.amount_collected, BigDecimal::from(1000));
    assert_eq!(stats.target_amount, BigDecimal::from(1100));
    assert_eq!(stats.collection_rate, 91);
    assert_eq!(stats.total_expenses, BigDecimal::from(200));
    assert_eq!(stats.collection_profit, BigDecimal::from(800));
    // Two customers, each 500 interest + 100 document charge
    assert_eq!(stats.new_loans_profit, BigDecimal::from(1200));
    assert_eq!(stats.total_profit, BigDecimal::from(2000));
    assert_eq!(stats.total_outstanding, BigDecimal::from(11000));
    assert_eq!(
        stats.line_amounts[&CollectionLine::MondayMorning],
        BigDecimal::from(5000)
    );
    assert_eq!(
        stats.line_amounts[&CollectionLine::WednesdayEvening],
        BigDecimal::from(0)
    );

    // Progress after one installment
    let progress = book.loan_progress(&ravi.id).await.unwrap();
    assert_eq!(progress.total_paid, BigDecimal::from(550));
    assert_eq!(progress.remaining, BigDecimal::from(4950));
    assert_eq!(progress.completed_weeks, 1);
    assert_eq!(progress.percent, BigDecimal::from(10));

    // Roster summaries cover all six routes
    let summaries = book.line_summaries().await.unwrap();
    assert_eq!(summaries.len(), 6);
    let monday = summaries
        .iter()
        .find(|s| s.line == CollectionLine::MondayMorning)
        .unwrap();
    assert_eq!(monday.customers, 1);
    assert_eq!(monday.weekly_target, BigDecimal::from(550));
}

#[tokio::test]
async fn test_record_payment_upserts_on_customer_and_date() {
    let storage = MemoryStorage::new();
    let mut book = LoanBook::new(storage);

    let customer = book
        .register_customer(registration(
            "Ravi Kumar",
            "9876543210",
            CollectionLine::MondayMorning,
        ))
        .await
        .unwrap();

    let first = book
        .record_payment(
            &customer.id,
            date(2024, 1, 8),
            CollectionLine::MondayMorning,
            BigDecimal::from(275),
            PaymentMode::Cash,
        )
        .await
        .unwrap();
    assert_eq!(first.payment_status, PaymentStatus::Partial);

    // Same customer and date again: the record is updated, not duplicated,
    // and the status is re-derived from the new amount
    let second = book
        .record_payment(
            &customer.id,
            date(2024, 1, 8),
            CollectionLine::MondayMorning,
            BigDecimal::from(550),
            PaymentMode::Gpay,
        )
        .await
        .unwrap();
    assert_eq!(second.id, first.id);
    assert_eq!(second.payment_status, PaymentStatus::Paid);
    assert_eq!(second.payment_mode, PaymentMode::Gpay);
    // Due amount stays what it was at creation
    assert_eq!(second.due_amount, BigDecimal::from(550));

    let day = book
        .collections_for_date_line(date(2024, 1, 8), CollectionLine::MondayMorning)
        .await
        .unwrap();
    assert_eq!(day.len(), 1);
    assert_eq!(day[0].amount_paid, BigDecimal::from(550));
}

#[tokio::test]
async fn test_payment_status_never_trusted_from_caller() {
    let storage = MemoryStorage::new();
    let mut book = LoanBook::new(storage);

    let customer = book
        .register_customer(registration(
            "Ravi Kumar",
            "9876543210",
            CollectionLine::MondayMorning,
        ))
        .await
        .unwrap();

    let pending = book
        .record_payment(
            &customer.id,
            date(2024, 1, 8),
            CollectionLine::MondayMorning,
            BigDecimal::from(0),
            PaymentMode::Cash,
        )
        .await
        .unwrap();
    assert_eq!(pending.payment_status, PaymentStatus::Pending);

    let negative = book
        .record_payment(
            &customer.id,
            date(2024, 1, 8),
            CollectionLine::MondayMorning,
            BigDecimal::from(-10),
            PaymentMode::Cash,
        )
        .await;
    assert!(matches!(negative, Err(LendingError::Validation(_))));
}

#[tokio::test]
async fn test_full_repayment_does_not_change_status() {
    let storage = MemoryStorage::new();
    let mut book = LoanBook::new(storage);

    let customer = book
        .register_customer(registration(
            "Ravi Kumar",
            "9876543210",
            CollectionLine::MondayMorning,
        ))
        .await
        .unwrap();

    book.record_payment(
        &customer.id,
        date(2024, 1, 8),
        CollectionLine::MondayMorning,
        BigDecimal::from(5500),
        PaymentMode::BankTransfer,
    )
    .await
    .unwrap();

    let progress = book.loan_progress(&customer.id).await.unwrap();
    assert!(progress.is_completed);

    // Completion is a manual roster update, not a side effect
    let reloaded = book.get_customer(&customer.id).await.unwrap().unwrap();
    assert_eq!(reloaded.status, CustomerStatus::Active);

    let completed = book
        .update_customer(
            &customer.id,
            CustomerPatch {
                status: Some(CustomerStatus::Completed),
                ..CustomerPatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(completed.status, CustomerStatus::Completed);

    // Transitions are unrestricted, including back to active
    let reopened = book
        .update_customer(
            &customer.id,
            CustomerPatch {
                status: Some(CustomerStatus::Active),
                ..CustomerPatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(reopened.status, CustomerStatus::Active);
}

#[tokio::test]
async fn test_duplicate_daily_entries_double_count() {
    let storage = MemoryStorage::new();
    let mut book = LoanBook::new(storage);

    book.register_customer(registration(
        "Ravi Kumar",
        "9876543210",
        CollectionLine::MondayMorning,
    ))
    .await
    .unwrap();

    // Saving the same summary twice creates two rows
    book.save_daily_entry(daily_entry(CollectionLine::MondayMorning, 550, 100))
        .await
        .unwrap();
    book.save_daily_entry(daily_entry(CollectionLine::MondayMorning, 550, 100))
        .await
        .unwrap();

    let entries = book
        .list_daily_entries(&EntryRange::between(date(2024, 1, 8), date(2024, 1, 8)))
        .await
        .unwrap();
    assert_eq!(entries.len(), 2);

    let stats = book
        .period_stats(date(2024, 1, 8), date(2024, 1, 8), None)
        .await
        .unwrap();
    assert_eq!(stats.total_expenses, BigDecimal::from(200));
    assert_eq!(stats.new_loans_given, 2);
}

#[tokio::test]
async fn test_daily_entry_update_and_lookup() {
    let storage = MemoryStorage::new();
    let mut book = LoanBook::new(storage);

    let entry = book
        .save_daily_entry(daily_entry(CollectionLine::MondayMorning, 550, 100))
        .await
        .unwrap();

    let found = book
        .daily_entry_for(date(2024, 1, 8), CollectionLine::MondayMorning)
        .await
        .unwrap();
    assert_eq!(found.map(|e| e.id), Some(entry.id.clone()));

    let updated = book
        .update_daily_entry(
            &entry.id,
            DailyEntryPatch {
                expenses: Some(BigDecimal::from(250)),
                ..DailyEntryPatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.expenses, BigDecimal::from(250));
    // Untouched fields survive the patch
    assert_eq!(updated.total_collected, BigDecimal::from(550));

    let missing = book
        .update_daily_entry("missing", DailyEntryPatch::default())
        .await;
    assert!(matches!(missing, Err(LendingError::EntryNotFound(_))));
}

#[tokio::test]
async fn test_validation_reports_every_failing_field() {
    let storage = MemoryStorage::new();
    let mut book = LoanBook::new(storage);

    let mut input = registration("", "12345", CollectionLine::MondayMorning);
    input.amount_given = BigDecimal::from(0);

    let error = book.register_customer(input).await.unwrap_err();
    match error {
        LendingError::Validation(errors) => {
            let fields: Vec<&str> = errors.0.iter().map(|e| e.field).collect();
            assert!(fields.contains(&"name"));
            assert!(fields.contains(&"phone_number"));
            assert!(fields.contains(&"amount_given"));
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_explicit_customer_numbers() {
    let storage = MemoryStorage::new();
    let mut book = LoanBook::new(storage);

    let mut input = registration("Ravi Kumar", "9876543210", CollectionLine::MondayMorning);
    input.customer_number = Some("C0100".to_string());
    let customer = book.register_customer(input).await.unwrap();
    assert_eq!(customer.customer_number, "C0100");

    let found = book.get_customer_by_number("C0100").await.unwrap();
    assert_eq!(found.map(|c| c.id), Some(customer.id));

    // Reusing a number is rejected as a field error
    let mut duplicate = registration("Meena Devi", "9876543211", CollectionLine::MondayMorning);
    duplicate.customer_number = Some("C0100".to_string());
    let error = book.register_customer(duplicate).await.unwrap_err();
    assert!(matches!(error, LendingError::Validation(_)));
}

#[tokio::test]
async fn test_collection_delete_and_not_found() {
    let storage = MemoryStorage::new();
    let mut book = LoanBook::new(storage);

    let customer = book
        .register_customer(registration(
            "Ravi Kumar",
            "9876543210",
            CollectionLine::MondayMorning,
        ))
        .await
        .unwrap();

    let collection = book
        .record_payment(
            &customer.id,
            date(2024, 1, 8),
            CollectionLine::MondayMorning,
            BigDecimal::from(550),
            PaymentMode::Cash,
        )
        .await
        .unwrap();

    book.delete_collection(&collection.id).await.unwrap();
    assert!(book.get_collection(&collection.id).await.unwrap().is_none());

    let again = book.delete_collection(&collection.id).await;
    assert!(matches!(again, Err(LendingError::CollectionNotFound(_))));
}

#[tokio::test]
async fn test_expense_batches() {
    let storage = MemoryStorage::new();
    let mut book = LoanBook::new(storage);

    let batch = book
        .record_expenses(vec![
            NewExpense {
                date: date(2024, 1, 8),
                collection_line: CollectionLine::MondayMorning,
                category: "fuel".to_string(),
                amount: BigDecimal::from(120),
                description: "Bike petrol".to_string(),
            },
            NewExpense {
                date: date(2024, 1, 8),
                collection_line: CollectionLine::MondayMorning,
                category: "tea".to_string(),
                amount: BigDecimal::from(30),
                description: "Customer visits".to_string(),
            },
        ])
        .await
        .unwrap();

    assert_eq!(batch.expenses.len(), 2);
    assert_eq!(batch.total_amount, BigDecimal::from(150));

    let listed = book
        .list_expenses(&ExpenseFilter {
            date: Some(date(2024, 1, 8)),
            line: Some(CollectionLine::MondayMorning),
        })
        .await
        .unwrap();
    assert_eq!(listed.len(), 2);

    let other_day = book
        .list_expenses(&ExpenseFilter {
            date: Some(date(2024, 1, 9)),
            line: None,
        })
        .await
        .unwrap();
    assert!(other_day.is_empty());

    // A non-positive amount rejects the whole batch
    let rejected = book
        .record_expenses(vec![NewExpense {
            date: date(2024, 1, 8),
            collection_line: CollectionLine::MondayMorning,
            category: "misc".to_string(),
            amount: BigDecimal::from(0),
            description: String::new(),
        }])
        .await;
    assert!(matches!(rejected, Err(LendingError::Validation(_))));
}

#[tokio::test]
async fn test_entry_reconciliation_against_ledger() {
    let storage = MemoryStorage::new();
    let mut book = LoanBook::new(storage);

    let customer = book
        .register_customer(registration(
            "Ravi Kumar",
            "9876543210",
            CollectionLine::MondayMorning,
        ))
        .await
        .unwrap();

    book.record_payment(
        &customer.id,
        date(2024, 1, 8),
        CollectionLine::MondayMorning,
        BigDecimal::from(550),
        PaymentMode::Cash,
    )
    .await
    .unwrap();

    let entry = book
        .save_daily_entry(daily_entry(CollectionLine::MondayMorning, 550, 0))
        .await
        .unwrap();

    let consistent = book.reconcile_daily_entry(&entry.id).await.unwrap();
    assert!(consistent.is_consistent);

    // The typed-in total drifts from the rows behind it
    book.update_daily_entry(
        &entry.id,
        DailyEntryPatch {
            total_collected: Some(BigDecimal::from(700)),
            ..DailyEntryPatch::default()
        },
    )
    .await
    .unwrap();

    let drifted = book.reconcile_daily_entry(&entry.id).await.unwrap();
    assert!(!drifted.is_consistent);
    assert_eq!(drifted.difference, BigDecimal::from(150));
}

#[tokio::test]
async fn test_memory_storage_composite_lookups() {
    use lending_core::LendingStorage;

    let storage = MemoryStorage::new();
    let mut book = LoanBook::new(storage.clone());

    let customer = book
        .register_customer(registration(
            "Ravi Kumar",
            "9876543210",
            CollectionLine::MondayMorning,
        ))
        .await
        .unwrap();
    book.record_payment(
        &customer.id,
        date(2024, 1, 8),
        CollectionLine::MondayMorning,
        BigDecimal::from(550),
        PaymentMode::Cash,
    )
    .await
    .unwrap();
    book.save_daily_entry(daily_entry(CollectionLine::MondayMorning, 550, 100))
        .await
        .unwrap();

    // Composite-key lookups behind the upsert contract
    let found = storage
        .find_collection(&customer.id, date(2024, 1, 8))
        .await
        .unwrap();
    assert!(found.is_some());
    assert!(storage
        .find_collection(&customer.id, date(2024, 1, 9))
        .await
        .unwrap()
        .is_none());

    let entry = storage
        .find_daily_entry(date(2024, 1, 8), CollectionLine::MondayMorning)
        .await
        .unwrap();
    assert!(entry.is_some());
    assert!(storage
        .find_daily_entry(date(2024, 1, 8), CollectionLine::MondayEvening)
        .await
        .unwrap()
        .is_none());

    storage.clear();
    assert!(storage.list_customers().await.unwrap().is_empty());
}

#[test]
fn test_wire_format_matches_storage_keys() {
    let line = serde_json::to_value(CollectionLine::WednesdayEvening).unwrap();
    assert_eq!(line, serde_json::json!("wednesday-evening"));

    let mode = serde_json::to_value(PaymentMode::BankTransfer).unwrap();
    assert_eq!(mode, serde_json::json!("bank_transfer"));

    let status = serde_json::to_value(PaymentStatus::Partial).unwrap();
    assert_eq!(status, serde_json::json!("partial"));

    // Money crosses the boundary as decimal text
    let amount = serde_json::to_value(BigDecimal::from(5500)).unwrap();
    assert_eq!(amount, serde_json::json!("5500"));

    let parsed: CollectionLine = serde_json::from_str("\"monday-morning\"").unwrap();
    assert_eq!(parsed, CollectionLine::MondayMorning);
}
