//! Traits for storage abstraction and extensibility

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::*;

/// Query filter for daily collection records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionFilter {
    /// Inclusive lower bound on the collection date
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound on the collection date
    pub end_date: Option<NaiveDate>,
    pub line: Option<CollectionLine>,
    pub customer_id: Option<String>,
}

impl CollectionFilter {
    /// Records for one route on one date (the collection-day roster view)
    pub fn for_date_and_line(date: NaiveDate, line: CollectionLine) -> Self {
        Self {
            start_date: Some(date),
            end_date: Some(date),
            line: Some(line),
            customer_id: None,
        }
    }

    /// All records for one customer
    pub fn for_customer(customer_id: impl Into<String>) -> Self {
        Self {
            customer_id: Some(customer_id.into()),
            ..Self::default()
        }
    }

    /// Records in a date range, optionally scoped to one route
    pub fn for_period(start: NaiveDate, end: NaiveDate, line: Option<CollectionLine>) -> Self {
        Self {
            start_date: Some(start),
            end_date: Some(end),
            line,
            customer_id: None,
        }
    }
}

/// Inclusive date range for daily entry queries; open bounds match everything
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl EntryRange {
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }
}

/// Query filter for logged expenses
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseFilter {
    pub date: Option<NaiveDate>,
    pub line: Option<CollectionLine>,
}

/// Storage abstraction for the lending system
///
/// This trait allows the lending core to work with any storage backend
/// (PostgreSQL, MySQL, SQLite, in-memory, etc.) by implementing these methods.
#[async_trait]
pub trait LendingStorage: Send + Sync {
    /// Save a customer to storage
    async fn save_customer(&mut self, customer: &Customer) -> LendingResult<()>;

    /// Get a customer by ID
    async fn get_customer(&self, customer_id: &str) -> LendingResult<Option<Customer>>;

    /// Get a customer by their human-facing number
    async fn get_customer_by_number(&self, customer_number: &str)
        -> LendingResult<Option<Customer>>;

    /// List all customers
    async fn list_customers(&self) -> LendingResult<Vec<Customer>>;

    /// List the active customers on one collection line
    async fn list_customers_by_line(&self, line: CollectionLine) -> LendingResult<Vec<Customer>>;

    /// Update a customer record
    async fn update_customer(&mut self, customer: &Customer) -> LendingResult<()>;

    /// Save a daily collection record
    async fn save_collection(&mut self, collection: &DailyCollection) -> LendingResult<()>;

    /// Get a collection record by ID
    async fn get_collection(&self, collection_id: &str) -> LendingResult<Option<DailyCollection>>;

    /// Composite-key lookup: the collection record for one customer on one
    /// date, of which there is at most one under the upsert contract
    async fn find_collection(
        &self,
        customer_id: &str,
        date: NaiveDate,
    ) -> LendingResult<Option<DailyCollection>>;

    /// List collection records matching a filter
    async fn list_collections(
        &self,
        filter: &CollectionFilter,
    ) -> LendingResult<Vec<DailyCollection>>;

    /// Update a collection record
    async fn update_collection(&mut self, collection: &DailyCollection) -> LendingResult<()>;

    /// Delete a collection record
    async fn delete_collection(&mut self, collection_id: &str) -> LendingResult<()>;

    /// Save a daily entry; duplicates per (date, line) are allowed
    async fn save_daily_entry(&mut self, entry: &DailyEntry) -> LendingResult<()>;

    /// Get a daily entry by ID
    async fn get_daily_entry(&self, entry_id: &str) -> LendingResult<Option<DailyEntry>>;

    /// First daily entry for one route on one date, if any
    async fn find_daily_entry(
        &self,
        date: NaiveDate,
        line: CollectionLine,
    ) -> LendingResult<Option<DailyEntry>>;

    /// List daily entries in a date range, newest first
    async fn list_daily_entries(&self, range: &EntryRange) -> LendingResult<Vec<DailyEntry>>;

    /// Update a daily entry
    async fn update_daily_entry(&mut self, entry: &DailyEntry) -> LendingResult<()>;

    /// Save a batch of expenses
    async fn save_expenses(&mut self, expenses: &[Expense]) -> LendingResult<()>;

    /// List expenses matching a filter
    async fn list_expenses(&self, filter: &ExpenseFilter) -> LendingResult<Vec<Expense>>;
}

/// Trait for implementing custom customer validation rules
pub trait CustomerValidator: Send + Sync {
    /// Validate a registration input before any derivation runs
    fn validate_new_customer(&self, input: &NewCustomer) -> LendingResult<()>;

    /// Validate a partial update before it is applied
    fn validate_patch(&self, patch: &CustomerPatch) -> LendingResult<()>;
}

/// Trait for implementing custom payment validation rules
pub trait PaymentValidator: Send + Sync {
    /// Validate a payment amount before it is recorded
    fn validate_amount(&self, amount_paid: &BigDecimal) -> LendingResult<()>;
}

/// Default customer validator with the full field-level rules
pub struct DefaultCustomerValidator;

impl CustomerValidator for DefaultCustomerValidator {
    fn validate_new_customer(&self, input: &NewCustomer) -> LendingResult<()> {
        crate::utils::validation::validate_new_customer(input)
    }

    fn validate_patch(&self, patch: &CustomerPatch) -> LendingResult<()> {
        crate::utils::validation::validate_customer_patch(patch)
    }
}

/// Default payment validator: amounts may be zero (a visit with no payment)
/// but never negative
pub struct DefaultPaymentValidator;

impl PaymentValidator for DefaultPaymentValidator {
    fn validate_amount(&self, amount_paid: &BigDecimal) -> LendingResult<()> {
        if *amount_paid < BigDecimal::from(0) {
            return Err(LendingError::validation(
                "amount_paid",
                "Amount paid cannot be negative",
            ));
        }
        Ok(())
    }
}
