//! Main loan book orchestrator that coordinates customers and collections

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::book::{CollectionManager, CustomerManager};
use crate::reconciliation::EntryReconciliation;
use crate::reports::{LineSummary, PeriodStats};
use crate::schedule::LoanProgress;
use crate::traits::*;
use crate::types::*;

/// Main loan book that orchestrates all lending operations
pub struct LoanBook<S: LendingStorage> {
    customer_manager: CustomerManager<S>,
    collection_manager: CollectionManager<S>,
}

impl<S: LendingStorage + Clone> LoanBook<S> {
    /// Create a new loan book with the given storage backend
    pub fn new(storage: S) -> Self {
        Self {
            customer_manager: CustomerManager::new(storage.clone()),
            collection_manager: CollectionManager::new(storage),
        }
    }

    /// Create a new loan book with custom validators
    pub fn with_validators(
        storage: S,
        customer_validator: Box<dyn CustomerValidator>,
        payment_validator: Box<dyn PaymentValidator>,
    ) -> Self {
        Self {
            customer_manager: CustomerManager::with_validator(storage.clone(), customer_validator),
            collection_manager: CollectionManager::with_validator(storage, payment_validator),
        }
    }

    // Customer operations
    /// Register a new customer
    pub async fn register_customer(&mut self, input: NewCustomer) -> LendingResult<Customer> {
        self.customer_manager.register_customer(input).await
    }

    /// Get a customer by ID
    pub async fn get_customer(&self, customer_id: &str) -> LendingResult<Option<Customer>> {
        self.customer_manager.get_customer(customer_id).await
    }

    /// Get a customer by their human-facing number
    pub async fn get_customer_by_number(
        &self,
        customer_number: &str,
    ) -> LendingResult<Option<Customer>> {
        self.customer_manager
            .get_customer_by_number(customer_number)
            .await
    }

    /// List all customers
    pub async fn list_customers(&self) -> LendingResult<Vec<Customer>> {
        self.customer_manager.list_customers().await
    }

    /// List the active customers on one collection line
    pub async fn list_customers_by_line(
        &self,
        line: CollectionLine,
    ) -> LendingResult<Vec<Customer>> {
        self.customer_manager.list_customers_by_line(line).await
    }

    /// Apply a partial update to a customer
    pub async fn update_customer(
        &mut self,
        customer_id: &str,
        patch: CustomerPatch,
    ) -> LendingResult<Customer> {
        self.customer_manager.update_customer(customer_id, patch).await
    }

    /// The installment owed per collection visit for a customer
    pub fn weekly_due(&self, customer: &Customer) -> BigDecimal {
        self.customer_manager.weekly_due(customer)
    }

    /// Repayment progress for one customer
    pub async fn loan_progress(&self, customer_id: &str) -> LendingResult<LoanProgress> {
        self.customer_manager.loan_progress(customer_id).await
    }

    // Collection operations
    /// Record a payment for a customer on a collection date (upsert)
    pub async fn record_payment(
        &mut self,
        customer_id: &str,
        date: NaiveDate,
        line: CollectionLine,
        amount_paid: BigDecimal,
        payment_mode: PaymentMode,
    ) -> LendingResult<DailyCollection> {
        let customer = self.customer_manager.get_customer_required(customer_id).await?;
        self.collection_manager
            .record_payment(&customer, date, line, amount_paid, payment_mode)
            .await
    }

    /// Get a collection record by ID
    pub async fn get_collection(
        &self,
        collection_id: &str,
    ) -> LendingResult<Option<DailyCollection>> {
        self.collection_manager.get_collection(collection_id).await
    }

    /// Records for one route on one date
    pub async fn collections_for_date_line(
        &self,
        date: NaiveDate,
        line: CollectionLine,
    ) -> LendingResult<Vec<DailyCollection>> {
        self.collection_manager
            .collections_for_date_line(date, line)
            .await
    }

    /// Full payment history for one customer
    pub async fn collections_for_customer(
        &self,
        customer_id: &str,
    ) -> LendingResult<Vec<DailyCollection>> {
        self.collection_manager
            .collections_for_customer(customer_id)
            .await
    }

    /// Delete a collection record
    pub async fn delete_collection(&mut self, collection_id: &str) -> LendingResult<()> {
        self.collection_manager.delete_collection(collection_id).await
    }

    // Daily entry operations
    /// Save an end-of-route daily entry
    pub async fn save_daily_entry(&mut self, input: NewDailyEntry) -> LendingResult<DailyEntry> {
        self.collection_manager.save_daily_entry(input).await
    }

    /// Apply a partial update to a daily entry
    pub async fn update_daily_entry(
        &mut self,
        entry_id: &str,
        patch: DailyEntryPatch,
    ) -> LendingResult<DailyEntry> {
        self.collection_manager.update_daily_entry(entry_id, patch).await
    }

    /// First daily entry for one route on one date, if any
    pub async fn daily_entry_for(
        &self,
        date: NaiveDate,
        line: CollectionLine,
    ) -> LendingResult<Option<DailyEntry>> {
        self.collection_manager.daily_entry_for(date, line).await
    }

    /// List daily entries in a date range, newest first
    pub async fn list_daily_entries(&self, range: &EntryRange) -> LendingResult<Vec<DailyEntry>> {
        self.collection_manager.list_daily_entries(range).await
    }

    // Expense operations
    /// Log a batch of expenses
    pub async fn record_expenses(
        &mut self,
        inputs: Vec<NewExpense>,
    ) -> LendingResult<ExpenseBatch> {
        self.collection_manager.record_expenses(inputs).await
    }

    /// List expenses matching a filter
    pub async fn list_expenses(&self, filter: &ExpenseFilter) -> LendingResult<Vec<Expense>> {
        self.collection_manager.list_expenses(filter).await
    }

    // Reporting operations
    /// Aggregate statistics for a date range and optional route filter
    pub async fn period_stats(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        line: Option<CollectionLine>,
    ) -> LendingResult<PeriodStats> {
        let customers = self.customer_manager.storage.list_customers().await?;
        let collections = self
            .customer_manager
            .storage
            .list_collections(&CollectionFilter::for_period(start, end, line))
            .await?;
        let entries = self
            .customer_manager
            .storage
            .list_daily_entries(&EntryRange::between(start, end))
            .await?;

        Ok(PeriodStats::compute(
            start,
            end,
            line,
            &customers,
            &collections,
            &entries,
        ))
    }

    /// Roster overview for all six routes
    pub async fn line_summaries(&self) -> LendingResult<Vec<LineSummary>> {
        let customers = self.customer_manager.list_customers().await?;
        Ok(CollectionLine::all()
            .into_iter()
            .map(|line| LineSummary::compute(line, &customers))
            .collect())
    }

    /// Check one daily entry against the payment rows it summarizes
    pub async fn reconcile_daily_entry(
        &self,
        entry_id: &str,
    ) -> LendingResult<EntryReconciliation> {
        let entry = self
            .collection_manager
            .get_daily_entry_required(entry_id)
            .await?;
        let collections = self
            .customer_manager
            .storage
            .list_collections(&CollectionFilter::for_date_and_line(
                entry.entry_date,
                entry.collection_line,
            ))
            .await?;
        Ok(EntryReconciliation::compute(&entry, &collections))
    }
}
