//! Payment recording, daily entries, and the expense log

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::schedule::weekly_due_amount;
use crate::traits::*;
use crate::types::*;

/// Collection manager for payments, daily entries, and expenses
pub struct CollectionManager<S: LendingStorage> {
    storage: S,
    validator: Box<dyn PaymentValidator>,
}

impl<S: LendingStorage> CollectionManager<S> {
    /// Create a new collection manager
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultPaymentValidator),
        }
    }

    /// Create a new collection manager with a custom validator
    pub fn with_validator(storage: S, validator: Box<dyn PaymentValidator>) -> Self {
        Self { storage, validator }
    }

    /// Record a payment for a customer on a collection date
    ///
    /// Upserts on (customer, date): an existing record for that date is
    /// updated in place, otherwise a new one is created with the due amount
    /// fixed to the customer's weekly installment. The payment status is
    /// recomputed here on every call and never taken from the caller.
    ///
    /// A loan reaching zero balance does not change the customer's status;
    /// that transition stays a manual roster update.
    pub async fn record_payment(
        &mut self,
        customer: &Customer,
        date: NaiveDate,
        line: CollectionLine,
        amount_paid: BigDecimal,
        payment_mode: PaymentMode,
    ) -> LendingResult<DailyCollection> {
        self.validator.validate_amount(&amount_paid)?;

        let collection = match self.storage.find_collection(&customer.id, date).await? {
            Some(mut existing) => {
                existing.amount_paid = amount_paid;
                existing.payment_mode = payment_mode;
                existing.payment_status =
                    PaymentStatus::for_amounts(&existing.amount_paid, &existing.due_amount);
                self.storage.update_collection(&existing).await?;
                existing
            }
            None => {
                let due_amount = weekly_due_amount(&customer.total_amount);
                let payment_status = PaymentStatus::for_amounts(&amount_paid, &due_amount);
                let created = DailyCollection {
                    id: Uuid::new_v4().to_string(),
                    customer_id: customer.id.clone(),
                    collection_date: date,
                    collection_line: line,
                    due_amount,
                    amount_paid,
                    payment_mode,
                    payment_status,
                    created_at: chrono::Utc::now().naive_utc(),
                };
                self.storage.save_collection(&created).await?;
                created
            }
        };

        tracing::debug!(
            customer_number = %customer.customer_number,
            date = %date,
            status = ?collection.payment_status,
            "recorded payment"
        );

        Ok(collection)
    }

    /// Get a collection record by ID
    pub async fn get_collection(
        &self,
        collection_id: &str,
    ) -> LendingResult<Option<DailyCollection>> {
        self.storage.get_collection(collection_id).await
    }

    /// Get a collection record by ID, returning an error if not found
    pub async fn get_collection_required(
        &self,
        collection_id: &str,
    ) -> LendingResult<DailyCollection> {
        self.storage
            .get_collection(collection_id)
            .await?
            .ok_or_else(|| LendingError::CollectionNotFound(collection_id.to_string()))
    }

    /// List collection records matching a filter
    pub async fn list_collections(
        &self,
        filter: &CollectionFilter,
    ) -> LendingResult<Vec<DailyCollection>> {
        self.storage.list_collections(filter).await
    }

    /// The roster view: records for one route on one date
    pub async fn collections_for_date_line(
        &self,
        date: NaiveDate,
        line: CollectionLine,
    ) -> LendingResult<Vec<DailyCollection>> {
        self.storage
            .list_collections(&CollectionFilter::for_date_and_line(date, line))
            .await
    }

    /// Full payment history for one customer
    pub async fn collections_for_customer(
        &self,
        customer_id: &str,
    ) -> LendingResult<Vec<DailyCollection>> {
        self.storage
            .list_collections(&CollectionFilter::for_customer(customer_id))
            .await
    }

    /// Delete a collection record
    pub async fn delete_collection(&mut self, collection_id: &str) -> LendingResult<()> {
        self.get_collection_required(collection_id).await?;
        self.storage.delete_collection(collection_id).await
    }

    /// Save an end-of-route daily entry
    ///
    /// Saving twice for the same (date, line) creates a second row; range
    /// queries will sum both. Corrections go through
    /// [`update_daily_entry`](Self::update_daily_entry).
    pub async fn save_daily_entry(&mut self, input: NewDailyEntry) -> LendingResult<DailyEntry> {
        let entry = DailyEntry {
            id: Uuid::new_v4().to_string(),
            entry_date: input.entry_date,
            collection_line: input.collection_line,
            target_amount: input.target_amount,
            total_collected: input.total_collected,
            expenses: input.expenses,
            new_loans_given: input.new_loans_given,
            new_loans_amount: input.new_loans_amount,
            document_charges: input.document_charges,
            completed_loans: input.completed_loans,
            created_at: chrono::Utc::now().naive_utc(),
        };

        self.storage.save_daily_entry(&entry).await?;
        tracing::debug!(date = %entry.entry_date, line = %entry.collection_line, "saved daily entry");
        Ok(entry)
    }

    /// Get a daily entry by ID, returning an error if not found
    pub async fn get_daily_entry_required(&self, entry_id: &str) -> LendingResult<DailyEntry> {
        self.storage
            .get_daily_entry(entry_id)
            .await?
            .ok_or_else(|| LendingError::EntryNotFound(entry_id.to_string()))
    }

    /// Apply a partial update to a daily entry
    pub async fn update_daily_entry(
        &mut self,
        entry_id: &str,
        patch: DailyEntryPatch,
    ) -> LendingResult<DailyEntry> {
        let mut entry = self.get_daily_entry_required(entry_id).await?;

        if let Some(target_amount) = patch.target_amount {
            entry.target_amount = target_amount;
        }
        if let Some(total_collected) = patch.total_collected {
            entry.total_collected = total_collected;
        }
        if let Some(expenses) = patch.expenses {
            entry.expenses = expenses;
        }
        if let Some(new_loans_given) = patch.new_loans_given {
            entry.new_loans_given = new_loans_given;
        }
        if let Some(new_loans_amount) = patch.new_loans_amount {
            entry.new_loans_amount = new_loans_amount;
        }
        if let Some(document_charges) = patch.document_charges {
            entry.document_charges = document_charges;
        }
        if let Some(completed_loans) = patch.completed_loans {
            entry.completed_loans = completed_loans;
        }

        self.storage.update_daily_entry(&entry).await?;
        Ok(entry)
    }

    /// First daily entry for one route on one date, if any
    pub async fn daily_entry_for(
        &self,
        date: NaiveDate,
        line: CollectionLine,
    ) -> LendingResult<Option<DailyEntry>> {
        self.storage.find_daily_entry(date, line).await
    }

    /// List daily entries in a date range, newest first
    pub async fn list_daily_entries(&self, range: &EntryRange) -> LendingResult<Vec<DailyEntry>> {
        self.storage.list_daily_entries(range).await
    }

    /// Log a batch of expenses and report the batch total
    pub async fn record_expenses(
        &mut self,
        inputs: Vec<NewExpense>,
    ) -> LendingResult<ExpenseBatch> {
        for input in &inputs {
            if input.amount <= BigDecimal::from(0) {
                return Err(LendingError::validation(
                    "amount",
                    "Expense amount must be positive",
                ));
            }
        }

        let created_at = chrono::Utc::now().naive_utc();
        let expenses: Vec<Expense> = inputs
            .into_iter()
            .map(|input| Expense {
                id: Uuid::new_v4().to_string(),
                date: input.date,
                collection_line: input.collection_line,
                category: input.category,
                amount: input.amount,
                description: input.description,
                created_at,
            })
            .collect();

        let total_amount: BigDecimal = expenses.iter().map(|e| &e.amount).sum();
        self.storage.save_expenses(&expenses).await?;

        Ok(ExpenseBatch {
            expenses,
            total_amount,
        })
    }

    /// List expenses matching a filter
    pub async fn list_expenses(&self, filter: &ExpenseFilter) -> LendingResult<Vec<Expense>> {
        self.storage.list_expenses(filter).await
    }
}
