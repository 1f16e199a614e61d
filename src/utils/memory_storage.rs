//! In-memory storage implementation for testing

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::traits::*;
use crate::types::*;

/// In-memory storage implementation for testing and development
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    customers: Arc<RwLock<HashMap<String, Customer>>>,
    collections: Arc<RwLock<HashMap<String, DailyCollection>>>,
    daily_entries: Arc<RwLock<HashMap<String, DailyEntry>>>,
    expenses: Arc<RwLock<HashMap<String, Expense>>>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self {
            customers: Arc::new(RwLock::new(HashMap::new())),
            collections: Arc::new(RwLock::new(HashMap::new())),
            daily_entries: Arc::new(RwLock::new(HashMap::new())),
            expenses: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        self.customers.write().unwrap().clear();
        self.collections.write().unwrap().clear();
        self.daily_entries.write().unwrap().clear();
        self.expenses.write().unwrap().clear();
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LendingStorage for MemoryStorage {
    async fn save_customer(&mut self, customer: &Customer) -> LendingResult<()> {
        self.customers
            .write()
            .unwrap()
            .insert(customer.id.clone(), customer.clone());
        Ok(())
    }

    async fn get_customer(&self, customer_id: &str) -> LendingResult<Option<Customer>> {
        Ok(self.customers.read().unwrap().get(customer_id).cloned())
    }

    async fn get_customer_by_number(
        &self,
        customer_number: &str,
    ) -> LendingResult<Option<Customer>> {
        Ok(self
            .customers
            .read()
            .unwrap()
            .values()
            .find(|customer| customer.customer_number == customer_number)
            .cloned())
    }

    async fn list_customers(&self) -> LendingResult<Vec<Customer>> {
        Ok(self.customers.read().unwrap().values().cloned().collect())
    }

    async fn list_customers_by_line(&self, line: CollectionLine) -> LendingResult<Vec<Customer>> {
        let customers = self.customers.read().unwrap();
        let filtered: Vec<Customer> = customers
            .values()
            .filter(|customer| {
                customer.collection_line == line && customer.status == CustomerStatus::Active
            })
            .cloned()
            .collect();
        Ok(filtered)
    }

    async fn update_customer(&mut self, customer: &Customer) -> LendingResult<()> {
        if self.customers.read().unwrap().contains_key(&customer.id) {
            self.customers
                .write()
                .unwrap()
                .insert(customer.id.clone(), customer.clone());
            Ok(())
        } else {
            Err(LendingError::CustomerNotFound(customer.id.clone()))
        }
    }

    async fn save_collection(&mut self, collection: &DailyCollection) -> LendingResult<()> {
        self.collections
            .write()
            .unwrap()
            .insert(collection.id.clone(), collection.clone());
        Ok(())
    }

    async fn get_collection(&self, collection_id: &str) -> LendingResult<Option<DailyCollection>> {
        Ok(self
            .collections
            .read()
            .unwrap()
            .get(collection_id)
            .cloned())
    }

    async fn find_collection(
        &self,
        customer_id: &str,
        date: NaiveDate,
    ) -> LendingResult<Option<DailyCollection>> {
        Ok(self
            .collections
            .read()
            .unwrap()
            .values()
            .find(|collection| {
                collection.customer_id == customer_id && collection.collection_date == date
            })
            .cloned())
    }

    async fn list_collections(
        &self,
        filter: &CollectionFilter,
    ) -> LendingResult<Vec<DailyCollection>> {
        let collections = self.collections.read().unwrap();
        let filtered: Vec<DailyCollection> = collections
            .values()
            .filter(|collection| {
                if let Some(start) = filter.start_date {
                    if collection.collection_date < start {
                        return false;
                    }
                }
                if let Some(end) = filter.end_date {
                    if collection.collection_date > end {
                        return false;
                    }
                }
                if let Some(line) = filter.line {
                    if collection.collection_line != line {
                        return false;
                    }
                }
                if let Some(customer_id) = &filter.customer_id {
                    if &collection.customer_id != customer_id {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect();
        Ok(filtered)
    }

    async fn update_collection(&mut self, collection: &DailyCollection) -> LendingResult<()> {
        if self
            .collections
            .read()
            .unwrap()
            .contains_key(&collection.id)
        {
            self.collections
                .write()
                .unwrap()
                .insert(collection.id.clone(), collection.clone());
            Ok(())
        } else {
            Err(LendingError::CollectionNotFound(collection.id.clone()))
        }
    }

    async fn delete_collection(&mut self, collection_id: &str) -> LendingResult<()> {
        if self
            .collections
            .write()
            .unwrap()
            .remove(collection_id)
            .is_some()
        {
            Ok(())
        } else {
            Err(LendingError::CollectionNotFound(collection_id.to_string()))
        }
    }

    async fn save_daily_entry(&mut self, entry: &DailyEntry) -> LendingResult<()> {
        self.daily_entries
            .write()
            .unwrap()
            .insert(entry.id.clone(), entry.clone());
        Ok(())
    }

    async fn get_daily_entry(&self, entry_id: &str) -> LendingResult<Option<DailyEntry>> {
        Ok(self.daily_entries.read().unwrap().get(entry_id).cloned())
    }

    async fn find_daily_entry(
        &self,
        date: NaiveDate,
        line: CollectionLine,
    ) -> LendingResult<Option<DailyEntry>> {
        Ok(self
            .daily_entries
            .read()
            .unwrap()
            .values()
            .find(|entry| entry.entry_date == date && entry.collection_line == line)
            .cloned())
    }

    async fn list_daily_entries(&self, range: &EntryRange) -> LendingResult<Vec<DailyEntry>> {
        let entries = self.daily_entries.read().unwrap();
        let mut filtered: Vec<DailyEntry> = entries
            .values()
            .filter(|entry| {
                if let Some(start) = range.start {
                    if entry.entry_date < start {
                        return false;
                    }
                }
                if let Some(end) = range.end {
                    if entry.entry_date > end {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect();

        filtered.sort_by(|a, b| b.entry_date.cmp(&a.entry_date));
        Ok(filtered)
    }

    async fn update_daily_entry(&mut self, entry: &DailyEntry) -> LendingResult<()> {
        if self.daily_entries.read().unwrap().contains_key(&entry.id) {
            self.daily_entries
                .write()
                .unwrap()
                .insert(entry.id.clone(), entry.clone());
            Ok(())
        } else {
            Err(LendingError::EntryNotFound(entry.id.clone()))
        }
    }

    async fn save_expenses(&mut self, expenses: &[Expense]) -> LendingResult<()> {
        let mut stored = self.expenses.write().unwrap();
        for expense in expenses {
            stored.insert(expense.id.clone(), expense.clone());
        }
        Ok(())
    }

    async fn list_expenses(&self, filter: &ExpenseFilter) -> LendingResult<Vec<Expense>> {
        let expenses = self.expenses.read().unwrap();
        let filtered: Vec<Expense> = expenses
            .values()
            .filter(|expense| {
                if let Some(date) = filter.date {
                    if expense.date != date {
                        return false;
                    }
                }
                if let Some(line) = filter.line {
                    if expense.collection_line != line {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect();
        Ok(filtered)
    }
}
