//! Customer registration and roster management

use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::schedule::{format_customer_number, weekly_due_amount, LoanProgress, LoanSchedule, LOAN_WEEKS};
use crate::traits::*;
use crate::types::*;

/// Customer manager for registration, roster queries, and updates
pub struct CustomerManager<S: LendingStorage> {
    pub(crate) storage: S,
    validator: Box<dyn CustomerValidator>,
}

impl<S: LendingStorage> CustomerManager<S> {
    /// Create a new customer manager
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultCustomerValidator),
        }
    }

    /// Create a new customer manager with a custom validator
    pub fn with_validator(storage: S, validator: Box<dyn CustomerValidator>) -> Self {
        Self { storage, validator }
    }

    /// Register a new customer and derive their loan schedule
    ///
    /// The total amount and end date are computed here, once, and stored on
    /// the record. An absent customer number is generated from the current
    /// roster count.
    pub async fn register_customer(&mut self, input: NewCustomer) -> LendingResult<Customer> {
        self.validator.validate_new_customer(&input)?;

        let customer_number = match input.customer_number {
            Some(number) => {
                if self.storage.get_customer_by_number(&number).await?.is_some() {
                    return Err(LendingError::validation(
                        "customer_number",
                        format!("Customer number '{}' is already in use", number),
                    ));
                }
                number
            }
            None => {
                let count = self.storage.list_customers().await?.len();
                format_customer_number(count as u32 + 1)
            }
        };

        let schedule =
            LoanSchedule::for_loan(&input.amount_given, &input.interest_amount, input.start_date);

        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            customer_number,
            name: input.name,
            area_name: input.area_name,
            phone_number: input.phone_number,
            amount_given: input.amount_given,
            interest_amount: input.interest_amount,
            total_amount: schedule.total_amount,
            document_charge: input.document_charge,
            number_of_weeks: input.number_of_weeks.unwrap_or(LOAN_WEEKS),
            start_date: input.start_date,
            end_date: schedule.end_date,
            collection_line: input.collection_line,
            status: CustomerStatus::Active,
            created_at: chrono::Utc::now().naive_utc(),
        };

        self.storage.save_customer(&customer).await?;
        tracing::debug!(
            customer_number = %customer.customer_number,
            line = %customer.collection_line,
            "registered customer"
        );

        Ok(customer)
    }

    /// Get a customer by ID
    pub async fn get_customer(&self, customer_id: &str) -> LendingResult<Option<Customer>> {
        self.storage.get_customer(customer_id).await
    }

    /// Get a customer by ID, returning an error if not found
    pub async fn get_customer_required(&self, customer_id: &str) -> LendingResult<Customer> {
        self.storage
            .get_customer(customer_id)
            .await?
            .ok_or_else(|| LendingError::CustomerNotFound(customer_id.to_string()))
    }

    /// Get a customer by their human-facing number
    pub async fn get_customer_by_number(
        &self,
        customer_number: &str,
    ) -> LendingResult<Option<Customer>> {
        self.storage.get_customer_by_number(customer_number).await
    }

    /// List all customers
    pub async fn list_customers(&self) -> LendingResult<Vec<Customer>> {
        self.storage.list_customers().await
    }

    /// List the active customers on one collection line
    pub async fn list_customers_by_line(
        &self,
        line: CollectionLine,
    ) -> LendingResult<Vec<Customer>> {
        self.storage.list_customers_by_line(line).await
    }

    /// Apply a partial update to a customer
    ///
    /// Status transitions are unrestricted; completing a loan does not
    /// happen automatically when the balance reaches zero.
    pub async fn update_customer(
        &mut self,
        customer_id: &str,
        patch: CustomerPatch,
    ) -> LendingResult<Customer> {
        self.validator.validate_patch(&patch)?;

        let mut customer = self.get_customer_required(customer_id).await?;

        if let Some(name) = patch.name {
            customer.name = name;
        }
        if let Some(area_name) = patch.area_name {
            customer.area_name = area_name;
        }
        if let Some(phone_number) = patch.phone_number {
            customer.phone_number = phone_number;
        }
        if let Some(collection_line) = patch.collection_line {
            customer.collection_line = collection_line;
        }
        if let Some(status) = patch.status {
            customer.status = status;
        }

        self.storage.update_customer(&customer).await?;
        Ok(customer)
    }

    /// The installment owed per collection visit
    pub fn weekly_due(&self, customer: &Customer) -> BigDecimal {
        weekly_due_amount(&customer.total_amount)
    }

    /// Repayment progress for one customer
    pub async fn loan_progress(&self, customer_id: &str) -> LendingResult<LoanProgress> {
        let customer = self.get_customer_required(customer_id).await?;
        let collections = self
            .storage
            .list_collections(&CollectionFilter::for_customer(customer_id))
            .await?;
        Ok(LoanProgress::calculate(&customer, &collections))
    }
}
