//! Core types and data structures for the lending system

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

/// The fixed weekly collection routes an agent walks
///
/// Mondays and Wednesdays run a morning and an evening route; Tuesdays and
/// Thursdays are morning-only. The key form (`monday-morning`) is the wire
/// and storage representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollectionLine {
    MondayMorning,
    MondayEvening,
    TuesdayMorning,
    WednesdayMorning,
    WednesdayEvening,
    ThursdayMorning,
}

impl CollectionLine {
    /// All six routes, in weekly order
    pub fn all() -> [CollectionLine; 6] {
        [
            CollectionLine::MondayMorning,
            CollectionLine::MondayEvening,
            CollectionLine::TuesdayMorning,
            CollectionLine::WednesdayMorning,
            CollectionLine::WednesdayEvening,
            CollectionLine::ThursdayMorning,
        ]
    }

    /// The storage key for this route (e.g. `monday-morning`)
    pub fn as_key(&self) -> &'static str {
        match self {
            CollectionLine::MondayMorning => "monday-morning",
            CollectionLine::MondayEvening => "monday-evening",
            CollectionLine::TuesdayMorning => "tuesday-morning",
            CollectionLine::WednesdayMorning => "wednesday-morning",
            CollectionLine::WednesdayEvening => "wednesday-evening",
            CollectionLine::ThursdayMorning => "thursday-morning",
        }
    }

    /// Parse a storage key back into a route
    pub fn from_key(key: &str) -> Option<CollectionLine> {
        match key {
            "monday-morning" => Some(CollectionLine::MondayMorning),
            "monday-evening" => Some(CollectionLine::MondayEvening),
            "tuesday-morning" => Some(CollectionLine::TuesdayMorning),
            "wednesday-morning" => Some(CollectionLine::WednesdayMorning),
            "wednesday-evening" => Some(CollectionLine::WednesdayEvening),
            "thursday-morning" => Some(CollectionLine::ThursdayMorning),
            _ => None,
        }
    }

    /// Weekday this route is visited on
    pub fn weekday(&self) -> Weekday {
        match self {
            CollectionLine::MondayMorning | CollectionLine::MondayEvening => Weekday::Mon,
            CollectionLine::TuesdayMorning => Weekday::Tue,
            CollectionLine::WednesdayMorning | CollectionLine::WednesdayEvening => Weekday::Wed,
            CollectionLine::ThursdayMorning => Weekday::Thu,
        }
    }

    /// Human-facing name (e.g. "Monday Morning")
    pub fn display_name(&self) -> &'static str {
        match self {
            CollectionLine::MondayMorning => "Monday Morning",
            CollectionLine::MondayEvening => "Monday Evening",
            CollectionLine::TuesdayMorning => "Tuesday Morning",
            CollectionLine::WednesdayMorning => "Wednesday Morning",
            CollectionLine::WednesdayEvening => "Wednesday Evening",
            CollectionLine::ThursdayMorning => "Thursday Morning",
        }
    }
}

impl std::fmt::Display for CollectionLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_key())
    }
}

/// Lifecycle state of a customer's loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    /// Loan is being collected
    Active,
    /// Loan is fully repaid
    Completed,
    /// Loan has missed its schedule
    Overdue,
}

/// How a payment was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMode {
    Cash,
    Gpay,
    BankTransfer,
}

/// Settlement state of a single collection visit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Paid the full installment (or more)
    Paid,
    /// Paid something, but less than the installment
    Partial,
    /// Paid nothing
    Pending,
}

impl PaymentStatus {
    /// Derive the settlement state from what was paid against what was due
    ///
    /// This is the single authoritative derivation point; callers must not
    /// supply their own status.
    pub fn for_amounts(amount_paid: &BigDecimal, due_amount: &BigDecimal) -> PaymentStatus {
        if amount_paid >= due_amount {
            PaymentStatus::Paid
        } else if *amount_paid > BigDecimal::from(0) {
            PaymentStatus::Partial
        } else {
            PaymentStatus::Pending
        }
    }
}

/// A customer and their loan record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier
    pub id: String,
    /// Human-facing number, e.g. "C0001"
    pub customer_number: String,
    pub name: String,
    pub area_name: String,
    pub phone_number: String,
    /// Principal handed over at signup
    pub amount_given: BigDecimal,
    /// Interest charged on top of the principal
    pub interest_amount: BigDecimal,
    /// Principal + interest, computed once at registration and stored
    pub total_amount: BigDecimal,
    /// Signup fee, tracked separately from the repayable total
    pub document_charge: BigDecimal,
    /// Stored schedule length; installment math uses the fixed 10-week
    /// schedule regardless of this field
    pub number_of_weeks: u32,
    pub start_date: NaiveDate,
    /// Start date + 70 days, computed once at registration and stored
    pub end_date: NaiveDate,
    pub collection_line: CollectionLine,
    pub status: CustomerStatus,
    pub created_at: NaiveDateTime,
}

/// Input for registering a new customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCustomer {
    /// Explicit customer number; generated from the roster count if absent
    pub customer_number: Option<String>,
    pub name: String,
    pub area_name: String,
    /// Must be exactly 10 digits
    pub phone_number: String,
    pub amount_given: BigDecimal,
    pub interest_amount: BigDecimal,
    pub document_charge: BigDecimal,
    /// Defaults to 10 when absent
    pub number_of_weeks: Option<u32>,
    pub start_date: NaiveDate,
    pub collection_line: CollectionLine,
}

/// Partial update for a customer record
///
/// Derived fields (total, end date) are settled at registration and cannot
/// be patched. Status transitions are unrestricted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub area_name: Option<String>,
    pub phone_number: Option<String>,
    pub collection_line: Option<CollectionLine>,
    pub status: Option<CustomerStatus>,
}

/// One payment record for one customer on one collection date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyCollection {
    pub id: String,
    pub customer_id: String,
    pub collection_date: NaiveDate,
    pub collection_line: CollectionLine,
    /// The installment owed for this visit, fixed when the record is created
    pub due_amount: BigDecimal,
    pub amount_paid: BigDecimal,
    pub payment_mode: PaymentMode,
    /// Always derived from `amount_paid` vs `due_amount`
    pub payment_status: PaymentStatus,
    pub created_at: NaiveDateTime,
}

/// Operational summary for one collection line on one date
///
/// Nothing enforces one entry per (date, line); repeated saves create
/// additional rows and range queries sum all of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEntry {
    pub id: String,
    pub entry_date: NaiveDate,
    pub collection_line: CollectionLine,
    pub target_amount: BigDecimal,
    pub total_collected: BigDecimal,
    pub expenses: BigDecimal,
    pub new_loans_given: u32,
    pub new_loans_amount: BigDecimal,
    pub document_charges: BigDecimal,
    pub completed_loans: u32,
    pub created_at: NaiveDateTime,
}

/// Input for saving a daily entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDailyEntry {
    pub entry_date: NaiveDate,
    pub collection_line: CollectionLine,
    pub target_amount: BigDecimal,
    pub total_collected: BigDecimal,
    pub expenses: BigDecimal,
    pub new_loans_given: u32,
    pub new_loans_amount: BigDecimal,
    pub document_charges: BigDecimal,
    pub completed_loans: u32,
}

/// Partial update for a daily entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyEntryPatch {
    pub target_amount: Option<BigDecimal>,
    pub total_collected: Option<BigDecimal>,
    pub expenses: Option<BigDecimal>,
    pub new_loans_given: Option<u32>,
    pub new_loans_amount: Option<BigDecimal>,
    pub document_charges: Option<BigDecimal>,
    pub completed_loans: Option<u32>,
}

/// A logged operating expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub date: NaiveDate,
    pub collection_line: CollectionLine,
    pub category: String,
    pub amount: BigDecimal,
    pub description: String,
    pub created_at: NaiveDateTime,
}

/// Input for logging an expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub date: NaiveDate,
    pub collection_line: CollectionLine,
    pub category: String,
    pub amount: BigDecimal,
    pub description: String,
}

/// Result of saving a batch of expenses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseBatch {
    pub expenses: Vec<Expense>,
    pub total_amount: BigDecimal,
}

/// A single failed field check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every field that failed validation, so callers can surface them together
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}", error)?;
            first = false;
        }
        Ok(())
    }
}

/// Errors that can occur in the lending system
#[derive(Debug, thiserror::Error)]
pub enum LendingError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),
    #[error("Daily entry not found: {0}")]
    EntryNotFound(String),
}

impl LendingError {
    /// Shorthand for a single-field validation failure
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        LendingError::Validation(ValidationErrors(vec![FieldError::new(field, message)]))
    }
}

/// Result type for lending operations
pub type LendingResult<T> = Result<T, LendingError>;
