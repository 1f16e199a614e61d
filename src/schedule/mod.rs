//! Loan schedule derivation for the fixed 10-week repayment cycle

use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::types::{CollectionLine, Customer, DailyCollection};

/// Number of weekly installments every loan is collected over
///
/// Customer records store their own `number_of_weeks`, but all installment
/// and target math divides by this constant.
pub const LOAN_WEEKS: u32 = 10;

/// Routes switch from morning to evening at this local hour
pub const EVENING_CUTOFF_HOUR: u32 = 16;

/// Derived figures for a loan, computed once at registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSchedule {
    /// Principal + interest; the amount the customer repays
    pub total_amount: BigDecimal,
    /// Installment owed per collection visit
    pub weekly_due: BigDecimal,
    /// Start date + 70 calendar days
    pub end_date: NaiveDate,
}

impl LoanSchedule {
    /// Derive the schedule for a loan
    ///
    /// The document charge is collected at signup and never enters the
    /// repayable total.
    pub fn for_loan(
        amount_given: &BigDecimal,
        interest_amount: &BigDecimal,
        start_date: NaiveDate,
    ) -> Self {
        let total_amount = amount_given + interest_amount;
        let weekly_due = weekly_due_amount(&total_amount);
        Self {
            total_amount,
            weekly_due,
            end_date: loan_end_date(start_date),
        }
    }
}

/// The per-visit installment: total amount over the fixed 10-week cycle
pub fn weekly_due_amount(total_amount: &BigDecimal) -> BigDecimal {
    total_amount / BigDecimal::from(LOAN_WEEKS)
}

/// When a loan started on `start_date` is fully collected: 70 raw days
/// later, not a calendar-week-aligned date
pub fn loan_end_date(start_date: NaiveDate) -> NaiveDate {
    start_date + Duration::days(i64::from(LOAN_WEEKS) * 7)
}

/// Format a roster sequence number as a customer number, e.g. `C0001`
pub fn format_customer_number(sequence: u32) -> String {
    format!("C{:04}", sequence)
}

/// Repayment progress for one customer across their collection history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanProgress {
    pub total_paid: BigDecimal,
    /// Total amount minus everything paid; negative when overpaid
    pub remaining: BigDecimal,
    pub is_completed: bool,
    /// Whole installments covered by the payments so far
    pub completed_weeks: u32,
    /// Repaid share of the total, capped at 100
    pub percent: BigDecimal,
}

impl LoanProgress {
    /// Compute progress from a customer's collection records
    ///
    /// Records for other customers are ignored, so the full collection list
    /// may be passed as-is.
    pub fn calculate(customer: &Customer, collections: &[DailyCollection]) -> Self {
        let total_paid: BigDecimal = collections
            .iter()
            .filter(|c| c.customer_id == customer.id)
            .map(|c| &c.amount_paid)
            .sum();

        let remaining = &customer.total_amount - &total_paid;
        let is_completed = remaining <= BigDecimal::from(0);

        let weekly_due = weekly_due_amount(&customer.total_amount);
        let completed_weeks = if weekly_due > BigDecimal::from(0) {
            (&total_paid / &weekly_due).to_u32().unwrap_or(0)
        } else {
            0
        };

        let hundred = BigDecimal::from(100);
        let percent = if customer.total_amount > BigDecimal::from(0) {
            let raw = &total_paid * &hundred / &customer.total_amount;
            if raw > hundred {
                hundred
            } else {
                raw
            }
        } else {
            BigDecimal::from(0)
        };

        Self {
            total_paid,
            remaining,
            is_completed,
            completed_weeks,
            percent,
        }
    }
}

/// The route being collected at a given moment
///
/// Monday and Wednesday split at the evening cutoff; Tuesday and Thursday
/// are morning-only. Days with no route fall back to monday-morning.
pub fn current_collection_line(now: NaiveDateTime) -> CollectionLine {
    let morning = now.hour() < EVENING_CUTOFF_HOUR;
    match now.weekday() {
        Weekday::Mon => {
            if morning {
                CollectionLine::MondayMorning
            } else {
                CollectionLine::MondayEvening
            }
        }
        Weekday::Wed => {
            if morning {
                CollectionLine::WednesdayMorning
            } else {
                CollectionLine::WednesdayEvening
            }
        }
        Weekday::Tue => CollectionLine::TuesdayMorning,
        Weekday::Thu => CollectionLine::ThursdayMorning,
        _ => CollectionLine::MondayMorning,
    }
}
