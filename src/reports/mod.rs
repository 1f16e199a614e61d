//! Aggregate statistics over customers, collections, and daily entries
//!
//! Everything here is pure: callers fetch the record snapshots and the
//! functions derive figures from them, so each number can be pinned by a
//! test without storage in the loop.

use std::collections::HashMap;

use bigdecimal::rounding::RoundingMode;
use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::schedule::weekly_due_amount;
use crate::types::{CollectionLine, Customer, CustomerStatus, DailyCollection, DailyEntry};

/// Collection percentage the way the dashboard shows it: rounded to a whole
/// percent (half rounds up), 0 when there is no target
fn collection_rate(collected: &BigDecimal, target: &BigDecimal) -> i64 {
    if *target > BigDecimal::from(0) {
        (collected * BigDecimal::from(100) / target)
            .with_scale_round(0, RoundingMode::HalfUp)
            .to_i64()
            .unwrap_or(0)
    } else {
        0
    }
}

/// Aggregate figures for a date range and optional route filter
///
/// Scoping is deliberately mixed, matching how the report is read:
/// collections, expenses, and new-loan counts are period-scoped;
/// `target_amount` reflects the *current* active roster even for past
/// ranges; interest and document-charge earnings are lifetime sums; the
/// per-line breakdown always covers all six routes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodStats {
    /// Active customers, all routes
    pub active_loans: usize,
    /// Completed customers, all routes
    pub completed_loans: usize,
    /// Sum of payments recorded in the range
    pub amount_collected: BigDecimal,
    /// One installment per active customer in scope, from today's roster
    pub target_amount: BigDecimal,
    /// Whole-percent collection rate against the target
    pub collection_rate: i64,
    /// Sum of daily-entry expenses in the range
    pub total_expenses: BigDecimal,
    /// Total amount across all active loans, as of now
    pub total_outstanding: BigDecimal,
    /// Lifetime interest across every customer ever registered
    pub interest_earnings: BigDecimal,
    /// Lifetime document charges across every customer ever registered
    pub document_charges: BigDecimal,
    /// interest_earnings + document_charges
    pub new_loans_profit: BigDecimal,
    /// amount_collected - total_expenses
    pub collection_profit: BigDecimal,
    /// new_loans_profit + collection_profit
    pub total_profit: BigDecimal,
    /// Loans handed out in the range, from the daily entries
    pub new_loans_given: u32,
    /// Principal out on each route, active customers only
    pub line_amounts: HashMap<CollectionLine, BigDecimal>,
}

impl PeriodStats {
    /// Compute period statistics from record snapshots
    ///
    /// `collections` and `entries` may be passed unfiltered; rows outside
    /// `[start, end]` or the route filter are ignored here. Duplicate
    /// collection rows for one (customer, date) all count toward the sum.
    pub fn compute(
        start: NaiveDate,
        end: NaiveDate,
        line: Option<CollectionLine>,
        customers: &[Customer],
        collections: &[DailyCollection],
        entries: &[DailyEntry],
    ) -> Self {
        let active_loans = customers
            .iter()
            .filter(|c| c.status == CustomerStatus::Active)
            .count();
        let completed_loans = customers
            .iter()
            .filter(|c| c.status == CustomerStatus::Completed)
            .count();

        let amount_collected: BigDecimal = collections
            .iter()
            .filter(|c| c.collection_date >= start && c.collection_date <= end)
            .filter(|c| line.is_none_or(|l| c.collection_line == l))
            .map(|c| &c.amount_paid)
            .sum();

        let target_amount: BigDecimal = customers
            .iter()
            .filter(|c| c.status == CustomerStatus::Active)
            .filter(|c| line.is_none_or(|l| c.collection_line == l))
            .map(|c| weekly_due_amount(&c.total_amount))
            .sum();

        let in_range_entries: Vec<&DailyEntry> = entries
            .iter()
            .filter(|e| e.entry_date >= start && e.entry_date <= end)
            .filter(|e| line.is_none_or(|l| e.collection_line == l))
            .collect();

        let total_expenses: BigDecimal = in_range_entries.iter().map(|e| &e.expenses).sum();
        let new_loans_given: u32 = in_range_entries.iter().map(|e| e.new_loans_given).sum();

        let total_outstanding: BigDecimal = customers
            .iter()
            .filter(|c| c.status == CustomerStatus::Active)
            .map(|c| &c.total_amount)
            .sum();

        let interest_earnings: BigDecimal =
            customers.iter().map(|c| &c.interest_amount).sum();
        let document_charges: BigDecimal =
            customers.iter().map(|c| &c.document_charge).sum();

        let mut line_amounts = HashMap::new();
        for route in CollectionLine::all() {
            let principal: BigDecimal = customers
                .iter()
                .filter(|c| c.status == CustomerStatus::Active && c.collection_line == route)
                .map(|c| &c.amount_given)
                .sum();
            line_amounts.insert(route, principal);
        }

        let rate = collection_rate(&amount_collected, &target_amount);
        let new_loans_profit = &interest_earnings + &document_charges;
        let collection_profit = &amount_collected - &total_expenses;
        let total_profit = &new_loans_profit + &collection_profit;

        Self {
            active_loans,
            completed_loans,
            amount_collected,
            target_amount,
            collection_rate: rate,
            total_expenses,
            total_outstanding,
            interest_earnings,
            document_charges,
            new_loans_profit,
            collection_profit,
            total_profit,
            new_loans_given,
            line_amounts,
        }
    }
}

/// Per-row figures for the detailed report table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPerformance {
    /// Whole-percent rate of collected against the entry's own target
    pub collection_rate: i64,
    /// Collected minus expenses for this entry
    pub net_amount: BigDecimal,
}

impl DailyPerformance {
    pub fn for_entry(entry: &DailyEntry) -> Self {
        Self {
            collection_rate: collection_rate(&entry.total_collected, &entry.target_amount),
            net_amount: &entry.total_collected - &entry.expenses,
        }
    }
}

/// Roster overview for one route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSummary {
    pub line: CollectionLine,
    /// Active customers on the route
    pub customers: usize,
    /// Sum of their weekly installments
    pub weekly_target: BigDecimal,
}

impl LineSummary {
    /// Summarize one route from the customer roster
    pub fn compute(line: CollectionLine, customers: &[Customer]) -> Self {
        let on_line: Vec<&Customer> = customers
            .iter()
            .filter(|c| c.collection_line == line && c.status == CustomerStatus::Active)
            .collect();
        let weekly_target = on_line
            .iter()
            .map(|c| weekly_due_amount(&c.total_amount))
            .sum();
        Self {
            line,
            customers: on_line.len(),
            weekly_target,
        }
    }
}
