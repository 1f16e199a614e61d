//! Reconciliation of daily entry summaries against collection records
//!
//! A daily entry stores the totals staff typed in at the end of a route;
//! nothing ties them to the payment rows recorded during the day. This
//! module recomputes the route's total from the rows and reports the drift.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::types::{DailyCollection, DailyEntry};

/// Comparison of one daily entry against the payments behind it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryReconciliation {
    pub entry_id: String,
    /// What the entry claims was collected
    pub recorded_total: BigDecimal,
    /// What the payment rows for the entry's (date, line) add up to
    pub ledger_total: BigDecimal,
    /// recorded_total - ledger_total
    pub difference: BigDecimal,
    pub is_consistent: bool,
}

impl EntryReconciliation {
    /// Reconcile one entry against collection records
    ///
    /// Rows for other dates or routes are ignored, so the full collection
    /// list may be passed as-is.
    pub fn compute(entry: &DailyEntry, collections: &[DailyCollection]) -> Self {
        let ledger_total: BigDecimal = collections
            .iter()
            .filter(|c| {
                c.collection_date == entry.entry_date && c.collection_line == entry.collection_line
            })
            .map(|c| &c.amount_paid)
            .sum();

        let difference = &entry.total_collected - &ledger_total;
        let is_consistent = difference == BigDecimal::from(0);

        Self {
            entry_id: entry.id.clone(),
            recorded_total: entry.total_collected.clone(),
            ledger_total,
            difference,
            is_consistent,
        }
    }
}
