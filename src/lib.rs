//! # Lending Core
//!
//! A microloan tracking library for small lending operations organized
//! around fixed weekly collection lines.
//!
//! ## Features
//!
//! - **Customer registration**: loan schedule derivation (total, weekly
//!   installment, end date) with field-level input validation
//! - **Payment recording**: per-visit collection records upserted on
//!   (customer, date) with server-derived payment status
//! - **Daily entries and expenses**: end-of-route operational summaries and
//!   a batch expense log
//! - **Reporting**: period statistics (collection rate, outstanding,
//!   profit breakdowns, per-line amounts), roster summaries, and
//!   entry-vs-ledger reconciliation
//! - **Storage abstraction**: database-agnostic design with trait-based
//!   storage
//!
//! ## Quick Start
//!
//! ```rust
//! use lending_core::utils::MemoryStorage;
//! use lending_core::LoanBook;
//!
//! let storage = MemoryStorage::new();
//! let mut book = LoanBook::new(storage);
//! // register customers, record payments, pull period stats...
//! ```

pub mod book;
pub mod reconciliation;
pub mod reports;
pub mod schedule;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use book::*;
pub use reconciliation::*;
pub use reports::*;
pub use schedule::*;
pub use traits::*;
pub use types::*;
