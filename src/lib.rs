//! Library circulation desk.
//!
//! This crate keeps a catalog of books, a registry of users with different
//! borrowing privileges and an append-only ledger of loans, refusing any
//! borrow or return that would break the borrowing rules.

pub mod book;
pub mod clock;
pub mod config;
pub mod demo;
pub mod error;
pub mod events;
pub mod ledger;
pub mod logging;
pub mod observers;
pub mod record;
pub mod report;
pub mod user;

pub use book::Book;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Config, OutputFormat};
pub use error::{CirculationError, CirculationResult};
pub use events::LedgerEvent;
pub use ledger::{Ledger, Loan, UserSummary};
pub use record::BorrowRecord;
pub use report::LedgerReport;
pub use user::{BorrowPolicy, User, UserKind};
