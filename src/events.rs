use chrono::{DateTime, Utc};
use serde::Serialize;

/// Successful state transitions of the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LedgerEvent {
    /// A book was added to (or replaced in) the catalog
    BookAdded {
        /// Catalog key
        isbn: String,
        /// Title of the stored book
        title: String,
    },
    /// A user was added to (or replaced in) the registry
    UserRegistered {
        /// Registry key
        user_id: String,
        /// Display name
        name: String,
        /// Label of the user's kind
        kind: String,
    },
    /// A loan was opened
    Borrowed {
        /// Borrower
        user_id: String,
        /// Book lent out
        isbn: String,
        /// End of the loan period
        due_at: DateTime<Utc>,
    },
    /// A loan was closed
    Returned {
        /// Borrower
        user_id: String,
        /// Book taken back
        isbn: String,
        /// When it came back
        returned_at: DateTime<Utc>,
        /// Came back after the due date
        late: bool,
    },
}
