use thiserror::Error;

/// Reasons a circulation request is refused
///
/// Every variant is raised before the ledger is touched, so a failed request
/// leaves no trace.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CirculationError {
    /// No user is registered under the id
    #[error("User not found: {user_id}")]
    UserNotFound {
        /// The id that was looked up
        user_id: String,
    },
    /// No book is cataloged under the ISBN
    #[error("Book not found: {isbn}")]
    BookNotFound {
        /// The ISBN that was looked up
        isbn: String,
    },
    /// The book is out on loan
    #[error("Book is already borrowed: {isbn}")]
    BookUnavailable {
        /// The requested book
        isbn: String,
    },
    /// The user already holds as many books as their policy allows
    #[error("Borrow limit reached for {kind} (limit {limit})")]
    BorrowLimitExceeded {
        /// The user who asked
        user_id: String,
        /// Label of the user's kind, e.g. `Guest`
        kind: String,
        /// Maximum number of concurrent loans for that kind
        limit: usize,
    },
    /// The book is on the shelf, so there is nothing to return
    #[error("Book was not borrowed: {isbn}")]
    NotCurrentlyBorrowed {
        /// The book offered for return
        isbn: String,
    },
    /// The book is out, but not to this user
    #[error("No borrow record found for {user_id} and {isbn}")]
    NoMatchingRecord {
        /// The user offering the return
        user_id: String,
        /// The book offered for return
        isbn: String,
    },
}

pub type CirculationResult<T> = Result<T, CirculationError>;
