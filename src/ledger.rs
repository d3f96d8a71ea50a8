use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    book::Book,
    clock::{Clock, SystemClock},
    error::{CirculationError, CirculationResult},
    events::LedgerEvent,
    observers::LedgerObserver,
    record::BorrowRecord,
    user::User,
};

/// One outstanding loan as seen from a user's summary
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Loan<'a> {
    /// The book on loan
    pub book: &'a Book,
    /// The open ledger entry for it
    pub record: &'a BorrowRecord,
}

/// A user's profile together with everything they currently hold
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary<'a> {
    /// The registered profile
    pub user: &'a User,
    /// Outstanding loans, oldest first
    pub loans: Vec<Loan<'a>>,
}

/// The circulation desk: catalog, user registry and borrow ledger
pub struct Ledger {
    /// Catalog keyed by ISBN
    books: BTreeMap<String, Book>,
    /// Registry keyed by user id
    users: BTreeMap<String, User>,
    /// Append-only record of every loan
    records: Vec<BorrowRecord>,
    /// Time source for loan timestamps
    clock: Box<dyn Clock>,
    /// Registered transition observers
    observers: Vec<Box<dyn LedgerObserver>>,
}

// Manual implementation of Debug for Ledger
impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("books", &self.books)
            .field("users", &self.users)
            .field("records", &self.records)
            .field("clock", &self.clock)
            .field("observers_count", &self.observers.len())
            .finish()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Create an empty ledger driven by the system clock
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    /// Create an empty ledger driven by `clock`
    #[must_use]
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            books: BTreeMap::new(),
            users: BTreeMap::new(),
            records: Vec::new(),
            clock,
            observers: Vec::new(),
        }
    }

    /// Register an observer to be notified of transitions
    pub fn register_observer(&mut self, observer: Box<dyn LedgerObserver>) {
        self.observers.push(observer);
    }

    /// Current time according to the ledger's clock
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Add a book to the catalog, replacing any book with the same ISBN
    ///
    /// The availability of the stored book is taken from the ledger, not from
    /// the value passed in.
    pub fn add_book(&mut self, mut book: Book) {
        match self.records.iter().find(|r| r.is_outstanding() && r.isbn() == book.isbn()) {
            Some(record) => book.mark_borrowed(record.user_id()),
            None => book.mark_returned(),
        }

        let event = LedgerEvent::BookAdded {
            isbn: book.isbn().to_string(),
            title: book.title().to_string(),
        };
        self.books.insert(book.isbn().to_string(), book);
        self.notify(&event);
    }

    /// Add a user to the registry, replacing any user with the same id
    pub fn register_user(&mut self, user: User) {
        let event = LedgerEvent::UserRegistered {
            user_id: user.user_id().to_string(),
            name: user.name().to_string(),
            kind: user.kind().label().to_string(),
        };
        self.users.insert(user.user_id().to_string(), user);
        self.notify(&event);
    }

    /// Lend the book `isbn` to `user_id`
    ///
    /// # Errors
    ///
    /// Returns, checked in this order:
    /// - `CirculationError::UserNotFound` if the user is not registered
    /// - `CirculationError::BookNotFound` if the book is not in the catalog
    /// - `CirculationError::BookUnavailable` if the book is already out
    /// - `CirculationError::BorrowLimitExceeded` if the user already holds
    ///   as many books as their policy allows
    pub fn borrow_book(&mut self, user_id: &str, isbn: &str) -> CirculationResult<BorrowRecord> {
        let record = self
            .open_loan(user_id, isbn)
            .inspect_err(|error| tracing::debug!(%error, "borrow refused"))?;

        self.notify(&LedgerEvent::Borrowed {
            user_id: user_id.to_string(),
            isbn: isbn.to_string(),
            due_at: record.due_at(),
        });
        Ok(record)
    }

    /// Take the book `isbn` back from `user_id`
    ///
    /// # Errors
    ///
    /// Returns, checked in this order:
    /// - `CirculationError::UserNotFound` if the user is not registered
    /// - `CirculationError::BookNotFound` if the book is not in the catalog
    /// - `CirculationError::NotCurrentlyBorrowed` if the book is on the shelf
    /// - `CirculationError::NoMatchingRecord` if the book is out, but not to
    ///   this user
    pub fn return_book(&mut self, user_id: &str, isbn: &str) -> CirculationResult<BorrowRecord> {
        let record = self
            .close_loan(user_id, isbn)
            .inspect_err(|error| tracing::debug!(%error, "return refused"))?;

        self.notify(&LedgerEvent::Returned {
            user_id: user_id.to_string(),
            isbn: isbn.to_string(),
            returned_at: record.returned_at().unwrap_or_else(|| self.clock.now()),
            late: record.was_returned_late(),
        });
        Ok(record)
    }

    /// Every book in the catalog, ordered by ISBN
    #[must_use]
    pub fn list_all_books(&self) -> Vec<&Book> {
        self.books.values().collect()
    }

    /// Books currently on the shelf, ordered by ISBN
    #[must_use]
    pub fn list_available_books(&self) -> Vec<&Book> {
        self.books.values().filter(|book| book.is_available()).collect()
    }

    /// Profile and outstanding loans of `user_id`
    ///
    /// # Errors
    ///
    /// Returns `CirculationError::UserNotFound` if the user is not registered
    pub fn user_summary(&self, user_id: &str) -> CirculationResult<UserSummary<'_>> {
        let user = self.users.get(user_id).ok_or_else(|| CirculationError::UserNotFound {
            user_id: user_id.to_string(),
        })?;

        let loans = self
            .records
            .iter()
            .filter(|record| record.is_outstanding() && record.user_id() == user_id)
            .filter_map(|record| self.books.get(record.isbn()).map(|book| Loan { book, record }))
            .collect();

        Ok(UserSummary { user, loans })
    }

    /// Every registered user, ordered by id
    #[must_use]
    pub fn list_users(&self) -> Vec<&User> {
        self.users.values().collect()
    }

    #[must_use]
    pub fn book(&self, isbn: &str) -> Option<&Book> {
        self.books.get(isbn)
    }

    #[must_use]
    pub fn user(&self, user_id: &str) -> Option<&User> {
        self.users.get(user_id)
    }

    /// The full ledger, oldest first
    #[must_use]
    pub fn records(&self) -> &[BorrowRecord] {
        &self.records
    }

    /// Number of books `user_id` holds right now
    #[must_use]
    pub fn outstanding_count(&self, user_id: &str) -> usize {
        count_outstanding(&self.records, user_id)
    }

    /// Outstanding loans already past their due date
    #[must_use]
    pub fn overdue_records(&self) -> Vec<&BorrowRecord> {
        let now = self.clock.now();
        self.records.iter().filter(|record| record.is_overdue(now)).collect()
    }

    /// Every loan of `isbn`, returned or not, oldest first
    #[must_use]
    pub fn book_history(&self, isbn: &str) -> Vec<&BorrowRecord> {
        self.records.iter().filter(|record| record.isbn() == isbn).collect()
    }

    /// Validate and apply a borrow; nothing is touched unless every check passes
    fn open_loan(&mut self, user_id: &str, isbn: &str) -> CirculationResult<BorrowRecord> {
        let user = self.users.get(user_id).ok_or_else(|| CirculationError::UserNotFound {
            user_id: user_id.to_string(),
        })?;
        let book = self
            .books
            .get_mut(isbn)
            .ok_or_else(|| CirculationError::BookNotFound { isbn: isbn.to_string() })?;

        if !book.is_available() {
            return Err(CirculationError::BookUnavailable { isbn: isbn.to_string() });
        }

        let policy = user.policy();
        if count_outstanding(&self.records, user_id) >= policy.max_borrows {
            return Err(CirculationError::BorrowLimitExceeded {
                user_id: user_id.to_string(),
                kind: user.kind().label().to_string(),
                limit: policy.max_borrows,
            });
        }

        let record = BorrowRecord::open(isbn, user_id, self.clock.now(), policy);
        book.mark_borrowed(user_id);
        self.records.push(record.clone());
        Ok(record)
    }

    /// Validate and apply a return; nothing is touched unless every check passes
    fn close_loan(&mut self, user_id: &str, isbn: &str) -> CirculationResult<BorrowRecord> {
        if !self.users.contains_key(user_id) {
            return Err(CirculationError::UserNotFound { user_id: user_id.to_string() });
        }
        let book = self
            .books
            .get_mut(isbn)
            .ok_or_else(|| CirculationError::BookNotFound { isbn: isbn.to_string() })?;

        if book.is_available() {
            return Err(CirculationError::NotCurrentlyBorrowed { isbn: isbn.to_string() });
        }

        let record = self
            .records
            .iter_mut()
            .find(|record| record.is_outstanding_for(user_id, isbn))
            .ok_or_else(|| CirculationError::NoMatchingRecord {
                user_id: user_id.to_string(),
                isbn: isbn.to_string(),
            })?;

        record.close(self.clock.now());
        book.mark_returned();
        Ok(record.clone())
    }

    /// Hand `event` to every observer
    fn notify(&self, event: &LedgerEvent) {
        for observer in &self.observers {
            observer.on_event(event);
        }
    }
}

/// Open records held by `user_id`
fn count_outstanding(records: &[BorrowRecord], user_id: &str) -> usize {
    records.iter().filter(|record| record.is_outstanding() && record.user_id() == user_id).count()
}
