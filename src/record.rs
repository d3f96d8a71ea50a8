use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use crate::user::BorrowPolicy;

/// One borrow transaction in the append-only ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BorrowRecord {
    /// Book that was borrowed
    isbn: String,
    /// User who borrowed it
    user_id: String,
    /// When the loan started
    borrowed_at: DateTime<Utc>,
    /// When the loan ends
    due_at: DateTime<Utc>,
    /// When the book came back; `None` while outstanding
    returned_at: Option<DateTime<Utc>>,
}

impl BorrowRecord {
    /// Open a loan at `borrowed_at` lasting as long as `policy` allows
    #[must_use]
    pub fn open(isbn: &str, user_id: &str, borrowed_at: DateTime<Utc>, policy: BorrowPolicy) -> Self {
        let due_at = borrowed_at
            .checked_add_signed(TimeDelta::days(i64::from(policy.loan_days)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            isbn: isbn.to_string(),
            user_id: user_id.to_string(),
            borrowed_at,
            due_at,
            returned_at: None,
        }
    }

    #[must_use]
    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    #[must_use]
    pub fn borrowed_at(&self) -> DateTime<Utc> {
        self.borrowed_at
    }

    #[must_use]
    pub fn due_at(&self) -> DateTime<Utc> {
        self.due_at
    }

    #[must_use]
    pub fn returned_at(&self) -> Option<DateTime<Utc>> {
        self.returned_at
    }

    /// True while the book has not come back
    #[must_use]
    pub fn is_outstanding(&self) -> bool {
        self.returned_at.is_none()
    }

    /// Whether this record ties `user_id` to `isbn` and is still open
    #[must_use]
    pub fn is_outstanding_for(&self, user_id: &str, isbn: &str) -> bool {
        self.is_outstanding() && self.user_id == user_id && self.isbn == isbn
    }

    /// Outstanding and past its due date at `now`
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.is_outstanding() && self.due_at < now
    }

    /// Calendar days from `now` to the due date; negative once overdue
    #[must_use]
    pub fn days_until_due(&self, now: DateTime<Utc>) -> i64 {
        self.due_at.date_naive().signed_duration_since(now.date_naive()).num_days()
    }

    /// Returned after the due date
    #[must_use]
    pub fn was_returned_late(&self) -> bool {
        self.returned_at.is_some_and(|at| at > self.due_at)
    }

    pub(crate) fn close(&mut self, returned_at: DateTime<Utc>) {
        self.returned_at = Some(returned_at);
    }
}
