use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    book::Book,
    config::OutputFormat,
    ledger::{Loan, UserSummary},
    user::{BorrowPolicy, User},
};

/// JSON shape of a user summary
#[derive(Debug, Serialize)]
struct SummaryView<'a> {
    /// The registered profile
    user: &'a User,
    /// Limits that apply to the user
    policy: BorrowPolicy,
    /// Outstanding loans
    loans: &'a [Loan<'a>],
}

/// Rendering of catalog listings and user summaries
#[derive(Debug)]
pub struct LedgerReport;

impl LedgerReport {
    /// Render a titled list of books
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if JSON rendering fails
    pub fn books(title: &str, books: &[&Book], format: OutputFormat) -> serde_json::Result<String> {
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(books),
            OutputFormat::Text => {
                let mut out = format!("=== {title} ===\n");
                for book in books {
                    // Writing to a String cannot fail
                    let _ = writeln!(out, "{book}");
                }
                Ok(out)
            }
        }
    }

    /// Render a user's profile and outstanding loans as of `now`
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if JSON rendering fails
    pub fn user_summary(
        summary: &UserSummary<'_>,
        now: DateTime<Utc>,
        format: OutputFormat,
    ) -> serde_json::Result<String> {
        let user = summary.user;
        let policy = user.policy();

        if format == OutputFormat::Json {
            let view = SummaryView { user, policy, loans: &summary.loans };
            return serde_json::to_string_pretty(&view);
        }

        let mut out = String::from("=== User Information ===\n");
        let _ = writeln!(out, "Name: {}", user.name());
        let _ = writeln!(out, "Type: {}", user.kind());
        let _ = writeln!(out, "Email: {}", user.email());
        let _ = writeln!(out, "Borrow Limit: {}", policy.max_borrows);
        let _ = writeln!(out, "Borrow Duration: {} days", policy.loan_days);
        out.push_str("\nCurrently Borrowed Books:\n");

        if summary.loans.is_empty() {
            out.push_str("  (none)\n");
        }
        for loan in &summary.loans {
            let _ = writeln!(out, "  - {} (Due: {})", loan.book.title(), Self::due_label(loan, now));
        }
        Ok(out)
    }

    /// Due date as shown at the desk, e.g. `in 14 days, 2024-09-16`
    #[must_use]
    pub fn due_label(loan: &Loan<'_>, now: DateTime<Utc>) -> String {
        let date = loan.record.due_at().format("%Y-%m-%d");
        match loan.record.days_until_due(now) {
            days if days < 0 => format!("overdue by {} days, {date}", days.unsigned_abs()),
            0 => format!("today, {date}"),
            1 => format!("in 1 day, {date}"),
            days => format!("in {days} days, {date}"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::rc::Rc;

    use chrono::{DateTime, TimeDelta, TimeZone, Utc};

    use super::LedgerReport;
    use crate::{book::Book, clock::FixedClock, config::OutputFormat, ledger::Ledger, user::User};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 2, 9, 0, 0).single().unwrap_or_default()
    }

    /// A student holding ISBN001 since `start`, on a clock the test can move
    fn ledger_with_loan() -> (Ledger, Rc<FixedClock>) {
        let clock = Rc::new(FixedClock::new(start()));
        let mut ledger = Ledger::with_clock(Box::new(Rc::clone(&clock)));
        ledger.add_book(Book::new("ISBN001", "Java Programming", "John Doe"));
        ledger.add_book(Book::new("ISBN002", "Data Structures", "Jane Smith"));
        ledger.register_user(User::student("S001", "Alice Cooper", "alice@university.edu", "ST1"));
        assert!(ledger.borrow_book("S001", "ISBN001").is_ok());
        (ledger, clock)
    }

    #[test]
    fn test_text_book_listing() {
        let (ledger, _clock) = ledger_with_loan();
        let text = LedgerReport::books("Available Books", &ledger.list_available_books(), OutputFormat::Text);

        assert!(text.is_ok_and(|text| {
            text.starts_with("=== Available Books ===\n")
                && text.contains("ISBN002")
                && !text.contains("ISBN001")
        }));
    }

    #[test]
    fn test_text_user_summary() {
        let (ledger, clock) = ledger_with_loan();
        clock.advance(TimeDelta::minutes(3));

        let Ok(summary) = ledger.user_summary("S001") else {
            panic!("S001 should be registered");
        };
        let Ok(text) = LedgerReport::user_summary(&summary, ledger.now(), OutputFormat::Text) else {
            panic!("text rendering should not fail");
        };

        assert!(text.contains("Type: Student"));
        assert!(text.contains("Borrow Limit: 3"));
        assert!(text.contains("Borrow Duration: 14 days"));
        assert!(text.contains("  - Java Programming (Due: in 14 days, 2024-09-16)\n"));
    }

    #[test]
    fn test_json_user_summary() {
        let (ledger, _clock) = ledger_with_loan();
        let Ok(summary) = ledger.user_summary("S001") else {
            panic!("S001 should be registered");
        };
        let Ok(json) = LedgerReport::user_summary(&summary, ledger.now(), OutputFormat::Json) else {
            panic!("JSON rendering should not fail");
        };
        let Ok(value) = serde_json::from_str::<serde_json::Value>(&json) else {
            panic!("rendered summary should be valid JSON");
        };

        assert_eq!(value["policy"]["max_borrows"], 3);
        assert_eq!(value["loans"][0]["book"]["isbn"], "ISBN001");
        assert_eq!(value["user"]["kind"]["Student"]["student_id"], "ST1");
    }

    #[test]
    fn test_due_label_counts_days() {
        let clock = Rc::new(FixedClock::new(start()));
        let mut ledger = Ledger::with_clock(Box::new(Rc::clone(&clock)));
        ledger.add_book(Book::new("B1", "Algorithms", "Bob Johnson"));
        ledger.register_user(User::guest("G001", "Charlie Guest", "charlie@email.com"));
        assert!(ledger.borrow_book("G001", "B1").is_ok());

        let Ok(summary) = ledger.user_summary("G001") else {
            panic!("G001 should be registered");
        };
        let Some(loan) = summary.loans.first() else {
            panic!("G001 should hold one loan");
        };

        assert_eq!(LedgerReport::due_label(loan, start()), "in 7 days, 2024-09-09");
        assert_eq!(
            LedgerReport::due_label(loan, start() + TimeDelta::seconds(30)),
            "in 7 days, 2024-09-09"
        );
        assert_eq!(
            LedgerReport::due_label(loan, start() + TimeDelta::days(6)),
            "in 1 day, 2024-09-09"
        );
        assert_eq!(
            LedgerReport::due_label(loan, start() + TimeDelta::days(7)),
            "today, 2024-09-09"
        );
        assert_eq!(
            LedgerReport::due_label(loan, start() + TimeDelta::days(9)),
            "overdue by 2 days, 2024-09-09"
        );
    }

    #[test]
    fn test_fresh_loan_label_on_system_clock() {
        let mut ledger = Ledger::new();
        ledger.add_book(Book::new("ISBN001", "Java Programming", "John Doe"));
        ledger.register_user(User::student("S001", "Alice Cooper", "alice@university.edu", "ST1"));
        assert!(ledger.borrow_book("S001", "ISBN001").is_ok());

        let Ok(summary) = ledger.user_summary("S001") else {
            panic!("S001 should be registered");
        };
        let Some(loan) = summary.loans.first() else {
            panic!("S001 should hold one loan");
        };

        assert!(LedgerReport::due_label(loan, ledger.now()).starts_with("in 14 days, "));
    }
}
