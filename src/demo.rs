//! Scripted walk through the circulation desk.
//!
//! Stocks a small catalog, registers one user of each kind and exercises
//! borrowing, returning and the borrow limits, writing a status line for every
//! outcome.

use std::io::{self, Write};

use crate::{
    book::Book,
    config::{Config, OutputFormat},
    ledger::Ledger,
    report::LedgerReport,
    user::User,
};

/// Date format used in console status lines
const DATE_FORMAT: &str = "%a %b %e %Y";

/// Run the whole demonstration against `ledger`
///
/// # Errors
///
/// Returns an `io::Error` if writing to `out` fails or a listing cannot be
/// rendered
pub fn run<W: Write>(ledger: &mut Ledger, config: &Config, out: &mut W) -> io::Result<()> {
    stock(ledger, out)?;
    separator(out)?;

    show_books(ledger, config.format, "All Books", false, out)?;
    separator(out)?;

    writeln!(out, "\n=== Borrowing Books ===")?;
    borrow(ledger, "S001", "ISBN001", out)?;
    borrow(ledger, "F001", "ISBN002", out)?;
    borrow(ledger, "G001", "ISBN003", out)?;
    separator(out)?;

    show_books(ledger, config.format, "Available Books", true, out)?;
    separator(out)?;

    show_user(ledger, config.format, "S001", out)?;
    show_user(ledger, config.format, "F001", out)?;
    separator(out)?;

    writeln!(out, "\n=== Returning Books ===")?;
    give_back(ledger, "S001", "ISBN001", out)?;
    separator(out)?;

    show_books(ledger, config.format, "Available Books", true, out)?;
    separator(out)?;

    writeln!(out, "\n=== Testing Borrow Limits ===")?;
    // The guest still holds ISBN003, so both requests hit the limit of one
    borrow(ledger, "G001", "ISBN001", out)?;
    borrow(ledger, "G001", "ISBN004", out)?;

    out.flush()
}

/// Populate the catalog and the user registry
fn stock<W: Write>(ledger: &mut Ledger, out: &mut W) -> io::Result<()> {
    let books = [
        Book::new("ISBN001", "Java Programming", "John Doe"),
        Book::new("ISBN002", "Data Structures", "Jane Smith"),
        Book::new("ISBN003", "Algorithms", "Bob Johnson"),
        Book::new("ISBN004", "Design Patterns", "Alice Brown"),
    ];
    for book in books {
        writeln!(out, "Book added: {}", book.title())?;
        ledger.add_book(book);
    }

    let users = [
        User::student("S001", "Alice Cooper", "alice@university.edu", "ST12345"),
        User::faculty("F001", "Dr. Bob Smith", "bob@university.edu", "Computer Science"),
        User::guest("G001", "Charlie Guest", "charlie@email.com"),
    ];
    for user in users {
        writeln!(out, "{} registered: {}", user.kind(), user.name())?;
        ledger.register_user(user);
    }
    Ok(())
}

/// Borrow and report the outcome
fn borrow<W: Write>(ledger: &mut Ledger, user_id: &str, isbn: &str, out: &mut W) -> io::Result<()> {
    match ledger.borrow_book(user_id, isbn) {
        Ok(record) => {
            let name = ledger.user(user_id).map_or(user_id, |user| user.name());
            let title = ledger.book(isbn).map_or(isbn, |book| book.title());
            writeln!(out, "{name} borrowed: {title}")?;
            writeln!(out, "Due date: {}", record.due_at().format(DATE_FORMAT))
        }
        Err(error) => writeln!(out, "Error: {error}"),
    }
}

/// Return and report the outcome
fn give_back<W: Write>(ledger: &mut Ledger, user_id: &str, isbn: &str, out: &mut W) -> io::Result<()> {
    match ledger.return_book(user_id, isbn) {
        Ok(_) => {
            let name = ledger.user(user_id).map_or(user_id, |user| user.name());
            let title = ledger.book(isbn).map_or(isbn, |book| book.title());
            writeln!(out, "{name} returned: {title}")
        }
        Err(error) => writeln!(out, "Error: {error}"),
    }
}

/// Write a book listing in the configured format
fn show_books<W: Write>(
    ledger: &Ledger,
    format: OutputFormat,
    title: &str,
    available_only: bool,
    out: &mut W,
) -> io::Result<()> {
    let books =
        if available_only { ledger.list_available_books() } else { ledger.list_all_books() };
    let rendered = LedgerReport::books(title, &books, format).map_err(io::Error::other)?;
    write!(out, "\n{rendered}")?;
    if format == OutputFormat::Json {
        writeln!(out)?;
    }
    Ok(())
}

/// Write a user summary, or the lookup error
fn show_user<W: Write>(
    ledger: &Ledger,
    format: OutputFormat,
    user_id: &str,
    out: &mut W,
) -> io::Result<()> {
    match ledger.user_summary(user_id) {
        Ok(summary) => {
            let rendered = LedgerReport::user_summary(&summary, ledger.now(), format)
                .map_err(io::Error::other)?;
            write!(out, "\n{rendered}")?;
            if format == OutputFormat::Json {
                writeln!(out)?;
            }
            Ok(())
        }
        Err(error) => writeln!(out, "{error}"),
    }
}

/// Section divider between demo steps
fn separator<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "\n{}", "=".repeat(50))
}
