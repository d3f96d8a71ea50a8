use std::fmt;

use serde::Serialize;

/// A catalog entry.
///
/// Availability and the current borrower are a cached view of the ledger.
/// Only [`Ledger`](crate::Ledger) transitions may change them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    /// Catalog key
    isbn: String,
    /// Book title
    title: String,
    /// Book author
    author: String,
    /// Whether the book is on the shelf
    available: bool,
    /// Id of the user currently holding the book
    borrowed_by: Option<String>,
}

impl Book {
    /// Create a new, available book
    #[must_use]
    pub fn new(isbn: &str, title: &str, author: &str) -> Self {
        Self {
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            available: true,
            borrowed_by: None,
        }
    }

    #[must_use]
    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Id of the user holding the book, if it is out
    #[must_use]
    pub fn borrowed_by(&self) -> Option<&str> {
        self.borrowed_by.as_deref()
    }

    /// Take the book off the shelf for `user_id`
    pub(crate) fn mark_borrowed(&mut self, user_id: &str) {
        self.available = false;
        self.borrowed_by = Some(user_id.to_string());
    }

    /// Put the book back on the shelf
    pub(crate) fn mark_returned(&mut self) {
        self.available = true;
        self.borrowed_by = None;
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ISBN: {} | Title: {} | Author: {} | Available: {}",
            self.isbn,
            self.title,
            self.author,
            if self.available { "Yes" } else { "No" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Book;

    #[test]
    fn test_new_book_is_available() {
        let book = Book::new("ISBN001", "Java Programming", "John Doe");
        assert!(book.is_available());
        assert_eq!(book.borrowed_by(), None);
    }

    #[test]
    fn test_display_reflects_availability() {
        let mut book = Book::new("ISBN002", "Data Structures", "Jane Smith");
        assert_eq!(
            book.to_string(),
            "ISBN: ISBN002 | Title: Data Structures | Author: Jane Smith | Available: Yes"
        );

        book.mark_borrowed("S001");
        assert!(book.to_string().ends_with("Available: No"));
        assert_eq!(book.borrowed_by(), Some("S001"));

        book.mark_returned();
        assert!(book.is_available());
        assert_eq!(book.borrowed_by(), None);
    }
}
