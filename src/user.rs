use std::fmt;

use serde::Serialize;

/// Borrowing privileges attached to a kind of user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BorrowPolicy {
    /// Maximum number of books held at once
    pub max_borrows: usize,
    /// Length of a loan in days
    pub loan_days: u32,
}

/// The closed set of user categories
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum UserKind {
    /// Enrolled student, identified by a student number
    Student {
        /// Student number
        student_id: String,
    },
    /// Member of staff attached to a department
    Faculty {
        /// Department the member belongs to
        department: String,
    },
    /// Walk-in visitor
    Guest,
}

impl UserKind {
    /// Policy constants for this kind of user
    #[must_use]
    pub const fn policy(&self) -> BorrowPolicy {
        match self {
            Self::Student { .. } => BorrowPolicy { max_borrows: 3, loan_days: 14 },
            Self::Faculty { .. } => BorrowPolicy { max_borrows: 10, loan_days: 30 },
            Self::Guest => BorrowPolicy { max_borrows: 1, loan_days: 7 },
        }
    }

    /// Short type name used in console output
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Student { .. } => "Student",
            Self::Faculty { .. } => "Faculty",
            Self::Guest => "Guest",
        }
    }
}

impl fmt::Display for UserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A registered library user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Registry key
    user_id: String,
    /// Display name
    name: String,
    /// Contact address
    email: String,
    /// Category deciding the borrow policy
    kind: UserKind,
}

impl User {
    #[must_use]
    pub fn new(user_id: &str, name: &str, email: &str, kind: UserKind) -> Self {
        Self {
            user_id: user_id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            kind,
        }
    }

    #[must_use]
    pub fn student(user_id: &str, name: &str, email: &str, student_id: &str) -> Self {
        Self::new(user_id, name, email, UserKind::Student { student_id: student_id.to_string() })
    }

    #[must_use]
    pub fn faculty(user_id: &str, name: &str, email: &str, department: &str) -> Self {
        Self::new(user_id, name, email, UserKind::Faculty { department: department.to_string() })
    }

    #[must_use]
    pub fn guest(user_id: &str, name: &str, email: &str) -> Self {
        Self::new(user_id, name, email, UserKind::Guest)
    }

    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn kind(&self) -> &UserKind {
        &self.kind
    }

    /// Shorthand for `self.kind().policy()`
    #[must_use]
    pub const fn policy(&self) -> BorrowPolicy {
        self.kind.policy()
    }
}
