use crate::events::LedgerEvent;

/// Trait for ledger event observation
pub trait LedgerObserver {
    /// Called after a transition has been applied
    fn on_event(&self, event: &LedgerEvent);
}

/// Logs every transition that occurs in the ledger
#[derive(Debug)]
pub struct TransitionLogger;

impl LedgerObserver for TransitionLogger {
    fn on_event(&self, event: &LedgerEvent) {
        match event {
            LedgerEvent::BookAdded { isbn, title } => {
                tracing::info!("Book added: {title} ({isbn})");
            }
            LedgerEvent::UserRegistered { user_id, name, kind } => {
                tracing::info!("{kind} registered: {name} ({user_id})");
            }
            LedgerEvent::Borrowed { user_id, isbn, .. } => {
                tracing::info!("Loan opened: {isbn} -> {user_id}");
            }
            LedgerEvent::Returned { user_id, isbn, .. } => {
                tracing::info!("Loan closed: {isbn} <- {user_id}");
            }
        }
    }
}

/// Reports due dates and late returns
#[derive(Debug)]
pub struct DueDateNotifier;

impl LedgerObserver for DueDateNotifier {
    fn on_event(&self, event: &LedgerEvent) {
        match event {
            LedgerEvent::Borrowed { user_id, isbn, due_at } => {
                tracing::debug!("{isbn} is due back from {user_id} on {}", due_at.format("%Y-%m-%d"));
            }
            LedgerEvent::Returned { user_id, isbn, late: true, .. } => {
                tracing::warn!("{isbn} was returned late by {user_id}");
            }
            _ => {}
        }
    }
}
