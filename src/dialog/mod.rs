//! Shared confirmation dialog.
//!
//! A single [`DialogHost`] is mounted for the whole application. Any call site
//! can ask it for a decision through a [`TriggerCoordinator`], which publishes
//! on the [`DialogBus`] and never touches the host directly:
//!
//! 1. the coordinator publishes `open` with a [`DialogRequest`]
//! 2. the host shows it and the user confirms or cancels
//! 3. the host publishes `confirm` or `close`
//! 4. on confirm the coordinator runs its action, publishes `reset` on
//!    success, and always finishes with `close`
//!
//! After a `close` the host keeps the old session mounted for a short delay
//! so the hiding dialog does not flash empty; a new `open` cancels that timer.

pub mod bus;
pub mod content;
pub mod coordinator;
pub mod host;
pub mod session;

use std::sync::{Mutex, MutexGuard, PoisonError};

pub use bus::{Channel, DialogBus, Subscription};
pub use content::{DetailBody, DialogBody, TextBody};
pub use coordinator::{FlowOutcome, OnSuccess, PendingFlow, TriggerCoordinator};
pub use host::{DialogHost, Visibility};
pub use session::{DialogContent, DialogRequest, DialogSession};

/// Misuse of the dialog protocol by a caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DialogError {
    #[error("no active dialog session to confirm")]
    NoActiveSession,
}

/// Lock a mutex, recovering the data if a previous holder panicked.
pub(crate) fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
