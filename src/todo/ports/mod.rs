//! Port contracts for TODO synchronization.
//!
//! Ports define infrastructure-agnostic interfaces used by TODO services.

pub mod messaging;
pub mod observer;
pub mod store;

pub use messaging::{MessageHandle, MessagingError, MessagingResult, MessagingSurface};
pub use observer::{ResetPass, SyncIncident, SyncObserver};
pub use store::{TaskStore, TaskStoreError, TaskStoreResult};
