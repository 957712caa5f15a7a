//! In-memory adapters for TODO ports.

mod messaging;
mod observer;
mod store;

pub use messaging::{InMemoryMessagingSurface, StoredMessage};
pub use observer::RecordingSyncObserver;
pub use store::InMemoryTaskStore;
