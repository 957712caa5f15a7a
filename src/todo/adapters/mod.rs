//! Adapter implementations for TODO ports.

pub mod console;
pub mod memory;
pub mod sqlite;

mod observer;

pub use observer::TracingSyncObserver;
