//! Channel TODO: collaborative task tracking inside chat channels.
//!
//! Members create tasks with a slash command, mark them done with an
//! interactive control, list them, and wipe a channel's state. The crate
//! keeps persisted task records in step with the chat messages that display
//! them, tolerating messages that were deleted, rate-limited, or otherwise
//! unreachable.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure task and command types with no infrastructure
//!   dependencies
//! - **Ports**: Trait interfaces for the task store and messaging surface
//! - **Adapters**: In-memory, `SQLite`, and console implementations
//!
//! # Modules
//!
//! - [`todo`]: Task lifecycle synchronization
//! - [`config`]: Layered configuration for the console driver

pub mod config;
pub mod todo;
