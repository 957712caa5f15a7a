//! `SQLite` adapter for TODO persistence.

mod models;
mod schema;
mod store;

pub use store::{SqliteTaskStore, TodoSqlitePool};
