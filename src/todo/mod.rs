//! Channel-scoped TODO tracking.
//!
//! Each task is a persisted record projected onto one or more chat artifacts:
//! a creation message carrying a completion control, and list snapshots. The
//! module keeps the two consistent while either side may fail independently.
//! It follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
