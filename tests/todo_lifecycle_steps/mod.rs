//! Step definitions for channel TODO lifecycle scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
