//! Attendance Core - Domain entities, accounting rules, services, and traits.
//!
//! This crate contains the business logic for the attendance tracker.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod errors;
pub mod subjects;
pub mod users;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
