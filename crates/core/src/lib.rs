//! Ecclesia Core - Domain entities, services, and traits.
//!
//! This crate contains the money goal accounting logic of the church
//! administration backend. It is database-agnostic and defines traits that
//! are implemented by the `storage-sqlite` crate.

pub mod errors;
pub mod goal_categories;
pub mod goals;
pub mod users;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
