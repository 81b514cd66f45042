//! SQLite storage implementation for Ecclesia.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `ecclesia-core` and contains:
//! - Database connection pooling and the single-writer actor
//! - Diesel migrations
//! - Repository implementations for money goals, contributions and categories
//! - Database-specific model types (with Diesel derives)
//!
//! ```text
//!   server (HTTP)
//!        │
//!        ▼
//!   core (domain) ◄── traits
//!        │
//!        ▼
//!   storage-sqlite (this crate)
//!        │
//!        ▼
//!    SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod goal_categories;
pub mod goals;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use goal_categories::MoneyGoalCategoryRepository;
pub use goals::MoneyGoalRepository;

// Re-export from ecclesia-core for convenience
pub use ecclesia_core::errors::{DatabaseError, Error, Result};
