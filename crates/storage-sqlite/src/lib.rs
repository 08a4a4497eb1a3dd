//! SQLite storage implementation for the ohda float tracker.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in `ohda-core`
//! and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for floats, requests, expenses, and users
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies
//! exist. `ohda-core` is database-agnostic and works with traits.
//!
//! All writes funnel through a single writer actor (see [`db::WriteHandle`]),
//! which serializes every mutation inside an immediate transaction. Balance
//! adjustments run their read-modify-write entirely on the writer, so
//! concurrent postings against the same float cannot lose an update.

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod expenses;
pub mod floats;
pub mod requests;
pub mod users;

// Re-export database utilities
pub use db::{create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool, WriteHandle};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from ohda-core for convenience
pub use ohda_core::errors::{DatabaseError, Error, Result};
