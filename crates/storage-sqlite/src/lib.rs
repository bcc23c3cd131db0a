//! SQLite storage implementation for Lotfolio.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `lotfolio-core` and contains:
//! - Database connection pooling and the single writer actor
//! - Diesel migrations
//! - Repository implementations for accounts, securities, and inventory
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! `lotfolio-core` is database-agnostic and works with traits.
//!
//! ```text
//!          core (domain, lot engine)
//!                  │
//!                  ▼
//!          storage-sqlite (this crate)
//!                  │
//!                  ▼
//!              SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod accounts;
pub mod inventory;
pub mod securities;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use accounts::AccountRepository;
pub use inventory::{InventoryRepository, SqliteInventoryStore};
pub use securities::SecurityRepository;

// Re-export from lotfolio-core for convenience
pub use lotfolio_core::errors::{DatabaseError, Error, Result};
