//! Core error types for the Lotfolio ledger.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.

use rust_decimal::Decimal;
use thiserror::Error;

use lotfolio_market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the ledger.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Ledger(#[from] LedgerError),

    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Validation(_) => "InvalidRequest",
            Error::Ledger(e) => e.code(),
            Error::Database(_) | Error::MarketData(_) | Error::Unexpected(_) => "InternalError",
        }
    }
}

/// Domain failures raised by the security catalog and the lot accounting
/// engine. Each variant carries the ids it was raised for.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Security {security_id} is not a {expected} security")]
    InvalidSecurity { security_id: i64, expected: String },

    #[error("Security {0} not found")]
    SecurityNotFound(i64),

    #[error("Security {security_type}/{exchange}/{symbol} already exists")]
    DuplicateSecurity {
        security_type: String,
        exchange: String,
        symbol: String,
    },

    #[error("Search term '{0}' must be at least 2 characters")]
    InvalidSearchTerm(String),

    #[error("Account {0} not found")]
    AccountNotFound(i64),

    #[error("Account {0} is inactive")]
    InactiveAccount(i64),

    #[error("Inventory {inventory_id} does not belong to account {account_id} and security {security_id}")]
    InvalidInventory {
        inventory_id: i64,
        account_id: i64,
        security_id: i64,
    },

    #[error("Insufficient quantity: requested {requested}, available {available}")]
    InsufficientQuantity {
        requested: Decimal,
        available: Decimal,
    },

    #[error("No holdings of security {security_id} in account {account_id}")]
    NoHoldings { account_id: i64, security_id: i64 },
}

impl LedgerError {
    pub fn code(&self) -> &'static str {
        match self {
            LedgerError::InvalidSecurity { .. } => "InvalidSecurity",
            LedgerError::SecurityNotFound(_) => "SecurityNotFound",
            LedgerError::DuplicateSecurity { .. } => "DuplicateSecurity",
            LedgerError::InvalidSearchTerm(_) => "InvalidSearchTerm",
            LedgerError::AccountNotFound(_) => "AccountNotFound",
            LedgerError::InactiveAccount(_) => "InactiveAccount",
            LedgerError::InvalidInventory { .. } => "InvalidInventory",
            LedgerError::InsufficientQuantity { .. } => "InsufficientQuantity",
            LedgerError::NoHoldings { .. } => "NoHoldings",
        }
    }
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g., duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A foreign key constraint was violated.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),
}

impl Error {
    /// Shorthand for an `InvalidInput` validation error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Error::Validation(ValidationError::InvalidInput(message.into()))
    }
}
