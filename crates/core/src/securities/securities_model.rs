//! Security domain models and the fixed type/exchange code tables.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};
use crate::Error;

/// Security category. `Invalid` is the sentinel for unrecognized input and
/// always carries numeric code 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SecurityType {
    #[default]
    Invalid,
    Stock,
    MutualFund,
}

impl SecurityType {
    pub fn code(&self) -> i32 {
        match self {
            SecurityType::Invalid => 0,
            SecurityType::Stock => 1,
            SecurityType::MutualFund => 2,
        }
    }

    pub fn from_code(code: i32) -> Self {
        match code {
            1 => SecurityType::Stock,
            2 => SecurityType::MutualFund,
            _ => SecurityType::Invalid,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityType::Invalid => "INVALID",
            SecurityType::Stock => "STOCK",
            SecurityType::MutualFund => "MUTUAL_FUND",
        }
    }

    pub fn is_valid(&self) -> bool {
        *self != SecurityType::Invalid
    }
}

/// Listing venue. `Amfi` is the NAV source for mutual funds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Exchange {
    #[default]
    Invalid,
    Nse,
    Bse,
    Amfi,
}

impl Exchange {
    pub fn code(&self) -> i32 {
        match self {
            Exchange::Invalid => 0,
            Exchange::Nse => 1,
            Exchange::Bse => 2,
            Exchange::Amfi => 3,
        }
    }

    pub fn from_code(code: i32) -> Self {
        match code {
            1 => Exchange::Nse,
            2 => Exchange::Bse,
            3 => Exchange::Amfi,
            _ => Exchange::Invalid,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Exchange::Invalid => "INVALID",
            Exchange::Nse => "NSE",
            Exchange::Bse => "BSE",
            Exchange::Amfi => "AMFI",
        }
    }

    pub fn is_valid(&self) -> bool {
        *self != Exchange::Invalid
    }
}

/// Resolves a free-form type name. Unknown names map to `SecurityType::Invalid`.
pub fn resolve_type(value: &str) -> SecurityType {
    match value.trim().to_ascii_uppercase().as_str() {
        "STOCK" | "STOCKS" | "EQUITY" => SecurityType::Stock,
        "MUTUAL_FUND" | "MUTUAL-FUND" | "MUTUALFUND" | "MF" => SecurityType::MutualFund,
        _ => SecurityType::Invalid,
    }
}

/// Resolves a free-form exchange name. Unknown names map to `Exchange::Invalid`.
pub fn resolve_exchange(value: &str) -> Exchange {
    match value.trim().to_ascii_uppercase().as_str() {
        "NSE" => Exchange::Nse,
        "BSE" => Exchange::Bse,
        "AMFI" => Exchange::Amfi,
        _ => Exchange::Invalid,
    }
}

/// Normalizes a ticker for storage and identity comparison.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

/// Domain model representing a registered security.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Security {
    pub id: i64,
    pub security_type: SecurityType,
    pub exchange: Exchange,
    pub symbol: String,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for registering a security.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSecurity {
    pub security_type: SecurityType,
    pub exchange: Exchange,
    pub symbol: String,
    pub name: String,
}

impl NewSecurity {
    pub fn validate(&self) -> Result<()> {
        validate_identity(self.security_type, self.exchange, &self.symbol, &self.name)
    }

    /// Returns a copy with the symbol uppercased and the name trimmed.
    pub fn normalized(self) -> Self {
        Self {
            symbol: normalize_symbol(&self.symbol),
            name: self.name.trim().to_string(),
            ..self
        }
    }
}

/// Input model for replacing a security's identity and name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityUpdate {
    pub id: i64,
    pub security_type: SecurityType,
    pub exchange: Exchange,
    pub symbol: String,
    pub name: String,
}

impl SecurityUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id <= 0 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Security ID is required for updates".to_string(),
            )));
        }
        validate_identity(self.security_type, self.exchange, &self.symbol, &self.name)
    }

    pub fn normalized(self) -> Self {
        Self {
            symbol: normalize_symbol(&self.symbol),
            name: self.name.trim().to_string(),
            ..self
        }
    }
}

fn validate_identity(
    security_type: SecurityType,
    exchange: Exchange,
    symbol: &str,
    name: &str,
) -> Result<()> {
    if !security_type.is_valid() {
        return Err(Error::invalid_input("Unknown security type"));
    }
    if !exchange.is_valid() {
        return Err(Error::invalid_input("Unknown exchange"));
    }
    if symbol.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "symbol".to_string(),
        )));
    }
    if name.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "name".to_string(),
        )));
    }
    Ok(())
}
