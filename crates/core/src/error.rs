//! Ledger error model.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::id::AccountNumber;

/// Result type used across the ledger domain.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Ledger-level error.
///
/// Every variant is local to the operation that raised it: the failing call
/// leaves accounts and the registry exactly as they were before it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// An input failed validation (non-positive amount, bad creation parameters).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A withdrawal exceeded the amount the account allows.
    #[error("insufficient funds: requested {requested}, allowed {available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },

    /// No account is registered under this number.
    #[error("account #{0} not found")]
    NotFound(AccountNumber),

    /// An account is already registered under this number.
    #[error("account #{0} already exists")]
    DuplicateAccount(AccountNumber),

    /// The account's variant does not offer the requested operation.
    #[error("account #{number} does not support {operation}")]
    UnsupportedOperation {
        number: AccountNumber,
        operation: &'static str,
    },

    /// An account number could not be parsed.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl LedgerError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn insufficient_funds(requested: Decimal, available: Decimal) -> Self {
        Self::InsufficientFunds {
            requested,
            available,
        }
    }

    pub fn not_found(number: AccountNumber) -> Self {
        Self::NotFound(number)
    }

    pub fn duplicate(number: AccountNumber) -> Self {
        Self::DuplicateAccount(number)
    }

    pub fn unsupported(number: AccountNumber, operation: &'static str) -> Self {
        Self::UnsupportedOperation { number, operation }
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Stable machine-readable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            LedgerError::Validation(_) | LedgerError::InvalidId(_) => "validation_error",
            LedgerError::InsufficientFunds { .. } => "insufficient_funds",
            LedgerError::NotFound(_) => "not_found",
            LedgerError::DuplicateAccount(_) => "duplicate_account",
            LedgerError::UnsupportedOperation { .. } => "unsupported_operation",
        }
    }
}
