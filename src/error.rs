//! Error types.
//!
//! Ledger operations fail with a typed `LedgerError` so that callers can tell bad input apart from
//! a missing sale. Everything above the ledger (config, storage, commands) uses `anyhow` and adds
//! context as errors bubble up.

use crate::model::SaleId;

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// The result type returned by `Ledger` operations.
pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

/// Errors raised by the in-memory ledger.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum LedgerError {
    /// The sale input did not pass validation. Nothing was changed.
    #[error("Invalid sale: {0}")]
    Validation(String),

    /// No sale has the given id. Nothing was changed.
    #[error("Sale not found: {0}")]
    NotFound(SaleId),

    /// Stored ledger data could not be parsed.
    #[error("Unable to parse stored sales data: {0}")]
    PersistenceFormat(String),
}

impl LedgerError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        LedgerError::Validation(message.into())
    }

    /// Returns true if this is a `Validation` error.
    pub fn is_validation(&self) -> bool {
        matches!(self, LedgerError::Validation(_))
    }

    /// Returns true if this is a `NotFound` error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LedgerError::NotFound(_))
    }
}
