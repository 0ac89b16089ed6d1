use thiserror::Error;

use crate::storage::StoreError;

#[derive(Error, Debug, Clone)]
pub enum LedgerError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Insufficient balance: {scope} holds {available} {token}, needed {needed}")]
    InsufficientBalance {
        scope: String,
        token: String,
        needed: String,
        available: String,
    },
    #[error("Invalid scope: {0}")]
    InvalidScope(String),
    #[error("Store fault: {0}")]
    StoreFault(String),
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<StoreError> for LedgerError {
    fn from(err: StoreError) -> Self {
        LedgerError::StoreFault(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
