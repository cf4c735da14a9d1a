//! Error shared by every Domain Service port.

use thiserror::Error;

/// Failure of a Domain Service call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The referenced entity or booking does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The resource exists but cannot be used (sold out, closed).
    #[error("Unavailable: {0}")]
    Unavailable(String),

    /// The service could not be reached or returned an unusable response.
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Insufficient points: balance {balance}, required {required}")]
    InsufficientPoints { balance: u64, required: u64 },
}

impl ServiceError {
    pub fn not_found(what: impl Into<String>) -> Self {
        ServiceError::NotFound(what.into())
    }

    pub fn unavailable(what: impl Into<String>) -> Self {
        ServiceError::Unavailable(what.into())
    }

    pub fn transport(reason: impl Into<String>) -> Self {
        ServiceError::Transport(reason.into())
    }
}
