//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid listen address: {0}")]
    InvalidListenAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("History lookback must be between 1 and 100")]
    InvalidHistoryLookback,

    #[error("Max cards must be between 1 and 10")]
    InvalidMaxCards,

    #[error("Max list items must be at least 1")]
    InvalidMaxListItems,

    #[error("Invalid inventory base URL format")]
    InvalidInventoryUrl,

    #[error("Inventory timeout must be between 1 and 120 seconds")]
    InvalidInventoryTimeout,
}
