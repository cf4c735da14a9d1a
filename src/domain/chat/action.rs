//! Outcome of resolving an intent against the Domain Services.

use serde::Serialize;
use thiserror::Error;

use crate::domain::foundation::ConfirmationNumber;
use crate::domain::travel::{
    Booking, BookingKind, Car, Destination, Flight, Hotel, Lounge, PointsBoost, Restaurant, Theme,
};

/// A domain entity returned by a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum DomainEntity {
    Flight(Flight),
    Hotel(Hotel),
    Restaurant(Restaurant),
    Car(Car),
    Lounge(Lounge),
    Destination(Destination),
    Theme(Theme),
    Booking(Booking),
}

/// Why an action could not be completed.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "code", rename_all = "camelCase")]
pub enum ErrorKind {
    #[error("missing parameter: {name}")]
    MissingParameter { name: String },

    #[error("no {kind} to book")]
    NoCandidate { kind: BookingKind },

    #[error("not found: {what}")]
    NotFound { what: String },

    #[error("service unavailable: {what}")]
    ServiceUnavailable { what: String },

    /// Reserved for multi-candidate disambiguation; never produced today.
    #[error("ambiguous: {what}")]
    Ambiguous { what: String },

    #[error("insufficient points: balance {balance}, required {required}")]
    InsufficientPoints { balance: u64, required: u64 },
}

impl ErrorKind {
    pub fn missing_parameter(name: impl Into<String>) -> Self {
        ErrorKind::MissingParameter { name: name.into() }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        ErrorKind::NotFound { what: what.into() }
    }

    pub fn service_unavailable(what: impl Into<String>) -> Self {
        ErrorKind::ServiceUnavailable { what: what.into() }
    }
}

/// Result of one resolved intent. Failures are values, never panics or errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    Entities(Vec<DomainEntity>),
    Confirmation(Booking),
    Cancelled(ConfirmationNumber),
    Balance(u64),
    Boost(PointsBoost),
    Error(ErrorKind),
    None,
}

impl ActionResult {
    /// Short variant name for logs.
    pub fn label(&self) -> &'static str {
        match self {
            ActionResult::Entities(_) => "entities",
            ActionResult::Confirmation(_) => "confirmation",
            ActionResult::Cancelled(_) => "cancelled",
            ActionResult::Balance(_) => "balance",
            ActionResult::Boost(_) => "boost",
            ActionResult::Error(_) => "error",
            ActionResult::None => "none",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ActionResult::Error(_))
    }
}

impl From<ErrorKind> for ActionResult {
    fn from(kind: ErrorKind) -> Self {
        ActionResult::Error(kind)
    }
}
