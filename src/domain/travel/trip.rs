//! Trip entity that scopes a chat session.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::TripId;

/// Status of a planned trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TripStatus {
    Planning,
    Booked,
    InProgress,
    Completed,
}

/// A trip as owned by the trip service. The chat core only reads `id` and `destination`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: TripId,
    pub name: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: TripStatus,
}
