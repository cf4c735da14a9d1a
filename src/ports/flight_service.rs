//! Flight service port.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::foundation::{FlightId, TripId};
use crate::domain::travel::{Booking, BookingExtras, Flight};

use super::ServiceError;

/// Flight search filters. Unset fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passengers: Option<u32>,
}

#[async_trait]
pub trait FlightService: Send + Sync {
    /// Flights matching the query, cheapest first.
    async fn search(&self, query: &FlightQuery) -> Result<Vec<Flight>, ServiceError>;

    /// Current state of a flight. `None` if it no longer exists.
    async fn get(&self, id: &FlightId) -> Result<Option<Flight>, ServiceError>;

    /// Books seats on a flight for a trip.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the flight does not exist
    /// - `Unavailable` if the flight is sold out
    async fn book(
        &self,
        trip_id: &TripId,
        flight: &Flight,
        extras: &BookingExtras,
    ) -> Result<Booking, ServiceError>;
}
