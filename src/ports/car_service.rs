//! Rental car service port.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::foundation::{CarId, TripId};
use crate::domain::travel::{Booking, BookingExtras, Car};

use super::ServiceError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_date: Option<NaiveDate>,
}

#[async_trait]
pub trait CarService: Send + Sync {
    async fn search(&self, query: &CarQuery) -> Result<Vec<Car>, ServiceError>;

    async fn get(&self, id: &CarId) -> Result<Option<Car>, ServiceError>;

    /// Books a one-day rental starting at `extras.date`.
    async fn book(&self, trip_id: &TripId, car: &Car, extras: &BookingExtras)
        -> Result<Booking, ServiceError>;
}
