//! Restaurant service port.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::foundation::{RestaurantId, TripId};
use crate::domain::travel::{Booking, BookingExtras, Restaurant};

use super::ServiceError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party_size: Option<u32>,
}

#[async_trait]
pub trait RestaurantService: Send + Sync {
    async fn search(&self, query: &RestaurantQuery) -> Result<Vec<Restaurant>, ServiceError>;

    async fn get(&self, id: &RestaurantId) -> Result<Option<Restaurant>, ServiceError>;

    /// Reserves a table for `extras.guests`.
    async fn book(
        &self,
        trip_id: &TripId,
        restaurant: &Restaurant,
        extras: &BookingExtras,
    ) -> Result<Booking, ServiceError>;
}
