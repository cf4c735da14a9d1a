//! Hotel service port.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::foundation::{HotelId, TripId};
use crate::domain::travel::{Booking, BookingExtras, Hotel};

use super::ServiceError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guests: Option<u32>,
}

#[async_trait]
pub trait HotelService: Send + Sync {
    async fn search(&self, query: &HotelQuery) -> Result<Vec<Hotel>, ServiceError>;

    async fn get(&self, id: &HotelId) -> Result<Option<Hotel>, ServiceError>;

    /// Books a room for one night starting at `extras.date`.
    async fn book(
        &self,
        trip_id: &TripId,
        hotel: &Hotel,
        extras: &BookingExtras,
    ) -> Result<Booking, ServiceError>;
}
