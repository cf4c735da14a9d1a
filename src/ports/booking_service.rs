//! Booking service port.

use async_trait::async_trait;

use crate::domain::foundation::{ConfirmationNumber, TripId};
use crate::domain::travel::Booking;

use super::ServiceError;

#[async_trait]
pub trait BookingService: Send + Sync {
    /// Every booking on a trip, oldest first.
    async fn list(&self, trip_id: &TripId) -> Result<Vec<Booking>, ServiceError>;

    async fn get(&self, confirmation: &ConfirmationNumber) -> Result<Option<Booking>, ServiceError>;

    /// Cancels an active booking.
    ///
    /// Returns `false` if no active booking carries this confirmation number.
    async fn cancel(&self, confirmation: &ConfirmationNumber) -> Result<bool, ServiceError>;
}
