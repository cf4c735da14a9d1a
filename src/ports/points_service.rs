//! Loyalty points service port.

use async_trait::async_trait;

use crate::domain::foundation::TripId;
use crate::domain::travel::PointsBoost;

use super::ServiceError;

#[async_trait]
pub trait PointsService: Send + Sync {
    /// Current points balance of the traveler who owns the trip.
    async fn balance(&self, trip_id: &TripId) -> Result<u64, ServiceError>;

    /// Spends points on an earning boost.
    ///
    /// # Errors
    ///
    /// - `InsufficientPoints` if the balance does not cover the boost
    async fn apply_boost(&self, trip_id: &TripId) -> Result<PointsBoost, ServiceError>;
}
