//! Trip service port. The chat core only reads trips.

use async_trait::async_trait;

use crate::domain::foundation::TripId;
use crate::domain::travel::Trip;

use super::ServiceError;

#[async_trait]
pub trait TripService: Send + Sync {
    async fn get(&self, id: &TripId) -> Result<Option<Trip>, ServiceError>;
}
