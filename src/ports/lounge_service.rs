//! Airport lounge service port. Lounges are informational, not bookable.

use async_trait::async_trait;

use crate::domain::travel::Lounge;

use super::ServiceError;

#[async_trait]
pub trait LoungeService: Send + Sync {
    /// Lounges at an airport, matched by city name or airport code.
    async fn search(&self, airport: &str) -> Result<Vec<Lounge>, ServiceError>;
}
