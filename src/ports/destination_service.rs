//! Destination catalog port.

use async_trait::async_trait;

use crate::domain::travel::{Destination, Theme};

use super::ServiceError;

#[async_trait]
pub trait DestinationService: Send + Sync {
    /// Every known destination.
    async fn list(&self) -> Result<Vec<Destination>, ServiceError>;

    /// Destinations tagged with a theme slug, or all when `theme` is `None`.
    async fn search(&self, theme: Option<&str>) -> Result<Vec<Destination>, ServiceError>;

    async fn themes(&self) -> Result<Vec<Theme>, ServiceError>;
}
