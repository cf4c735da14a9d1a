//! Remote inventory - Domain Service ports over a REST/JSON inventory API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = RemoteInventoryConfig::new("https://inventory.example.com/v1")
//!     .with_api_key("secret")
//!     .with_timeout(Duration::from_secs(5));
//!
//! let inventory = Arc::new(RemoteInventory::new(config)?);
//! let services = TravelServices::from_inventory(inventory);
//! ```
//!
//! # Status mapping
//!
//! | Status      | Error                |
//! |-------------|----------------------|
//! | 404         | `NotFound`           |
//! | 409, 422    | `Unavailable`        |
//! | 402         | `InsufficientPoints` |
//! | other       | `Transport`          |

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::foundation::{CarId, ConfirmationNumber, FlightId, HotelId, RestaurantId, TripId};
use crate::domain::travel::{
    Booking, BookingExtras, Car, Destination, Flight, Hotel, Lounge, PointsBoost, Restaurant,
    Theme, Trip, BOOST_COST,
};
use crate::ports::{
    BookingService, CarQuery, CarService, DestinationService, FlightQuery, FlightService,
    HotelQuery, HotelService, LoungeService, PointsService, RestaurantQuery, RestaurantService,
    ServiceError, TripService,
};

/// Configuration for the remote inventory client.
#[derive(Debug, Clone)]
pub struct RemoteInventoryConfig {
    pub base_url: String,
    api_key: Option<Secret<String>>,
    pub timeout: Duration,
}

impl RemoteInventoryConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(Secret::new(api_key.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|k| k.expose_secret().as_str())
    }
}

/// Booking request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BookRequest<'a> {
    trip_id: &'a TripId,
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<NaiveDate>,
    guests: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TripParam<'a> {
    trip_id: &'a TripId,
}

#[derive(Debug, Deserialize)]
struct BalanceResponse {
    balance: u64,
}

#[derive(Debug, Deserialize)]
struct InsufficientPointsBody {
    balance: u64,
    required: u64,
}

/// REST client implementing every Domain Service port.
pub struct RemoteInventory {
    config: RemoteInventoryConfig,
    client: Client,
}

impl RemoteInventory {
    /// Creates the client.
    ///
    /// # Errors
    ///
    /// - `Transport` if the HTTP client cannot be built
    pub fn new(config: RemoteInventoryConfig) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ServiceError::transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match self.config.api_key() {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<reqwest::Response, ServiceError> {
        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ServiceError::transport(format!(
                    "Inventory timed out after {}s",
                    self.config.timeout.as_secs()
                ))
            } else if e.is_connect() {
                ServiceError::transport(format!("Connection failed: {}", e))
            } else {
                ServiceError::transport(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(error_for_status(status, &body))
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ServiceError> {
        let response = self.send(builder).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ServiceError::transport(format!("Invalid inventory response: {}", e)))
    }

    /// Like `fetch`, but a 404 is `None` rather than an error.
    async fn fetch_optional<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<Option<T>, ServiceError> {
        match self.fetch(builder).await {
            Ok(value) => Ok(Some(value)),
            Err(ServiceError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn post_booking(
        &self,
        path: String,
        trip_id: &TripId,
        extras: &BookingExtras,
    ) -> Result<Booking, ServiceError> {
        let body = BookRequest {
            trip_id,
            date: extras.date,
            guests: extras.guests_or_default(),
        };
        self.fetch(self.request(Method::POST, &path).json(&body)).await
    }
}

/// Maps a non-success status to a `ServiceError`.
fn error_for_status(status: StatusCode, body: &str) -> ServiceError {
    match status.as_u16() {
        404 => ServiceError::not_found(non_empty(body, "resource")),
        409 | 422 => ServiceError::unavailable(non_empty(body, "resource")),
        402 => match serde_json::from_str::<InsufficientPointsBody>(body) {
            Ok(parsed) => ServiceError::InsufficientPoints {
                balance: parsed.balance,
                required: parsed.required,
            },
            Err(_) => ServiceError::InsufficientPoints {
                balance: 0,
                required: BOOST_COST,
            },
        },
        _ => ServiceError::transport(format!("Unexpected status {}: {}", status, body)),
    }
}

fn non_empty(body: &str, fallback: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

#[async_trait]
impl FlightService for RemoteInventory {
    async fn search(&self, query: &FlightQuery) -> Result<Vec<Flight>, ServiceError> {
        self.fetch(self.request(Method::GET, "/flights").query(query)).await
    }

    async fn get(&self, id: &FlightId) -> Result<Option<Flight>, ServiceError> {
        self.fetch_optional(self.request(Method::GET, &format!("/flights/{}", id)))
            .await
    }

    async fn book(
        &self,
        trip_id: &TripId,
        flight: &Flight,
        extras: &BookingExtras,
    ) -> Result<Booking, ServiceError> {
        self.post_booking(format!("/flights/{}/book", flight.id), trip_id, extras).await
    }
}

#[async_trait]
impl HotelService for RemoteInventory {
    async fn search(&self, query: &HotelQuery) -> Result<Vec<Hotel>, ServiceError> {
        self.fetch(self.request(Method::GET, "/hotels").query(query)).await
    }

    async fn get(&self, id: &HotelId) -> Result<Option<Hotel>, ServiceError> {
        self.fetch_optional(self.request(Method::GET, &format!("/hotels/{}", id)))
            .await
    }

    async fn book(
        &self,
        trip_id: &TripId,
        hotel: &Hotel,
        extras: &BookingExtras,
    ) -> Result<Booking, ServiceError> {
        self.post_booking(format!("/hotels/{}/book", hotel.id), trip_id, extras).await
    }
}

#[async_trait]
impl RestaurantService for RemoteInventory {
    async fn search(&self, query: &RestaurantQuery) -> Result<Vec<Restaurant>, ServiceError> {
        self.fetch(self.request(Method::GET, "/restaurants").query(query))
            .await
    }

    async fn get(&self, id: &RestaurantId) -> Result<Option<Restaurant>, ServiceError> {
        self.fetch_optional(self.request(Method::GET, &format!("/restaurants/{}", id)))
            .await
    }

    async fn book(
        &self,
        trip_id: &TripId,
        restaurant: &Restaurant,
        extras: &BookingExtras,
    ) -> Result<Booking, ServiceError> {
        let path = format!("/restaurants/{}/book", restaurant.id);
        self.post_booking(path, trip_id, extras).await
    }
}

#[async_trait]
impl CarService for RemoteInventory {
    async fn search(&self, query: &CarQuery) -> Result<Vec<Car>, ServiceError> {
        self.fetch(self.request(Method::GET, "/cars").query(query)).await
    }

    async fn get(&self, id: &CarId) -> Result<Option<Car>, ServiceError> {
        self.fetch_optional(self.request(Method::GET, &format!("/cars/{}", id)))
            .await
    }

    async fn book(
        &self,
        trip_id: &TripId,
        car: &Car,
        extras: &BookingExtras,
    ) -> Result<Booking, ServiceError> {
        self.post_booking(format!("/cars/{}/book", car.id), trip_id, extras).await
    }
}

#[async_trait]
impl LoungeService for RemoteInventory {
    async fn search(&self, airport: &str) -> Result<Vec<Lounge>, ServiceError> {
        self.fetch(self.request(Method::GET, "/lounges").query(&[("airport", airport)]))
            .await
    }
}

#[async_trait]
impl BookingService for RemoteInventory {
    async fn list(&self, trip_id: &TripId) -> Result<Vec<Booking>, ServiceError> {
        let params = TripParam { trip_id };
        self.fetch(self.request(Method::GET, "/bookings").query(&params))
            .await
    }

    async fn get(&self, confirmation: &ConfirmationNumber) -> Result<Option<Booking>, ServiceError> {
        self.fetch_optional(self.request(Method::GET, &format!("/bookings/{}", confirmation)))
            .await
    }

    async fn cancel(&self, confirmation: &ConfirmationNumber) -> Result<bool, ServiceError> {
        let builder = self.request(Method::DELETE, &format!("/bookings/{}", confirmation));
        match self.send(builder).await {
            Ok(_) => Ok(true),
            Err(ServiceError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl TripService for RemoteInventory {
    async fn get(&self, id: &TripId) -> Result<Option<Trip>, ServiceError> {
        self.fetch_optional(self.request(Method::GET, &format!("/trips/{}", id)))
            .await
    }
}

#[async_trait]
impl PointsService for RemoteInventory {
    async fn balance(&self, trip_id: &TripId) -> Result<u64, ServiceError> {
        let params = TripParam { trip_id };
        let response: BalanceResponse = self
            .fetch(self.request(Method::GET, "/points/balance").query(&params))
            .await?;
        Ok(response.balance)
    }

    async fn apply_boost(&self, trip_id: &TripId) -> Result<PointsBoost, ServiceError> {
        let body = TripParam { trip_id };
        self.fetch(self.request(Method::POST, "/points/boost").json(&body))
            .await
    }
}

#[async_trait]
impl DestinationService for RemoteInventory {
    async fn list(&self) -> Result<Vec<Destination>, ServiceError> {
        self.fetch(self.request(Method::GET, "/destinations")).await
    }

    async fn search(&self, theme: Option<&str>) -> Result<Vec<Destination>, ServiceError> {
        let builder = self.request(Method::GET, "/destinations");
        let builder = match theme {
            Some(theme) => builder.query(&[("theme", theme)]),
            None => builder,
        };
        self.fetch(builder).await
    }

    async fn themes(&self) -> Result<Vec<Theme>, ServiceError> {
        self.fetch(self.request(Method::GET, "/themes")).await
    }
}
