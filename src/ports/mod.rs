//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the chat core and the outside world. Adapters implement these ports.
//!
//! ## Domain Service Ports
//!
//! One trait per travel vertical, all failing with [`ServiceError`]:
//! `FlightService`, `HotelService`, `RestaurantService`, `CarService`,
//! `LoungeService`, `BookingService`, `TripService`, `PointsService`,
//! `DestinationService`. [`TravelServices`] bundles them.
//!
//! ## Storage Ports
//!
//! - `ChatHistoryStore` - Per-trip append-only chat log

mod booking_service;
mod car_service;
mod chat_history;
mod destination_service;
mod flight_service;
mod hotel_service;
mod lounge_service;
mod points_service;
mod restaurant_service;
mod service_error;
mod travel_services;
mod trip_service;

pub use booking_service::BookingService;
pub use car_service::{CarQuery, CarService};
pub use chat_history::{ChatHistoryError, ChatHistoryStore};
pub use destination_service::DestinationService;
pub use flight_service::{FlightQuery, FlightService};
pub use hotel_service::{HotelQuery, HotelService};
pub use lounge_service::LoungeService;
pub use points_service::PointsService;
pub use restaurant_service::{RestaurantQuery, RestaurantService};
pub use service_error::ServiceError;
pub use travel_services::TravelServices;
pub use trip_service::TripService;
