//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the travel concierge domain.

mod errors;
mod ids;
mod money;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{
    BookingId, CarId, ConfirmationNumber, DestinationId, FlightId, HotelId, LoungeId, MessageId,
    RestaurantId, TripId,
};
pub use money::Money;
pub use timestamp::Timestamp;
