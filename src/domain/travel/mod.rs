//! Travel module - entities owned by the Domain Services.
//!
//! The chat core receives these by value from the service ports and hands them
//! to the UI inside rich content.

mod booking;
mod catalog;
mod inventory;
mod points;
mod trip;

pub use booking::{Booking, BookingExtras, BookingKind, BookingStatus};
pub use catalog::{Destination, Theme};
pub use inventory::{Car, Flight, Hotel, Lounge, Restaurant};
pub use points::{PointsBoost, BOOST_COST, BOOST_MULTIPLIER};
pub use trip::{Trip, TripStatus};
