//! Booking records produced by Domain Service `book` operations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{BookingId, ConfirmationNumber, Money, Timestamp, TripId};

/// Which inventory vertical a booking belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BookingKind {
    Flight,
    Hotel,
    Restaurant,
    Car,
}

impl fmt::Display for BookingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BookingKind::Flight => "flight",
            BookingKind::Hotel => "hotel",
            BookingKind::Restaurant => "restaurant",
            BookingKind::Car => "car",
        };
        write!(f, "{}", s)
    }
}

/// Lifecycle of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

/// A confirmed (or cancelled) reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    pub confirmation_number: ConfirmationNumber,
    pub trip_id: TripId,
    pub kind: BookingKind,
    /// Inventory id of the booked item.
    pub item_id: String,
    /// Display name of the booked item at booking time.
    pub title: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub guests: u32,
    pub total: Money,
    pub status: BookingStatus,
    pub created_at: Timestamp,
}

impl Booking {
    /// Checks if the booking is still active.
    pub fn is_active(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }
}

/// Optional booking parameters taken from the user's message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingExtras {
    pub date: Option<NaiveDate>,
    pub guests: Option<u32>,
}

impl BookingExtras {
    /// Guest count, defaulting to one traveler.
    pub fn guests_or_default(&self) -> u32 {
        self.guests.filter(|g| *g > 0).unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guests_default_to_one() {
        assert_eq!(BookingExtras::default().guests_or_default(), 1);
        let zero = BookingExtras {
            guests: Some(0),
            ..Default::default()
        };
        assert_eq!(zero.guests_or_default(), 1);
    }

    #[test]
    fn booking_kind_displays_lowercase() {
        assert_eq!(BookingKind::Restaurant.to_string(), "restaurant");
    }
}
