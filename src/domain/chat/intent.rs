//! Intent value objects.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ConfirmationNumber;
use crate::domain::travel::BookingKind;

/// Classified purpose of a user utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntentKind {
    SearchFlight,
    SearchHotel,
    SearchRestaurant,
    SearchCar,
    SearchLounge,
    BookFlight,
    BookHotel,
    BookRestaurant,
    BookCar,
    CancelBooking,
    CheckBalance,
    ApplyPointsBoost,
    ListBookings,
    PlanTrip,
    ExploreDestinations,
    General,
}

impl IntentKind {
    /// Search intent for a vertical.
    pub fn search(kind: BookingKind) -> Self {
        match kind {
            BookingKind::Flight => IntentKind::SearchFlight,
            BookingKind::Hotel => IntentKind::SearchHotel,
            BookingKind::Restaurant => IntentKind::SearchRestaurant,
            BookingKind::Car => IntentKind::SearchCar,
        }
    }

    /// Booking intent for a vertical.
    pub fn book(kind: BookingKind) -> Self {
        match kind {
            BookingKind::Flight => IntentKind::BookFlight,
            BookingKind::Hotel => IntentKind::BookHotel,
            BookingKind::Restaurant => IntentKind::BookRestaurant,
            BookingKind::Car => IntentKind::BookCar,
        }
    }

    /// The vertical a booking intent acts on.
    pub fn booking_kind(&self) -> Option<BookingKind> {
        match self {
            IntentKind::BookFlight => Some(BookingKind::Flight),
            IntentKind::BookHotel => Some(BookingKind::Hotel),
            IntentKind::BookRestaurant => Some(BookingKind::Restaurant),
            IntentKind::BookCar => Some(BookingKind::Car),
            _ => None,
        }
    }

    pub fn is_search(&self) -> bool {
        matches!(
            self,
            IntentKind::SearchFlight
                | IntentKind::SearchHotel
                | IntentKind::SearchRestaurant
                | IntentKind::SearchCar
                | IntentKind::SearchLounge
        )
    }

    /// Intents that need a location and may default it from the trip.
    pub fn needs_location(&self) -> bool {
        self.is_search() || *self == IntentKind::PlanTrip
    }
}

/// Entity slots extracted from the utterance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentSlots {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub date: Option<NaiveDate>,
    pub guest_count: Option<u32>,
    pub cuisine: Option<String>,
    pub theme: Option<String>,
    pub confirmation_number: Option<ConfirmationNumber>,
    /// The original utterance, preserved for fallback handling.
    pub query: String,
}

/// A classified utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    pub kind: IntentKind,
    pub slots: IntentSlots,
}

impl Intent {
    pub fn new(kind: IntentKind, slots: IntentSlots) -> Self {
        Self { kind, slots }
    }

    /// A `general` intent carrying only the free text.
    pub fn general(query: impl Into<String>) -> Self {
        Self {
            kind: IntentKind::General,
            slots: IntentSlots {
                query: query.into(),
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_and_book_map_back_to_kind() {
        for kind in [
            BookingKind::Flight,
            BookingKind::Hotel,
            BookingKind::Restaurant,
            BookingKind::Car,
        ] {
            assert_eq!(IntentKind::book(kind).booking_kind(), Some(kind));
            assert!(IntentKind::search(kind).is_search());
        }
    }

    #[test]
    fn location_is_needed_for_search_and_planning_only() {
        assert!(IntentKind::SearchLounge.needs_location());
        assert!(IntentKind::PlanTrip.needs_location());
        assert!(!IntentKind::BookHotel.needs_location());
        assert!(!IntentKind::CheckBalance.needs_location());
    }

    #[test]
    fn intent_kind_serializes_camel_case() {
        assert_eq!(
            serde_json::to_string(&IntentKind::ApplyPointsBoost).unwrap(),
            "\"applyPointsBoost\""
        );
    }
}
