//! Rich content cards attached to agent messages.

use serde::{Deserialize, Serialize};

use crate::domain::travel::{
    Booking, BookingKind, Car, Destination, Flight, Hotel, Lounge, Restaurant, Theme,
};

/// Structured card payload the UI renders next to a message.
///
/// Entities are carried by value; the UI never mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum RichContent {
    FlightCard(Flight),
    HotelCard(Hotel),
    RestaurantCard(Restaurant),
    CarCard(Car),
    LoungeCard(Lounge),
    BookingConfirmation(Booking),
    DestinationList(Vec<Destination>),
    ThemeList(Vec<Theme>),
}

impl RichContent {
    /// The bookable entity on this card, if any.
    pub fn bookable(&self) -> Option<BookableItem> {
        match self {
            RichContent::FlightCard(f) => Some(BookableItem::Flight(f.clone())),
            RichContent::HotelCard(h) => Some(BookableItem::Hotel(h.clone())),
            RichContent::RestaurantCard(r) => Some(BookableItem::Restaurant(r.clone())),
            RichContent::CarCard(c) => Some(BookableItem::Car(c.clone())),
            _ => None,
        }
    }

    /// Which vertical a card can be booked in.
    pub fn bookable_kind(&self) -> Option<BookingKind> {
        match self {
            RichContent::FlightCard(_) => Some(BookingKind::Flight),
            RichContent::HotelCard(_) => Some(BookingKind::Hotel),
            RichContent::RestaurantCard(_) => Some(BookingKind::Restaurant),
            RichContent::CarCard(_) => Some(BookingKind::Car),
            _ => None,
        }
    }
}

/// An entity previously surfaced on a card that a booking intent can act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookableItem {
    Flight(Flight),
    Hotel(Hotel),
    Restaurant(Restaurant),
    Car(Car),
}

impl BookableItem {
    pub fn kind(&self) -> BookingKind {
        match self {
            BookableItem::Flight(_) => BookingKind::Flight,
            BookableItem::Hotel(_) => BookingKind::Hotel,
            BookableItem::Restaurant(_) => BookingKind::Restaurant,
            BookableItem::Car(_) => BookingKind::Car,
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            BookableItem::Flight(f) => f.display_name(),
            BookableItem::Hotel(h) => h.display_name(),
            BookableItem::Restaurant(r) => r.display_name(),
            BookableItem::Car(c) => c.display_name(),
        }
    }

    /// Lowercase strings a traveler may use to refer to the item.
    pub fn references(&self) -> Vec<String> {
        match self {
            BookableItem::Flight(f) => f.references(),
            BookableItem::Hotel(h) => h.references(),
            BookableItem::Restaurant(r) => r.references(),
            BookableItem::Car(c) => c.references(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{HotelId, Money};

    fn hotel() -> Hotel {
        Hotel {
            id: HotelId::new("ht-2001").unwrap(),
            name: "Hotel Artemide".to_string(),
            city: "Rome".to_string(),
            neighborhood: None,
            stars: 4,
            nightly_rate: Money::from_dollars(210),
            rooms_available: 3,
            amenities: vec![],
        }
    }

    #[test]
    fn card_serializes_with_type_tag() {
        let json = serde_json::to_value(RichContent::HotelCard(hotel())).unwrap();
        assert_eq!(json["type"], "hotelCard");
        assert_eq!(json["data"]["name"], "Hotel Artemide");
    }

    #[test]
    fn hotel_card_is_bookable() {
        let card = RichContent::HotelCard(hotel());
        assert_eq!(card.bookable_kind(), Some(BookingKind::Hotel));
        assert_eq!(card.bookable().unwrap().display_name(), "Hotel Artemide");
    }

    #[test]
    fn list_cards_are_not_bookable() {
        let card = RichContent::ThemeList(vec![]);
        assert!(card.bookable().is_none());
        assert!(card.bookable_kind().is_none());
    }
}
