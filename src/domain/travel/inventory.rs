//! Searchable inventory entities.
//!
//! These are the values Domain Services return from `search`/`get`. The chat
//! core carries them by value inside rich content and never mutates them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CarId, FlightId, HotelId, LoungeId, Money, RestaurantId};

/// A scheduled flight offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub id: FlightId,
    pub airline: String,
    pub flight_number: String,
    pub origin: String,
    pub origin_code: String,
    pub destination: String,
    pub destination_code: String,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
    pub price: Money,
    pub cabin: String,
    #[serde(default)]
    pub stops: u8,
    #[serde(default = "default_available")]
    pub seats_available: u32,
}

impl Flight {
    /// Human-readable label, e.g. `Alitalia AZ611`.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.airline, self.flight_number)
    }

    /// Strings a user may use to refer to this flight.
    pub fn references(&self) -> Vec<String> {
        vec![self.flight_number.to_lowercase(), self.airline.to_lowercase()]
    }

    /// Checks whether the flight departs from or arrives at the given place (city or airport code).
    pub fn serves(&self, place: &str, arriving: bool) -> bool {
        let (city, code) = if arriving {
            (&self.destination, &self.destination_code)
        } else {
            (&self.origin, &self.origin_code)
        };
        city.eq_ignore_ascii_case(place) || code.eq_ignore_ascii_case(place)
    }
}

/// A hotel property with a nightly rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: HotelId,
    pub name: String,
    pub city: String,
    #[serde(default)]
    pub neighborhood: Option<String>,
    pub stars: u8,
    pub nightly_rate: Money,
    #[serde(default = "default_available")]
    pub rooms_available: u32,
    #[serde(default)]
    pub amenities: Vec<String>,
}

impl Hotel {
    pub fn display_name(&self) -> String {
        self.name.clone()
    }

    pub fn references(&self) -> Vec<String> {
        vec![self.name.to_lowercase()]
    }
}

/// A restaurant that takes reservations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub city: String,
    pub cuisine: String,
    /// 1 (inexpensive) to 4 (fine dining).
    pub price_level: u8,
    pub average_cost: Money,
    #[serde(default = "default_available")]
    pub tables_available: u32,
}

impl Restaurant {
    pub fn display_name(&self) -> String {
        self.name.clone()
    }

    pub fn references(&self) -> Vec<String> {
        vec![self.name.to_lowercase()]
    }
}

/// A rental car offer at a city location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: CarId,
    pub company: String,
    pub model: String,
    pub category: String,
    pub city: String,
    pub daily_rate: Money,
    #[serde(default = "default_true")]
    pub available: bool,
}

impl Car {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.company, self.model)
    }

    pub fn references(&self) -> Vec<String> {
        vec![self.model.to_lowercase(), self.company.to_lowercase()]
    }
}

/// An airport lounge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lounge {
    pub id: LoungeId,
    pub name: String,
    pub airport_code: String,
    pub city: String,
    pub terminal: String,
    pub day_pass: Money,
    #[serde(default)]
    pub amenities: Vec<String>,
}

impl Lounge {
    pub fn display_name(&self) -> String {
        self.name.clone()
    }
}

fn default_available() -> u32 {
    10
}

fn default_true() -> bool {
    true
}
