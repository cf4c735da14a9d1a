//! In-memory mock inventory.
//!
//! Implements every Domain Service port over a single store seeded from the
//! embedded YAML catalog. Useful for development, demos and tests.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::domain::foundation::{
    BookingId, CarId, ConfirmationNumber, FlightId, HotelId, Money, RestaurantId, Timestamp,
    TripId,
};
use crate::domain::travel::{
    Booking, BookingExtras, BookingKind, BookingStatus, Car, Destination, Flight, Hotel, Lounge,
    PointsBoost, Restaurant, Theme, Trip, BOOST_COST, BOOST_MULTIPLIER,
};
use crate::ports::{
    BookingService, CarQuery, CarService, DestinationService, FlightQuery, FlightService,
    HotelQuery, HotelService, LoungeService, PointsService, RestaurantQuery, RestaurantService,
    ServiceError, TripService,
};

const SEED_CATALOG: &str = include_str!("seed_catalog.yaml");

/// Errors loading a seed catalog.
#[derive(Debug, Error)]
pub enum InventoryLoadError {
    #[error("Invalid seed catalog: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InventoryState {
    #[serde(default)]
    points_balance: u64,
    #[serde(default)]
    trips: Vec<Trip>,
    #[serde(default)]
    themes: Vec<Theme>,
    #[serde(default)]
    destinations: Vec<Destination>,
    #[serde(default)]
    flights: Vec<Flight>,
    #[serde(default)]
    hotels: Vec<Hotel>,
    #[serde(default)]
    restaurants: Vec<Restaurant>,
    #[serde(default)]
    cars: Vec<Car>,
    #[serde(default)]
    lounges: Vec<Lounge>,
    #[serde(default)]
    bookings: Vec<Booking>,
}

/// A booking about to be recorded.
struct NewBooking<'a> {
    trip_id: &'a TripId,
    kind: BookingKind,
    item_id: String,
    title: String,
    date: Option<NaiveDate>,
    guests: u32,
    total: Money,
}

impl InventoryState {
    fn confirmation_in_use(&self, number: &ConfirmationNumber) -> bool {
        self.bookings.iter().any(|b| &b.confirmation_number == number)
    }

    fn record(&mut self, new: NewBooking<'_>) -> Booking {
        let mut confirmation_number = ConfirmationNumber::generate();
        while self.confirmation_in_use(&confirmation_number) {
            confirmation_number = ConfirmationNumber::generate();
        }

        let booking = Booking {
            id: BookingId::new(),
            confirmation_number,
            trip_id: new.trip_id.clone(),
            kind: new.kind,
            item_id: new.item_id,
            title: new.title,
            date: new.date,
            guests: new.guests,
            total: new.total,
            status: BookingStatus::Confirmed,
            created_at: Timestamp::now(),
        };
        self.bookings.push(booking.clone());
        booking
    }
}

/// Mock inventory shared by all Domain Service ports.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInventory {
    state: Arc<RwLock<InventoryState>>,
}

impl InMemoryInventory {
    /// An empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// The bundled demo catalog.
    pub fn seeded() -> Result<Self, InventoryLoadError> {
        Self::from_yaml(SEED_CATALOG)
    }

    /// Loads an inventory from a YAML catalog.
    pub fn from_yaml(yaml: &str) -> Result<Self, InventoryLoadError> {
        let state: InventoryState = serde_yaml::from_str(yaml)?;
        Ok(Self {
            state: Arc::new(RwLock::new(state)),
        })
    }

    /// Number of bookings recorded, including cancelled ones.
    pub async fn booking_count(&self) -> usize {
        self.state.read().await.bookings.len()
    }
}

fn matches_place(candidate: &str, wanted: &Option<String>) -> bool {
    wanted
        .as_ref()
        .map_or(true, |w| candidate.eq_ignore_ascii_case(w))
}

/// Moves a flight template onto the requested travel date, keeping its times.
fn restamp(mut flight: Flight, date: NaiveDate) -> Flight {
    let shift = Duration::days((date - flight.departure.date_naive()).num_days());
    flight.departure += shift;
    flight.arrival += shift;
    flight
}

#[async_trait]
impl FlightService for InMemoryInventory {
    async fn search(&self, query: &FlightQuery) -> Result<Vec<Flight>, ServiceError> {
        let passengers = query.passengers.unwrap_or(1).max(1);
        let state = self.state.read().await;

        let mut flights: Vec<Flight> = state
            .flights
            .iter()
            .filter(|f| query.origin.as_ref().map_or(true, |o| f.serves(o, false)))
            .filter(|f| query.destination.as_ref().map_or(true, |d| f.serves(d, true)))
            .filter(|f| f.seats_available >= passengers)
            .cloned()
            .map(|f| match query.date {
                Some(date) => restamp(f, date),
                None => f,
            })
            .collect();
        flights.sort_by_key(|f| f.price);
        Ok(flights)
    }

    async fn get(&self, id: &FlightId) -> Result<Option<Flight>, ServiceError> {
        let state = self.state.read().await;
        Ok(state.flights.iter().find(|f| &f.id == id).cloned())
    }

    async fn book(
        &self,
        trip_id: &TripId,
        flight: &Flight,
        extras: &BookingExtras,
    ) -> Result<Booking, ServiceError> {
        let guests = extras.guests_or_default();
        let mut state = self.state.write().await;

        let stored = state
            .flights
            .iter_mut()
            .find(|f| f.id == flight.id)
            .ok_or_else(|| ServiceError::not_found(format!("flight {}", flight.display_name())))?;
        if stored.seats_available < guests {
            return Err(ServiceError::unavailable(format!(
                "{} has {} seats left",
                stored.display_name(),
                stored.seats_available
            )));
        }
        stored.seats_available -= guests;
        let total = stored.price.times(guests);

        Ok(state.record(NewBooking {
            trip_id,
            kind: BookingKind::Flight,
            item_id: flight.id.to_string(),
            title: flight.display_name(),
            date: extras.date.or_else(|| Some(flight.departure.date_naive())),
            guests,
            total,
        }))
    }
}

#[async_trait]
impl HotelService for InMemoryInventory {
    async fn search(&self, query: &HotelQuery) -> Result<Vec<Hotel>, ServiceError> {
        let state = self.state.read().await;
        let mut hotels: Vec<Hotel> = state
            .hotels
            .iter()
            .filter(|h| matches_place(&h.city, &query.city))
            .filter(|h| h.rooms_available > 0)
            .cloned()
            .collect();
        hotels.sort_by_key(|h| h.nightly_rate);
        Ok(hotels)
    }

    async fn get(&self, id: &HotelId) -> Result<Option<Hotel>, ServiceError> {
        let state = self.state.read().await;
        Ok(state.hotels.iter().find(|h| &h.id == id).cloned())
    }

    async fn book(
        &self,
        trip_id: &TripId,
        hotel: &Hotel,
        extras: &BookingExtras,
    ) -> Result<Booking, ServiceError> {
        let mut state = self.state.write().await;

        let stored = state
            .hotels
            .iter_mut()
            .find(|h| h.id == hotel.id)
            .ok_or_else(|| ServiceError::not_found(format!("hotel {}", hotel.name)))?;
        if stored.rooms_available == 0 {
            return Err(ServiceError::unavailable(format!("{} is fully booked", stored.name)));
        }
        stored.rooms_available -= 1;
        let total = stored.nightly_rate;

        Ok(state.record(NewBooking {
            trip_id,
            kind: BookingKind::Hotel,
            item_id: hotel.id.to_string(),
            title: hotel.name.clone(),
            date: extras.date,
            guests: extras.guests_or_default(),
            total,
        }))
    }
}

#[async_trait]
impl RestaurantService for InMemoryInventory {
    async fn search(&self, query: &RestaurantQuery) -> Result<Vec<Restaurant>, ServiceError> {
        let state = self.state.read().await;
        let mut restaurants: Vec<Restaurant> = state
            .restaurants
            .iter()
            .filter(|r| matches_place(&r.city, &query.city))
            .filter(|r| matches_place(&r.cuisine, &query.cuisine))
            .filter(|r| r.tables_available > 0)
            .cloned()
            .collect();
        restaurants.sort_by_key(|r| r.average_cost);
        Ok(restaurants)
    }

    async fn get(&self, id: &RestaurantId) -> Result<Option<Restaurant>, ServiceError> {
        let state = self.state.read().await;
        Ok(state.restaurants.iter().find(|r| &r.id == id).cloned())
    }

    async fn book(
        &self,
        trip_id: &TripId,
        restaurant: &Restaurant,
        extras: &BookingExtras,
    ) -> Result<Booking, ServiceError> {
        let guests = extras.guests_or_default();
        let mut state = self.state.write().await;

        let stored = state
            .restaurants
            .iter_mut()
            .find(|r| r.id == restaurant.id)
            .ok_or_else(|| ServiceError::not_found(format!("restaurant {}", restaurant.name)))?;
        if stored.tables_available == 0 {
            return Err(ServiceError::unavailable(format!("{} has no tables left", stored.name)));
        }
        stored.tables_available -= 1;
        let total = stored.average_cost.times(guests);

        Ok(state.record(NewBooking {
            trip_id,
            kind: BookingKind::Restaurant,
            item_id: restaurant.id.to_string(),
            title: restaurant.name.clone(),
            date: extras.date,
            guests,
            total,
        }))
    }
}

#[async_trait]
impl CarService for InMemoryInventory {
    async fn search(&self, query: &CarQuery) -> Result<Vec<Car>, ServiceError> {
        let state = self.state.read().await;
        let mut cars: Vec<Car> = state
            .cars
            .iter()
            .filter(|c| matches_place(&c.city, &query.city))
            .filter(|c| c.available)
            .cloned()
            .collect();
        cars.sort_by_key(|c| c.daily_rate);
        Ok(cars)
    }

    async fn get(&self, id: &CarId) -> Result<Option<Car>, ServiceError> {
        let state = self.state.read().await;
        Ok(state.cars.iter().find(|c| &c.id == id).cloned())
    }

    async fn book(
        &self,
        trip_id: &TripId,
        car: &Car,
        extras: &BookingExtras,
    ) -> Result<Booking, ServiceError> {
        let mut state = self.state.write().await;

        let stored = state
            .cars
            .iter_mut()
            .find(|c| c.id == car.id)
            .ok_or_else(|| ServiceError::not_found(format!("car {}", car.display_name())))?;
        if !stored.available {
            return Err(ServiceError::unavailable(format!(
                "the {} is already rented",
                stored.display_name()
            )));
        }
        stored.available = false;
        let total = stored.daily_rate;

        Ok(state.record(NewBooking {
            trip_id,
            kind: BookingKind::Car,
            item_id: car.id.to_string(),
            title: car.display_name(),
            date: extras.date,
            guests: extras.guests_or_default(),
            total,
        }))
    }
}

#[async_trait]
impl LoungeService for InMemoryInventory {
    async fn search(&self, airport: &str) -> Result<Vec<Lounge>, ServiceError> {
        let state = self.state.read().await;
        let mut lounges: Vec<Lounge> = state
            .lounges
            .iter()
            .filter(|l| {
                l.airport_code.eq_ignore_ascii_case(airport) || l.city.eq_ignore_ascii_case(airport)
            })
            .cloned()
            .collect();
        lounges.sort_by_key(|l| l.day_pass);
        Ok(lounges)
    }
}

#[async_trait]
impl BookingService for InMemoryInventory {
    async fn list(&self, trip_id: &TripId) -> Result<Vec<Booking>, ServiceError> {
        let state = self.state.read().await;
        Ok(state
            .bookings
            .iter()
            .filter(|b| &b.trip_id == trip_id)
            .cloned()
            .collect())
    }

    async fn get(&self, confirmation: &ConfirmationNumber) -> Result<Option<Booking>, ServiceError> {
        let state = self.state.read().await;
        Ok(state
            .bookings
            .iter()
            .find(|b| &b.confirmation_number == confirmation)
            .cloned())
    }

    async fn cancel(&self, confirmation: &ConfirmationNumber) -> Result<bool, ServiceError> {
        let mut state = self.state.write().await;
        match state
            .bookings
            .iter_mut()
            .find(|b| &b.confirmation_number == confirmation && b.is_active())
        {
            Some(booking) => {
                booking.status = BookingStatus::Cancelled;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl TripService for InMemoryInventory {
    async fn get(&self, id: &TripId) -> Result<Option<Trip>, ServiceError> {
        let state = self.state.read().await;
        Ok(state.trips.iter().find(|t| &t.id == id).cloned())
    }
}

#[async_trait]
impl PointsService for InMemoryInventory {
    async fn balance(&self, _trip_id: &TripId) -> Result<u64, ServiceError> {
        Ok(self.state.read().await.points_balance)
    }

    async fn apply_boost(&self, _trip_id: &TripId) -> Result<PointsBoost, ServiceError> {
        let mut state = self.state.write().await;
        if state.points_balance < BOOST_COST {
            return Err(ServiceError::InsufficientPoints {
                balance: state.points_balance,
                required: BOOST_COST,
            });
        }
        state.points_balance -= BOOST_COST;
        Ok(PointsBoost {
            points_spent: BOOST_COST,
            multiplier: BOOST_MULTIPLIER,
            balance_after: state.points_balance,
        })
    }
}

#[async_trait]
impl DestinationService for InMemoryInventory {
    async fn list(&self) -> Result<Vec<Destination>, ServiceError> {
        Ok(self.state.read().await.destinations.clone())
    }

    async fn search(&self, theme: Option<&str>) -> Result<Vec<Destination>, ServiceError> {
        let state = self.state.read().await;
        Ok(state
            .destinations
            .iter()
            .filter(|d| theme.map_or(true, |t| d.has_theme(t)))
            .cloned()
            .collect())
    }

    async fn themes(&self) -> Result<Vec<Theme>, ServiceError> {
        Ok(self.state.read().await.themes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inventory() -> InMemoryInventory {
        InMemoryInventory::seeded().expect("seed catalog parses")
    }

    fn trip() -> TripId {
        TripId::new("trip-rome").unwrap()
    }

    #[tokio::test]
    async fn seed_catalog_loads() {
        let inv = inventory();
        assert!(!DestinationService::list(&inv).await.unwrap().is_empty());
        assert!(!inv.themes().await.unwrap().is_empty());
        let rome = TripService::get(&inv, &trip()).await.unwrap().unwrap();
        assert_eq!(rome.destination, "Rome");
        assert_eq!(inv.booking_count().await, 1);
    }

    #[tokio::test]
    async fn flight_search_filters_sorts_and_restamps() {
        let inv = inventory();
        let date = NaiveDate::from_ymd_opt(2026, 11, 20).unwrap();
        let query = FlightQuery {
            origin: Some("JFK".to_string()),
            destination: Some("rome".to_string()),
            date: Some(date),
            passengers: None,
        };
        let flights = FlightService::search(&inv, &query).await.unwrap();
        assert_eq!(flights.len(), 3);
        assert!(flights.windows(2).all(|w| w[0].price <= w[1].price));
        assert!(flights.iter().all(|f| f.departure.date_naive() == date));
    }

    #[tokio::test]
    async fn sold_out_items_are_hidden_from_search() {
        let inv = inventory();
        let hotels = HotelService::search(
            &inv,
            &HotelQuery {
                city: Some("Rome".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(hotels.len(), 3);
        assert!(hotels.iter().all(|h| h.name != "Generator Rome"));
    }

    #[tokio::test]
    async fn booking_sold_out_hotel_is_unavailable() {
        let inv = inventory();
        let hotel = HotelService::get(&inv, &HotelId::new("ht-2004").unwrap())
            .await
            .unwrap()
            .unwrap();
        let result = HotelService::book(&inv, &trip(), &hotel, &BookingExtras::default()).await;
        assert!(matches!(result, Err(ServiceError::Unavailable(_))));
    }

    #[tokio::test]
    async fn restaurant_booking_totals_per_guest_and_can_be_cancelled() {
        let inv = inventory();
        let roscioli = RestaurantService::get(&inv, &RestaurantId::new("rs-3001").unwrap())
            .await
            .unwrap()
            .unwrap();
        let extras = BookingExtras {
            date: NaiveDate::from_ymd_opt(2026, 11, 20),
            guests: Some(4),
        };
        let booking = RestaurantService::book(&inv, &trip(), &roscioli, &extras)
            .await
            .unwrap();
        assert_eq!(booking.total, Money::from_dollars(260));
        assert_eq!(booking.kind, BookingKind::Restaurant);
        assert!(booking.is_active());

        let number = booking.confirmation_number.clone();
        assert!(inv.cancel(&number).await.unwrap());
        assert!(!inv.cancel(&number).await.unwrap());
        let stored = BookingService::get(&inv, &number).await.unwrap().unwrap();
        assert_eq!(stored.status, BookingStatus::Cancelled);
    }

    #[tokio::test]
    async fn booking_unknown_item_is_not_found() {
        let inv = InMemoryInventory::new();
        let car = Car {
            id: CarId::new("cr-missing").unwrap(),
            company: "Hertz".to_string(),
            model: "Panda".to_string(),
            category: "compact".to_string(),
            city: "Rome".to_string(),
            daily_rate: Money::from_dollars(30),
            available: true,
        };
        let result = CarService::book(&inv, &trip(), &car, &BookingExtras::default()).await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn boost_spends_points_until_insufficient() {
        let inv = InMemoryInventory::from_yaml("pointsBalance: 7000").unwrap();
        let boost = inv.apply_boost(&trip()).await.unwrap();
        assert_eq!(boost.balance_after, 2_000);
        assert_eq!(inv.balance(&trip()).await.unwrap(), 2_000);

        let err = inv.apply_boost(&trip()).await.unwrap_err();
        assert_eq!(
            err,
            ServiceError::InsufficientPoints {
                balance: 2_000,
                required: BOOST_COST
            }
        );
    }

    #[tokio::test]
    async fn lounges_match_code_or_city() {
        let inv = inventory();
        assert_eq!(LoungeService::search(&inv, "FCO").await.unwrap().len(), 2);
        assert_eq!(LoungeService::search(&inv, "rome").await.unwrap().len(), 2);
        assert!(LoungeService::search(&inv, "HND").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn destinations_filter_by_theme() {
        let inv = inventory();
        let beach = DestinationService::search(&inv, Some("beach")).await.unwrap();
        let names: Vec<_> = beach.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Barcelona", "Lisbon"]);
    }
}
