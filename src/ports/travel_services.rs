//! The set of Domain Services the chat core depends on.

use std::sync::Arc;

use super::{
    BookingService, CarService, DestinationService, FlightService, HotelService, LoungeService,
    PointsService, RestaurantService, TripService,
};

/// Explicitly constructed Domain Service dependencies, shared across requests.
#[derive(Clone)]
pub struct TravelServices {
    pub flights: Arc<dyn FlightService>,
    pub hotels: Arc<dyn HotelService>,
    pub restaurants: Arc<dyn RestaurantService>,
    pub cars: Arc<dyn CarService>,
    pub lounges: Arc<dyn LoungeService>,
    pub bookings: Arc<dyn BookingService>,
    pub trips: Arc<dyn TripService>,
    pub points: Arc<dyn PointsService>,
    pub destinations: Arc<dyn DestinationService>,
}

impl TravelServices {
    /// Wires every service to one backend implementing all of them.
    pub fn from_inventory<T>(inventory: Arc<T>) -> Self
    where
        T: FlightService
            + HotelService
            + RestaurantService
            + CarService
            + LoungeService
            + BookingService
            + TripService
            + PointsService
            + DestinationService
            + 'static,
    {
        Self {
            flights: inventory.clone(),
            hotels: inventory.clone(),
            restaurants: inventory.clone(),
            cars: inventory.clone(),
            lounges: inventory.clone(),
            bookings: inventory.clone(),
            trips: inventory.clone(),
            points: inventory.clone(),
            destinations: inventory,
        }
    }
}
