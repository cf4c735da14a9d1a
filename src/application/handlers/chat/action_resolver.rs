//! Action resolution.
//!
//! Turns a classified intent into Domain Service calls and folds the outcome
//! into an [`ActionResult`]. Service failures are recovered here as
//! `ActionResult::Error`; nothing escapes as an `Err` or a panic.

use futures::join;
use tracing::warn;

use crate::domain::chat::{
    ActionResult, BookableItem, ConversationContext, DomainEntity, ErrorKind, Intent, IntentKind,
    Utterance,
};
use crate::domain::foundation::TripId;
use crate::domain::travel::{BookingExtras, Trip};
use crate::ports::{CarQuery, FlightQuery, HotelQuery, RestaurantQuery, ServiceError, TravelServices};

/// Whether the intent still lacks a location the trip could supply.
///
/// A lounge search names its airport through either slot, so an explicit origin
/// counts as a location.
fn wants_trip_location(intent: &Intent) -> bool {
    if !intent.kind.needs_location() || intent.slots.destination.is_some() {
        return false;
    }
    !(intent.kind == IntentKind::SearchLounge && intent.slots.origin.is_some())
}

/// Fills a missing destination from the scoping trip.
///
/// Only intents that need a location are touched, and an explicit slot always wins.
pub fn apply_trip_defaults(mut intent: Intent, trip: Option<&Trip>) -> Intent {
    if wants_trip_location(&intent) {
        if let Some(trip) = trip.filter(|t| !t.destination.trim().is_empty()) {
            intent.slots.destination = Some(trip.destination.clone());
        }
    }
    intent
}

/// Folds a Domain Service failure into an error result.
fn recover(err: ServiceError, what: impl Into<String>) -> ActionResult {
    let what = what.into();
    warn!(error = %err, resource = %what, "Domain service call failed");
    let kind = match err {
        ServiceError::NotFound(_) => ErrorKind::not_found(what),
        ServiceError::Unavailable(_) | ServiceError::Transport(_) => {
            ErrorKind::service_unavailable(what)
        }
        ServiceError::InsufficientPoints { balance, required } => {
            ErrorKind::InsufficientPoints { balance, required }
        }
    };
    ActionResult::Error(kind)
}

fn entities<T>(items: Vec<T>, wrap: fn(T) -> DomainEntity) -> ActionResult {
    ActionResult::Entities(items.into_iter().map(wrap).collect())
}

/// Resolves intents against the Domain Services.
#[derive(Clone)]
pub struct ActionResolver {
    services: TravelServices,
}

impl ActionResolver {
    pub fn new(services: TravelServices) -> Self {
        Self { services }
    }

    /// Resolves an intent for a trip. Never fails; failures come back as `ActionResult::Error`.
    pub async fn resolve(
        &self,
        intent: &Intent,
        context: &ConversationContext,
        trip_id: &TripId,
    ) -> ActionResult {
        let intent = if wants_trip_location(intent) {
            let trip = self.lookup_trip(trip_id).await;
            apply_trip_defaults(intent.clone(), trip.as_ref())
        } else {
            intent.clone()
        };

        match intent.kind {
            IntentKind::SearchFlight => self.search_flights(&intent).await,
            IntentKind::SearchHotel => self.search_hotels(&intent).await,
            IntentKind::SearchRestaurant => self.search_restaurants(&intent).await,
            IntentKind::SearchCar => self.search_cars(&intent).await,
            IntentKind::SearchLounge => self.search_lounges(&intent).await,
            IntentKind::BookFlight
            | IntentKind::BookHotel
            | IntentKind::BookRestaurant
            | IntentKind::BookCar => self.book(&intent, context, trip_id).await,
            IntentKind::CancelBooking => self.cancel(&intent, context).await,
            IntentKind::CheckBalance => match self.services.points.balance(trip_id).await {
                Ok(balance) => ActionResult::Balance(balance),
                Err(e) => recover(e, "your points balance"),
            },
            IntentKind::ApplyPointsBoost => match self.services.points.apply_boost(trip_id).await {
                Ok(boost) => ActionResult::Boost(boost),
                Err(e) => recover(e, "the points boost"),
            },
            IntentKind::ListBookings => match self.services.bookings.list(trip_id).await {
                Ok(bookings) => entities(
                    bookings.into_iter().filter(|b| b.is_active()).collect(),
                    DomainEntity::Booking,
                ),
                Err(e) => recover(e, "your bookings"),
            },
            IntentKind::PlanTrip => self.plan_trip(&intent).await,
            IntentKind::ExploreDestinations => self.explore(&intent).await,
            IntentKind::General => ActionResult::None,
        }
    }

    /// The scoping trip, or `None` when it is unknown or the lookup fails.
    async fn lookup_trip(&self, trip_id: &TripId) -> Option<Trip> {
        match self.services.trips.get(trip_id).await {
            Ok(trip) => trip,
            Err(e) => {
                warn!(trip_id = %trip_id, error = %e, "Trip lookup failed, continuing without trip defaults");
                None
            }
        }
    }

    async fn search_flights(&self, intent: &Intent) -> ActionResult {
        let Some(destination) = intent.slots.destination.clone() else {
            return ErrorKind::missing_parameter("destination").into();
        };
        let query = FlightQuery {
            origin: intent.slots.origin.clone(),
            destination: Some(destination),
            date: intent.slots.date,
            passengers: intent.slots.guest_count,
        };
        match self.services.flights.search(&query).await {
            Ok(flights) => entities(flights, DomainEntity::Flight),
            Err(e) => recover(e, "flight search"),
        }
    }

    async fn search_hotels(&self, intent: &Intent) -> ActionResult {
        let Some(city) = intent.slots.destination.clone() else {
            return ErrorKind::missing_parameter("destination").into();
        };
        let query = HotelQuery {
            city: Some(city),
            check_in: intent.slots.date,
            guests: intent.slots.guest_count,
        };
        match self.services.hotels.search(&query).await {
            Ok(hotels) => entities(hotels, DomainEntity::Hotel),
            Err(e) => recover(e, "hotel search"),
        }
    }

    async fn search_restaurants(&self, intent: &Intent) -> ActionResult {
        let Some(city) = intent.slots.destination.clone() else {
            return ErrorKind::missing_parameter("destination").into();
        };
        let query = RestaurantQuery {
            city: Some(city),
            cuisine: intent.slots.cuisine.clone(),
            date: intent.slots.date,
            party_size: intent.slots.guest_count,
        };
        match self.services.restaurants.search(&query).await {
            Ok(restaurants) => entities(restaurants, DomainEntity::Restaurant),
            Err(e) => recover(e, "restaurant search"),
        }
    }

    async fn search_cars(&self, intent: &Intent) -> ActionResult {
        let Some(city) = intent.slots.destination.clone() else {
            return ErrorKind::missing_parameter("destination").into();
        };
        let query = CarQuery {
            city: Some(city),
            pickup_date: intent.slots.date,
        };
        match self.services.cars.search(&query).await {
            Ok(cars) => entities(cars, DomainEntity::Car),
            Err(e) => recover(e, "car rental search"),
        }
    }

    async fn search_lounges(&self, intent: &Intent) -> ActionResult {
        let airport = intent
            .slots
            .destination
            .as_ref()
            .or(intent.slots.origin.as_ref());
        let Some(airport) = airport else {
            return ErrorKind::missing_parameter("airport").into();
        };
        match self.services.lounges.search(airport).await {
            Ok(lounges) => entities(lounges, DomainEntity::Lounge),
            Err(e) => recover(e, "lounge search"),
        }
    }

    /// Books the candidate surfaced earlier in the conversation.
    ///
    /// The candidate is re-read first so a booking never references an entity
    /// that has since disappeared.
    async fn book(
        &self,
        intent: &Intent,
        context: &ConversationContext,
        trip_id: &TripId,
    ) -> ActionResult {
        let Some(kind) = intent.kind.booking_kind() else {
            return ActionResult::None;
        };
        let utterance = Utterance::new(&intent.slots.query);
        let Some(candidate) = context.select_candidate(kind, &utterance) else {
            return ErrorKind::NoCandidate { kind }.into();
        };

        let name = candidate.display_name();
        let mut extras = BookingExtras {
            date: intent.slots.date,
            guests: intent.slots.guest_count,
        };

        let booked = match &candidate {
            BookableItem::Flight(flight) => {
                extras.date = extras.date.or_else(|| Some(flight.departure.date_naive()));
                match self.services.flights.get(&flight.id).await {
                    Ok(Some(fresh)) => self.services.flights.book(trip_id, &fresh, &extras).await,
                    Ok(None) => Err(ServiceError::not_found(name.clone())),
                    Err(e) => Err(e),
                }
            }
            BookableItem::Hotel(hotel) => match self.services.hotels.get(&hotel.id).await {
                Ok(Some(fresh)) => self.services.hotels.book(trip_id, &fresh, &extras).await,
                Ok(None) => Err(ServiceError::not_found(name.clone())),
                Err(e) => Err(e),
            },
            BookableItem::Restaurant(restaurant) => {
                match self.services.restaurants.get(&restaurant.id).await {
                    Ok(Some(fresh)) => {
                        self.services.restaurants.book(trip_id, &fresh, &extras).await
                    }
                    Ok(None) => Err(ServiceError::not_found(name.clone())),
                    Err(e) => Err(e),
                }
            }
            BookableItem::Car(car) => match self.services.cars.get(&car.id).await {
                Ok(Some(fresh)) => self.services.cars.book(trip_id, &fresh, &extras).await,
                Ok(None) => Err(ServiceError::not_found(name.clone())),
                Err(e) => Err(e),
            },
        };

        match booked {
            Ok(booking) => ActionResult::Confirmation(booking),
            Err(e) => recover(e, name),
        }
    }

    async fn cancel(&self, intent: &Intent, context: &ConversationContext) -> ActionResult {
        let number = intent
            .slots
            .confirmation_number
            .clone()
            .or_else(|| context.latest_confirmation().map(|b| b.confirmation_number.clone()));
        let Some(number) = number else {
            return ErrorKind::missing_parameter("confirmation number").into();
        };

        match self.services.bookings.cancel(&number).await {
            Ok(true) => ActionResult::Cancelled(number),
            Ok(false) => ErrorKind::not_found(format!("an active booking {}", number)).into(),
            Err(e) => recover(e, format!("booking {}", number)),
        }
    }

    /// Flight, hotel and restaurant lookups for one destination, issued concurrently.
    ///
    /// Failed lookups are dropped; the turn fails only if every lookup failed.
    async fn plan_trip(&self, intent: &Intent) -> ActionResult {
        let Some(destination) = intent.slots.destination.clone() else {
            return ErrorKind::missing_parameter("destination").into();
        };

        let flight_query = FlightQuery {
            origin: intent.slots.origin.clone(),
            destination: Some(destination.clone()),
            date: intent.slots.date,
            passengers: intent.slots.guest_count,
        };
        let hotel_query = HotelQuery {
            city: Some(destination.clone()),
            check_in: intent.slots.date,
            guests: intent.slots.guest_count,
        };
        let restaurant_query = RestaurantQuery {
            city: Some(destination),
            cuisine: intent.slots.cuisine.clone(),
            date: intent.slots.date,
            party_size: intent.slots.guest_count,
        };

        let (flights, hotels, restaurants) = join!(
            self.services.flights.search(&flight_query),
            self.services.hotels.search(&hotel_query),
            self.services.restaurants.search(&restaurant_query),
        );

        let mut failures = Vec::new();
        let mut found = Vec::new();
        match flights {
            Ok(flights) => found.extend(flights.into_iter().next().map(DomainEntity::Flight)),
            Err(e) => failures.push(("flight search", e)),
        }
        match hotels {
            Ok(hotels) => found.extend(hotels.into_iter().next().map(DomainEntity::Hotel)),
            Err(e) => failures.push(("hotel search", e)),
        }
        match restaurants {
            Ok(restaurants) => {
                found.extend(restaurants.into_iter().next().map(DomainEntity::Restaurant))
            }
            Err(e) => failures.push(("restaurant search", e)),
        }

        if failures.len() == 3 {
            return ErrorKind::service_unavailable("trip planning").into();
        }
        for (what, err) in failures {
            warn!(resource = what, error = %err, "Trip plan lookup failed, composing partial plan");
        }
        ActionResult::Entities(found)
    }

    async fn explore(&self, intent: &Intent) -> ActionResult {
        let theme = intent.slots.theme.as_deref();
        let (destinations, themes) = join!(
            self.services.destinations.search(theme),
            self.services.destinations.themes(),
        );

        let destinations = match destinations {
            Ok(destinations) => destinations,
            Err(e) => return recover(e, "destination ideas"),
        };
        let mut found: Vec<DomainEntity> =
            destinations.into_iter().map(DomainEntity::Destination).collect();

        if theme.is_none() {
            match themes {
                Ok(themes) => found.extend(themes.into_iter().map(DomainEntity::Theme)),
                Err(e) => warn!(error = %e, "Theme lookup failed, showing destinations only"),
            }
        }
        ActionResult::Entities(found)
    }
}
