//! End-to-end conversation tests over the seeded in-memory inventory.
//!
//! Each test runs several chat turns through the send-message handler and
//! checks that later turns act on cards surfaced by earlier ones.

use std::sync::Arc;

use chrono::NaiveDate;

use travel_concierge::adapters::{InMemoryChatHistory, InMemoryInventory};
use travel_concierge::application::{
    ActionResolver, SendMessageCommand, SendMessageHandler, SendMessageResult,
};
use travel_concierge::domain::chat::{
    Gazetteer, IntentKind, ResponseComposer, RichContent, RuleBasedIntentClassifier,
};
use travel_concierge::domain::foundation::TripId;
use travel_concierge::domain::travel::{Booking, BookingKind, BookingStatus};
use travel_concierge::ports::{BookingService, DestinationService, TravelServices};

struct Concierge {
    handler: SendMessageHandler,
    inventory: Arc<InMemoryInventory>,
    trip: TripId,
}

impl Concierge {
    async fn for_trip(trip: &str) -> Self {
        let inventory = Arc::new(InMemoryInventory::seeded().unwrap());
        let destinations = DestinationService::list(inventory.as_ref()).await.unwrap();
        let themes = DestinationService::themes(inventory.as_ref()).await.unwrap();
        let classifier = RuleBasedIntentClassifier::new(Arc::new(Gazetteer::from_catalog(
            &destinations,
            &themes,
        )))
        .with_reference_date(NaiveDate::from_ymd_opt(2026, 10, 15).unwrap());

        let services = TravelServices::from_inventory(inventory.clone());
        let handler = SendMessageHandler::new(
            Arc::new(classifier),
            ActionResolver::new(services.clone()),
            ResponseComposer::default(),
            Arc::new(InMemoryChatHistory::new()),
            services.trips.clone(),
        );

        Self {
            handler,
            inventory,
            trip: TripId::new(trip).unwrap(),
        }
    }

    async fn say(&self, text: &str) -> SendMessageResult {
        self.handler
            .handle(SendMessageCommand::new(self.trip.clone(), text))
            .await
            .unwrap()
    }
}

fn confirmation(result: &SendMessageResult) -> Booking {
    match result.reply.rich_content().first() {
        Some(RichContent::BookingConfirmation(booking)) => booking.clone(),
        other => panic!("expected a booking confirmation, got {:?}", other),
    }
}

#[tokio::test]
async fn search_book_and_cancel_a_restaurant() {
    let concierge = Concierge::for_trip("trip-rome").await;

    let search = concierge.say("Find an italian restaurant for 4 people tomorrow").await;
    assert_eq!(search.intent.kind, IntentKind::SearchRestaurant);
    assert_eq!(search.intent.slots.guest_count, Some(4));
    assert_eq!(
        search.intent.slots.date,
        NaiveDate::from_ymd_opt(2026, 10, 16)
    );
    assert!(search
        .reply
        .rich_content()
        .iter()
        .all(|c| matches!(c, RichContent::RestaurantCard(r) if r.city == "Rome")));

    let booked = concierge.say("book the first one for 4 people tomorrow").await;
    assert_eq!(booked.intent.kind, IntentKind::BookRestaurant);
    let booking = confirmation(&booked);
    assert_eq!(booking.kind, BookingKind::Restaurant);
    assert_eq!(booking.guests, 4);
    assert!(booked.reply.text().contains(booking.confirmation_number.as_str()));

    let cancelled = concierge.say("actually, cancel that booking").await;
    assert_eq!(cancelled.intent.kind, IntentKind::CancelBooking);
    let stored = BookingService::get(concierge.inventory.as_ref(), &booking.confirmation_number)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, BookingStatus::Cancelled);
}

#[tokio::test]
async fn booking_by_name_picks_the_named_hotel() {
    let concierge = Concierge::for_trip("trip-rome").await;

    concierge.say("Show me hotels in Rome").await;
    let booked = concierge.say("Book Hotel Artemide").await;

    assert_eq!(confirmation(&booked).title, "Hotel Artemide");
}

#[tokio::test]
async fn booking_without_search_asks_to_search_first() {
    let concierge = Concierge::for_trip("trip-rome").await;

    let result = concierge.say("book a hotel").await;

    assert_eq!(result.intent.kind, IntentKind::BookHotel);
    assert!(result.reply.text().starts_with("Sorry"));
    assert!(result.reply.rich_content().is_empty());
    assert_eq!(concierge.inventory.booking_count().await, 1);
}

#[tokio::test]
async fn cancel_by_confirmation_number() {
    let concierge = Concierge::for_trip("trip-paris").await;

    let result = concierge.say("please cancel TC-100001").await;

    assert_eq!(result.intent.kind, IntentKind::CancelBooking);
    assert!(result.reply.text().contains("TC100001"));

    let again = concierge.say("cancel TC100001").await;
    assert!(again.reply.text().starts_with("Sorry"));
}

#[tokio::test]
async fn plan_trip_combines_verticals() {
    let concierge = Concierge::for_trip("trip-tokyo").await;

    let result = concierge.say("Plan a trip to Rome").await;

    assert_eq!(result.intent.kind, IntentKind::PlanTrip);
    let cards = result.reply.rich_content();
    assert!(cards.iter().any(|c| matches!(c, RichContent::FlightCard(_))));
    assert!(cards.iter().any(|c| matches!(c, RichContent::HotelCard(_))));
    assert!(cards.iter().any(|c| matches!(c, RichContent::RestaurantCard(_))));
}

#[tokio::test]
async fn explore_by_theme_lists_destinations() {
    let concierge = Concierge::for_trip("trip-rome").await;

    let result = concierge.say("Give me some beach trip ideas").await;

    assert_eq!(result.intent.kind, IntentKind::ExploreDestinations);
    let Some(RichContent::DestinationList(destinations)) = result.reply.rich_content().first()
    else {
        panic!("expected a destination list, got {:?}", result.reply);
    };
    assert!(destinations.iter().all(|d| d.has_theme("beach")));
}

#[tokio::test]
async fn plural_theme_is_understood() {
    let concierge = Concierge::for_trip("trip-rome").await;

    let result = concierge.say("Somewhere with great beaches").await;

    assert_eq!(result.intent.kind, IntentKind::ExploreDestinations);
    assert_eq!(result.intent.slots.theme.as_deref(), Some("beach"));
    let Some(RichContent::DestinationList(destinations)) = result.reply.rich_content().first()
    else {
        panic!("expected a destination list, got {:?}", result.reply);
    };
    assert!(destinations.iter().all(|d| d.has_theme("beach")));
}

#[tokio::test]
async fn points_balance_and_boost() {
    let concierge = Concierge::for_trip("trip-rome").await;

    let balance = concierge.say("How many points do I have?").await;
    assert_eq!(balance.intent.kind, IntentKind::CheckBalance);
    assert!(balance.reply.text().contains("42,300"));

    let boost = concierge.say("Apply a points boost").await;
    assert_eq!(boost.intent.kind, IntentKind::ApplyPointsBoost);
    assert!(boost.reply.rich_content().is_empty());
}

#[tokio::test]
async fn small_talk_is_general() {
    let concierge = Concierge::for_trip("trip-rome").await;

    let result = concierge.say("thanks so much!").await;

    assert_eq!(result.intent.kind, IntentKind::General);
    assert!(result.reply.rich_content().is_empty());
    assert!(!result.reply.text().is_empty());
}
