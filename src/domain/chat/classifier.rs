//! Intent classification.
//!
//! Keyword and phrase sets are scanned in a fixed priority order and the first
//! match wins, so classification is deterministic and never ambiguous.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::domain::travel::BookingKind;

use super::context::ConversationContext;
use super::extraction::{
    cuisine_words, extract_confirmation_number, extract_cuisine, extract_date,
    extract_guest_count, extract_places,
};
use super::gazetteer::Gazetteer;
use super::intent::{Intent, IntentKind, IntentSlots};
use super::utterance::Utterance;

/// Maps a raw utterance plus recent conversation to an intent.
pub trait IntentClassifier: Send + Sync {
    fn classify(&self, utterance: &str, context: &ConversationContext) -> Intent;
}

const CANCEL_PREFIX: &str = "cancel";

const BOOST_PHRASES: &[&str] = &[
    "boost",
    "points boost",
    "apply points",
    "apply my points",
    "use my points",
    "use points",
    "redeem",
];

const BALANCE_PHRASES: &[&str] = &[
    "balance",
    "how many points",
    "my points",
    "points do i have",
    "points total",
];

const LIST_BOOKINGS_PHRASES: &[&str] = &[
    "my bookings",
    "my reservations",
    "list bookings",
    "show bookings",
    "upcoming bookings",
    "what have i booked",
    "bookings",
    "reservations",
];

const BOOKING_VERBS: &[&str] = &["book", "reserve", "reservation", "i ll take", "go with"];

const PLAN_PHRASES: &[&str] = &["plan", "planning", "itinerary"];

const EXPLORE_PHRASES: &[&str] = &[
    "destinations",
    "destination ideas",
    "trip ideas",
    "travel ideas",
    "where should i go",
    "where to go",
    "inspire",
    "inspiration",
    "themes",
    "suggest a destination",
    "recommend a destination",
];

const LOUNGE_NOUNS: &[&str] = &["lounge", "lounges"];

const FLIGHT_NOUNS: &[&str] = &[
    "flight",
    "flights",
    "fly",
    "flying",
    "plane",
    "airfare",
    "airline",
    "airlines",
];

const FLIGHT_BRANDS: &[&str] = &[
    "alitalia",
    "lufthansa",
    "delta",
    "air france",
    "british airways",
    "iberia",
];

const HOTEL_NOUNS: &[&str] = &[
    "hotel",
    "hotels",
    "stay",
    "room",
    "rooms",
    "accommodation",
    "accommodations",
    "resort",
    "inn",
    "suite",
    "suites",
    "hostel",
    "bnb",
];

const HOTEL_BRANDS: &[&str] = &[
    "hyatt",
    "hilton",
    "marriott",
    "ritz",
    "four seasons",
    "sheraton",
];

const RESTAURANT_NOUNS: &[&str] = &[
    "restaurant",
    "restaurants",
    "dinner",
    "lunch",
    "breakfast",
    "brunch",
    "eat",
    "table",
    "food",
];

const CAR_NOUNS: &[&str] = &[
    "car",
    "cars",
    "rental",
    "vehicle",
    "suv",
    "convertible",
];

const CAR_BRANDS: &[&str] = &[
    "hertz",
    "avis",
    "sixt",
    "enterprise",
    "europcar",
];

/// Keyword classifier backed by the destination gazetteer.
pub struct RuleBasedIntentClassifier {
    gazetteer: Arc<Gazetteer>,
    reference_date: Option<NaiveDate>,
}

impl RuleBasedIntentClassifier {
    pub fn new(gazetteer: Arc<Gazetteer>) -> Self {
        Self {
            gazetteer,
            reference_date: None,
        }
    }

    /// Pins "today" for relative date phrases.
    pub fn with_reference_date(mut self, today: NaiveDate) -> Self {
        self.reference_date = Some(today);
        self
    }

    fn today(&self) -> NaiveDate {
        self.reference_date.unwrap_or_else(|| Utc::now().date_naive())
    }

    fn classify_kind(&self, utterance: &Utterance, context: &ConversationContext) -> IntentKind {
        if utterance.has_word_prefix(CANCEL_PREFIX) {
            return IntentKind::CancelBooking;
        }
        if utterance.has_any(BOOST_PHRASES) {
            return IntentKind::ApplyPointsBoost;
        }
        if utterance.has_any(BALANCE_PHRASES) {
            return IntentKind::CheckBalance;
        }
        if utterance.has_any(LIST_BOOKINGS_PHRASES) {
            return IntentKind::ListBookings;
        }

        let domain = earliest_domain(utterance);

        if utterance.has_any(BOOKING_VERBS) {
            let kind = domain
                .or_else(|| context.named_kind(utterance))
                .or_else(|| context.most_recent_bookable_kind());
            return match kind {
                Some(kind) => IntentKind::book(kind),
                None => IntentKind::General,
            };
        }

        if utterance.has_any(PLAN_PHRASES) {
            return IntentKind::PlanTrip;
        }
        let themed = domain.is_none() && self.gazetteer.find_theme(utterance).is_some();
        if utterance.has_any(EXPLORE_PHRASES) || themed {
            return IntentKind::ExploreDestinations;
        }
        if utterance.has_any(LOUNGE_NOUNS) {
            return IntentKind::SearchLounge;
        }

        match domain {
            Some(kind) => IntentKind::search(kind),
            None => IntentKind::General,
        }
    }

    fn extract_slots(&self, utterance: &Utterance) -> IntentSlots {
        let (origin, destination) = extract_places(utterance, &self.gazetteer);
        IntentSlots {
            origin,
            destination,
            date: extract_date(utterance, self.today()),
            guest_count: extract_guest_count(utterance),
            cuisine: extract_cuisine(utterance),
            theme: self.gazetteer.find_theme(utterance),
            confirmation_number: extract_confirmation_number(utterance),
            query: utterance.raw().to_string(),
        }
    }
}

impl IntentClassifier for RuleBasedIntentClassifier {
    fn classify(&self, utterance: &str, context: &ConversationContext) -> Intent {
        let utterance = Utterance::new(utterance);
        let kind = self.classify_kind(&utterance, context);
        if kind == IntentKind::General {
            return Intent::general(utterance.raw());
        }
        Intent::new(kind, self.extract_slots(&utterance))
    }
}

/// Brand names that identify a vertical. Restaurants have none.
pub(crate) fn brand_words(kind: BookingKind) -> &'static [&'static str] {
    match kind {
        BookingKind::Flight => FLIGHT_BRANDS,
        BookingKind::Hotel => HOTEL_BRANDS,
        BookingKind::Car => CAR_BRANDS,
        BookingKind::Restaurant => &[],
    }
}

fn earliest_noun_or_brand(utterance: &Utterance, nouns: &[&str], kind: BookingKind) -> Option<usize> {
    utterance
        .earliest_of(nouns)
        .into_iter()
        .chain(utterance.earliest_of(brand_words(kind)))
        .min()
}

/// The vertical whose noun appears first in the utterance.
fn earliest_domain(utterance: &Utterance) -> Option<BookingKind> {
    let restaurant = cuisine_words()
        .filter_map(|w| utterance.position_of(w))
        .chain(utterance.earliest_of(RESTAURANT_NOUNS))
        .min();

    [
        (
            BookingKind::Flight,
            earliest_noun_or_brand(utterance, FLIGHT_NOUNS, BookingKind::Flight),
        ),
        (
            BookingKind::Hotel,
            earliest_noun_or_brand(utterance, HOTEL_NOUNS, BookingKind::Hotel),
        ),
        (BookingKind::Restaurant, restaurant),
        (
            BookingKind::Car,
            earliest_noun_or_brand(utterance, CAR_NOUNS, BookingKind::Car),
        ),
    ]
    .into_iter()
    .filter_map(|(kind, pos)| pos.map(|p| (p, kind)))
    .min_by_key(|(p, _)| *p)
    .map(|(_, kind)| kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chat::gazetteer::tests::sample_gazetteer;
    use crate::domain::chat::message::ChatMessage;
    use crate::domain::chat::rich_content::RichContent;
    use crate::domain::foundation::{CarId, Money, TripId};
    use crate::domain::travel::Car;
    use proptest::prelude::*;

    fn classifier() -> RuleBasedIntentClassifier {
        RuleBasedIntentClassifier::new(Arc::new(sample_gazetteer()))
            .with_reference_date(NaiveDate::from_ymd_opt(2026, 10, 15).unwrap())
    }

    fn kind_of(text: &str) -> IntentKind {
        classifier().classify(text, &ConversationContext::empty()).kind
    }

    fn car_context() -> ConversationContext {
        let trip = TripId::new("trip-rome").unwrap();
        let car = Car {
            id: CarId::new("cr-1").unwrap(),
            company: "Hertz".to_string(),
            model: "Fiat 500".to_string(),
            category: "compact".to_string(),
            city: "Rome".to_string(),
            daily_rate: Money::from_dollars(45),
            available: true,
        };
        ConversationContext::from_chronological(vec![ChatMessage::agent(
            trip,
            "Cars in Rome",
            vec![RichContent::CarCard(car)],
        )])
    }

    #[test]
    fn search_intents_follow_domain_noun() {
        assert_eq!(kind_of("search hotels in Paris"), IntentKind::SearchHotel);
        assert_eq!(kind_of("flights from London to Tokyo"), IntentKind::SearchFlight);
        assert_eq!(kind_of("somewhere for sushi tonight"), IntentKind::SearchRestaurant);
        assert_eq!(kind_of("rent a car in Rome"), IntentKind::SearchCar);
        assert_eq!(kind_of("any lounges at JFK?"), IntentKind::SearchLounge);
    }

    #[test]
    fn earliest_domain_noun_wins() {
        assert_eq!(kind_of("hotel near a good restaurant"), IntentKind::SearchHotel);
        assert_eq!(kind_of("dinner close to my hotel"), IntentKind::SearchRestaurant);
    }

    #[test]
    fn booking_verb_beats_search() {
        assert_eq!(kind_of("book a hotel in Rome"), IntentKind::BookHotel);
        assert_eq!(kind_of("reserve a table for 4"), IntentKind::BookRestaurant);
        assert_eq!(kind_of("book the Grand Hyatt"), IntentKind::BookHotel);
    }

    #[test]
    fn bare_booking_verb_uses_context() {
        let c = classifier();
        let intent = c.classify("book the Fiat 500", &car_context());
        assert_eq!(intent.kind, IntentKind::BookCar);
        let intent = c.classify("I'll take it", &car_context());
        assert_eq!(intent.kind, IntentKind::BookCar);
        let intent = c.classify("book it", &ConversationContext::empty());
        assert_eq!(intent.kind, IntentKind::General);
    }

    #[test]
    fn cancel_beats_everything() {
        assert_eq!(kind_of("cancel my hotel booking"), IntentKind::CancelBooking);
        assert_eq!(kind_of("Please cancel TC-123456 and book a flight"), IntentKind::CancelBooking);
    }

    #[test]
    fn points_intents() {
        assert_eq!(kind_of("What's my points balance?"), IntentKind::CheckBalance);
        assert_eq!(kind_of("how many points do I have"), IntentKind::CheckBalance);
        assert_eq!(kind_of("use my points for a boost"), IntentKind::ApplyPointsBoost);
    }

    #[test]
    fn list_plan_and_explore() {
        assert_eq!(kind_of("show my bookings"), IntentKind::ListBookings);
        assert_eq!(kind_of("plan a weekend in Paris"), IntentKind::PlanTrip);
        assert_eq!(kind_of("where should I go in spring?"), IntentKind::ExploreDestinations);
        assert_eq!(kind_of("somewhere with great beaches"), IntentKind::ExploreDestinations);
    }

    #[test]
    fn unmatched_text_is_general_with_query_preserved() {
        let intent = classifier().classify("  Tell me a joke ", &ConversationContext::empty());
        assert_eq!(intent.kind, IntentKind::General);
        assert_eq!(intent.slots.query, "Tell me a joke");
        assert_eq!(intent.slots.destination, None);
    }

    #[test]
    fn slots_are_extracted() {
        let intent = classifier().classify(
            "flights from London to Tokyo tomorrow for 2 travelers",
            &ConversationContext::empty(),
        );
        assert_eq!(intent.slots.origin.as_deref(), Some("London"));
        assert_eq!(intent.slots.destination.as_deref(), Some("Tokyo"));
        assert_eq!(intent.slots.date, NaiveDate::from_ymd_opt(2026, 10, 16));
        assert_eq!(intent.slots.guest_count, Some(2));
    }

    #[test]
    fn cancel_extracts_confirmation_number() {
        let intent = classifier().classify("cancel tc-654321", &ConversationContext::empty());
        assert_eq!(
            intent.slots.confirmation_number.map(|n| n.to_string()),
            Some("TC654321".to_string())
        );
    }

    const VOCAB: &[&str] = &[
        "search", "book", "reserve", "hotel", "flight", "dinner", "car", "lounge", "rome",
        "paris", "tomorrow", "points", "balance", "boost", "plan", "destinations", "my",
        "bookings", "please", "for", "2", "guests", "the",
    ];

    proptest! {
        #[test]
        fn cancel_with_reference_is_always_cancel(
            before in prop::collection::vec(prop::sample::select(VOCAB), 0..6),
            after in prop::collection::vec(prop::sample::select(VOCAB), 0..6),
            digits in 0u32..1_000_000,
        ) {
            let text = format!(
                "{} cancel TC{:06} {}",
                before.join(" "),
                digits,
                after.join(" ")
            );
            let intent = classifier().classify(&text, &ConversationContext::empty());
            prop_assert_eq!(intent.kind, IntentKind::CancelBooking);
            prop_assert!(intent.slots.confirmation_number.is_some());
        }
    }
}
