//! Response composition.
//!
//! Template selection is keyed by the intent and the result variant. Cards are
//! attached only for entities and confirmations; errors never carry cards.

use crate::domain::foundation::TripId;
use crate::domain::travel::{Booking, Destination, Theme};

use super::action::{ActionResult, DomainEntity, ErrorKind};
use super::intent::{Intent, IntentKind};
use super::message::ChatMessage;
use super::rich_content::RichContent;

const GENERAL_REPLY: &str = "I can search and book flights, hotels, restaurants and rental cars, \
find airport lounges, suggest destinations, check your points or manage your bookings. \
What would you like to do?";

/// Turns an [`ActionResult`] into the agent's reply.
#[derive(Debug, Clone)]
pub struct ResponseComposer {
    max_cards: usize,
    max_list_items: usize,
}

impl Default for ResponseComposer {
    fn default() -> Self {
        Self::new(3, 6)
    }
}

impl ResponseComposer {
    pub fn new(max_cards: usize, max_list_items: usize) -> Self {
        Self {
            max_cards: max_cards.max(1),
            max_list_items: max_list_items.max(1),
        }
    }

    pub fn compose(&self, trip_id: &TripId, intent: &Intent, result: &ActionResult) -> ChatMessage {
        let (text, cards) = match result {
            ActionResult::Entities(entities) => (
                self.describe_entities(intent, entities),
                self.cards_for(entities),
            ),
            ActionResult::Confirmation(booking) => (
                confirmation_text(booking),
                vec![RichContent::BookingConfirmation(booking.clone())],
            ),
            ActionResult::Cancelled(number) => (
                format!("Booking {} has been cancelled.", number),
                Vec::new(),
            ),
            ActionResult::Balance(points) => (
                format!("You have {} points available.", group_digits(*points)),
                Vec::new(),
            ),
            ActionResult::Boost(boost) => (
                format!(
                    "Done! I applied a {}x points boost for {} points. Your new balance is {} points.",
                    boost.multiplier,
                    group_digits(boost.points_spent),
                    group_digits(boost.balance_after)
                ),
                Vec::new(),
            ),
            ActionResult::Error(kind) => (apology(kind), Vec::new()),
            ActionResult::None => (GENERAL_REPLY.to_string(), Vec::new()),
        };

        ChatMessage::agent(trip_id.clone(), text, cards)
    }

    fn describe_entities(&self, intent: &Intent, entities: &[DomainEntity]) -> String {
        match intent.kind {
            IntentKind::PlanTrip => return plan_text(intent, entities),
            IntentKind::ExploreDestinations => {
                return explore_text(intent, entities, self.max_list_items)
            }
            IntentKind::ListBookings => return bookings_text(entities),
            _ => {}
        }

        let first = match entities.first() {
            Some(first) => first,
            None => return no_results_text(intent),
        };
        let n = entities.len();

        let mut text = match first {
            DomainEntity::Flight(f) => format!(
                "I found {} {} from {} to {}. The best fare is {} at {}.",
                n,
                plural(n, "flight", "flights"),
                f.origin,
                f.destination,
                f.display_name(),
                f.price
            ),
            DomainEntity::Hotel(h) => format!(
                "I found {} {} in {}. {} is a {}-star stay at {} a night.",
                n,
                plural(n, "hotel", "hotels"),
                h.city,
                h.name,
                h.stars,
                h.nightly_rate
            ),
            DomainEntity::Restaurant(r) => format!(
                "I found {} {} in {}. {} serves {} food for about {} per person.",
                n,
                plural(n, "restaurant", "restaurants"),
                r.city,
                r.name,
                r.cuisine,
                r.average_cost
            ),
            DomainEntity::Car(c) => format!(
                "I found {} rental {} in {}, starting with the {} at {} a day.",
                n,
                plural(n, "car", "cars"),
                c.city,
                c.display_name(),
                c.daily_rate
            ),
            DomainEntity::Lounge(l) => format!(
                "I found {} {} at {}. {} in {} offers a day pass for {}.",
                n,
                plural(n, "lounge", "lounges"),
                l.airport_code,
                l.name,
                l.terminal,
                l.day_pass
            ),
            _ => "Here's what I found.".to_string(),
        };

        if n > self.max_cards {
            text.push_str(&format!(" Here are the top {}.", self.max_cards));
        }
        text
    }

    /// One card per entity up to `max_cards`; destinations and themes are grouped
    /// into a single list card each.
    fn cards_for(&self, entities: &[DomainEntity]) -> Vec<RichContent> {
        let mut cards = Vec::new();
        let mut destinations: Vec<Destination> = Vec::new();
        let mut themes: Vec<Theme> = Vec::new();

        for entity in entities {
            let card = match entity {
                DomainEntity::Flight(f) => RichContent::FlightCard(f.clone()),
                DomainEntity::Hotel(h) => RichContent::HotelCard(h.clone()),
                DomainEntity::Restaurant(r) => RichContent::RestaurantCard(r.clone()),
                DomainEntity::Car(c) => RichContent::CarCard(c.clone()),
                DomainEntity::Lounge(l) => RichContent::LoungeCard(l.clone()),
                DomainEntity::Booking(b) => RichContent::BookingConfirmation(b.clone()),
                DomainEntity::Destination(d) => {
                    if destinations.len() < self.max_list_items {
                        destinations.push(d.clone());
                    }
                    continue;
                }
                DomainEntity::Theme(t) => {
                    if themes.len() < self.max_list_items {
                        themes.push(t.clone());
                    }
                    continue;
                }
            };
            if cards.len() < self.max_cards {
                cards.push(card);
            }
        }

        if !destinations.is_empty() {
            cards.push(RichContent::DestinationList(destinations));
        }
        if !themes.is_empty() {
            cards.push(RichContent::ThemeList(themes));
        }
        cards
    }
}

fn confirmation_text(booking: &Booking) -> String {
    let when = booking
        .date
        .map(|d| format!(" on {}", d.format("%b %-d, %Y")))
        .unwrap_or_default();
    format!(
        "You're booked! {}{} for {} {}, total {}. Your confirmation number is {}.",
        booking.title,
        when,
        booking.guests,
        plural(booking.guests as usize, "guest", "guests"),
        booking.total,
        booking.confirmation_number
    )
}

fn apology(kind: &ErrorKind) -> String {
    match kind {
        ErrorKind::MissingParameter { name } => format!(
            "Sorry, I need the {} for that. Which {} did you have in mind?",
            name, name
        ),
        ErrorKind::NoCandidate { kind } => format!(
            "Sorry, I don't have a {} to book yet. Ask me to search for one first and I'll book it for you.",
            kind
        ),
        ErrorKind::NotFound { what } => format!("Sorry, I couldn't find {}.", what),
        ErrorKind::ServiceUnavailable { what } => format!(
            "Sorry, {} is unavailable right now. Please try again in a moment.",
            what
        ),
        ErrorKind::Ambiguous { what } => format!(
            "Sorry, I'm not sure which {} you mean. Could you be more specific?",
            what
        ),
        ErrorKind::InsufficientPoints { balance, required } => format!(
            "Sorry, a points boost needs {} points and you have {}.",
            group_digits(*required),
            group_digits(*balance)
        ),
    }
}

fn no_results_text(intent: &Intent) -> String {
    let what = match intent.kind {
        IntentKind::SearchFlight => "flights",
        IntentKind::SearchHotel => "hotels",
        IntentKind::SearchRestaurant => "restaurants",
        IntentKind::SearchCar => "rental cars",
        IntentKind::SearchLounge => "lounges",
        _ => "matches",
    };
    let place = intent
        .slots
        .destination
        .as_ref()
        .map(|d| format!(" in {}", d))
        .unwrap_or_default();
    format!(
        "I couldn't find any {}{}. Try different dates or another destination.",
        what, place
    )
}

fn plan_text(intent: &Intent, entities: &[DomainEntity]) -> String {
    if entities.is_empty() {
        return no_results_text(intent);
    }

    let mut parts = Vec::new();
    let mut place = intent.slots.destination.clone();
    for entity in entities {
        match entity {
            DomainEntity::Flight(f) => {
                place.get_or_insert_with(|| f.destination.clone());
                parts.push(format!("fly {} for {}", f.display_name(), f.price));
            }
            DomainEntity::Hotel(h) => {
                place.get_or_insert_with(|| h.city.clone());
                parts.push(format!("stay at {} for {} a night", h.name, h.nightly_rate));
            }
            DomainEntity::Restaurant(r) => {
                parts.push(format!("dine at {}", r.name));
            }
            _ => {}
        }
    }

    let mut text = format!(
        "Here's a starting plan for {}: {}.",
        place.unwrap_or_else(|| "your trip".to_string()),
        parts.join(", then ")
    );
    if parts.len() < 3 {
        text.push_str(" I couldn't pull together every piece right now, so some options are missing.");
    }
    text
}

/// Names only the destinations that fit on the list card.
fn explore_text(intent: &Intent, entities: &[DomainEntity], max_items: usize) -> String {
    let names: Vec<&str> = entities
        .iter()
        .filter_map(|e| match e {
            DomainEntity::Destination(d) => Some(d.name.as_str()),
            _ => None,
        })
        .take(max_items)
        .collect();

    if names.is_empty() {
        return "I couldn't find destinations matching that. Try another theme.".to_string();
    }

    let theme = intent
        .slots
        .theme
        .as_ref()
        .map(|t| format!(" for {}", t))
        .unwrap_or_default();
    format!(
        "Here are some destinations to consider{}: {}.",
        theme,
        names.join(", ")
    )
}

fn bookings_text(entities: &[DomainEntity]) -> String {
    let n = entities
        .iter()
        .filter(|e| matches!(e, DomainEntity::Booking(_)))
        .count();
    match n {
        0 => "You don't have any bookings on this trip yet.".to_string(),
        _ => format!("You have {} {} on this trip.", n, plural(n, "booking", "bookings")),
    }
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}

/// Formats an integer with thousands separators: `12500` -> `12,500`.
fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
