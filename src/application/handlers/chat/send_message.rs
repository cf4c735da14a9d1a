//! SendMessage command handler.
//!
//! Runs one chat turn: classify the utterance against the trip's recent history,
//! resolve the intent against the Domain Services, compose the agent reply and
//! record the turn.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::domain::chat::{
    ChatMessage, ConversationContext, Intent, IntentClassifier, ResponseComposer,
};
use crate::domain::foundation::{DomainError, TripId};
use crate::domain::travel::Trip;
use crate::ports::{ChatHistoryError, ChatHistoryStore, TripService};

use super::action_resolver::{apply_trip_defaults, ActionResolver};

/// Command to send a traveler message in a trip's chat.
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    /// The trip scoping the conversation.
    pub trip_id: TripId,
    /// The traveler's message.
    pub text: String,
}

impl SendMessageCommand {
    pub fn new(trip_id: TripId, text: impl Into<String>) -> Self {
        Self {
            trip_id,
            text: text.into(),
        }
    }
}

/// Errors that can occur when sending a message.
#[derive(Debug, Clone, Error)]
pub enum SendMessageError {
    /// Message text is empty or whitespace only.
    #[error("Validation error: message text cannot be empty")]
    EmptyText,

    #[error("Trip not found: {0}")]
    TripNotFound(TripId),

    /// Chat history could not be read or written.
    #[error("Chat history error: {0}")]
    History(String),

    #[error("Domain error: {0}")]
    Domain(String),
}

impl From<DomainError> for SendMessageError {
    fn from(err: DomainError) -> Self {
        SendMessageError::Domain(err.to_string())
    }
}

impl From<ChatHistoryError> for SendMessageError {
    fn from(err: ChatHistoryError) -> Self {
        SendMessageError::History(err.to_string())
    }
}

/// Result of a chat turn.
#[derive(Debug, Clone)]
pub struct SendMessageResult {
    /// The agent reply, already recorded in history.
    pub reply: ChatMessage,
    /// How the message was understood, after trip defaults were applied.
    pub intent: Intent,
}

/// Tuning for the chat turn.
#[derive(Debug, Clone, Copy)]
pub struct SendMessageConfig {
    /// Number of prior messages the classifier and resolver may look back over.
    pub history_lookback: usize,
    /// Whether the traveler's message is recorded alongside the reply.
    pub record_user_messages: bool,
}

impl Default for SendMessageConfig {
    fn default() -> Self {
        Self {
            history_lookback: 10,
            record_user_messages: true,
        }
    }
}

/// Handler for chat turns.
pub struct SendMessageHandler {
    classifier: Arc<dyn IntentClassifier>,
    resolver: ActionResolver,
    composer: ResponseComposer,
    history: Arc<dyn ChatHistoryStore>,
    trips: Arc<dyn TripService>,
    config: SendMessageConfig,
}

impl SendMessageHandler {
    pub fn new(
        classifier: Arc<dyn IntentClassifier>,
        resolver: ActionResolver,
        composer: ResponseComposer,
        history: Arc<dyn ChatHistoryStore>,
        trips: Arc<dyn TripService>,
    ) -> Self {
        Self {
            classifier,
            resolver,
            composer,
            history,
            trips,
            config: SendMessageConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SendMessageConfig) -> Self {
        self.config = config;
        self
    }

    /// Handles a chat turn.
    ///
    /// # Errors
    ///
    /// - `EmptyText` if the message is blank
    /// - `TripNotFound` if the trip does not exist; nothing is recorded
    /// - `History` if the turn could not be read from or written to history
    pub async fn handle(&self, cmd: SendMessageCommand) -> Result<SendMessageResult, SendMessageError> {
        if cmd.text.trim().is_empty() {
            return Err(SendMessageError::EmptyText);
        }

        let trip = self.load_trip(&cmd.trip_id).await?;
        let user_message = ChatMessage::user(cmd.trip_id.clone(), cmd.text.clone())?;

        let recent = self
            .history
            .history(&cmd.trip_id, Some(self.config.history_lookback))
            .await
            .map_err(|e| {
                error!(trip_id = %cmd.trip_id, error = %e, "Failed to read chat history");
                SendMessageError::from(e)
            })?;
        let context = ConversationContext::from_chronological(recent);

        let intent = self.classifier.classify(&cmd.text, &context);
        debug!(
            trip_id = %cmd.trip_id,
            intent = ?intent.kind,
            slots = ?intent.slots,
            context_len = context.len(),
            "Classified message"
        );
        let intent = apply_trip_defaults(intent, trip.as_ref());

        let result = self.resolver.resolve(&intent, &context, &cmd.trip_id).await;
        let reply = self.composer.compose(&cmd.trip_id, &intent, &result);

        let mut turn = Vec::with_capacity(2);
        if self.config.record_user_messages {
            turn.push(user_message);
        }
        turn.push(reply.clone());
        self.history
            .append_turn(&cmd.trip_id, turn)
            .await
            .map_err(|e| {
                error!(trip_id = %cmd.trip_id, error = %e, "Failed to record chat turn");
                SendMessageError::from(e)
            })?;

        info!(
            trip_id = %cmd.trip_id,
            intent = ?intent.kind,
            result = result.label(),
            cards = reply.rich_content().len(),
            "Chat turn completed"
        );

        Ok(SendMessageResult { reply, intent })
    }

    /// The scoping trip. A failing trip service is tolerated; an unknown trip is not.
    async fn load_trip(&self, trip_id: &TripId) -> Result<Option<Trip>, SendMessageError> {
        match self.trips.get(trip_id).await {
            Ok(Some(trip)) => Ok(Some(trip)),
            Ok(None) => Err(SendMessageError::TripNotFound(trip_id.clone())),
            Err(e) => {
                warn!(trip_id = %trip_id, error = %e, "Trip lookup failed, continuing without trip defaults");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use proptest::prelude::*;
    use std::sync::Mutex;

    use crate::adapters::inventory::InMemoryInventory;
    use crate::adapters::storage::InMemoryChatHistory;
    use crate::domain::chat::{
        Gazetteer, IntentKind, RichContent, RuleBasedIntentClassifier, Sender,
    };
    use crate::ports::{ServiceError, TravelServices};

    fn rome_trip() -> TripId {
        TripId::new("trip-rome").unwrap()
    }

    async fn gazetteer(inventory: &InMemoryInventory) -> Gazetteer {
        use crate::ports::DestinationService;
        let destinations = DestinationService::list(inventory).await.unwrap();
        let themes = DestinationService::themes(inventory).await.unwrap();
        Gazetteer::from_catalog(&destinations, &themes)
    }

    struct Fixture {
        handler: SendMessageHandler,
        history: Arc<InMemoryChatHistory>,
        inventory: Arc<InMemoryInventory>,
    }

    async fn fixture(config: SendMessageConfig) -> Fixture {
        let inventory = Arc::new(InMemoryInventory::seeded().unwrap());
        let services = TravelServices::from_inventory(inventory.clone());
        let history = Arc::new(InMemoryChatHistory::new());
        let classifier = RuleBasedIntentClassifier::new(Arc::new(gazetteer(&inventory).await))
            .with_reference_date(chrono::NaiveDate::from_ymd_opt(2026, 10, 15).unwrap());

        let handler = SendMessageHandler::new(
            Arc::new(classifier),
            ActionResolver::new(services.clone()),
            ResponseComposer::default(),
            history.clone(),
            services.trips.clone(),
        )
        .with_config(config);

        Fixture {
            handler,
            history,
            inventory,
        }
    }

    async fn send(fixture: &Fixture, text: &str) -> Result<SendMessageResult, SendMessageError> {
        fixture
            .handler
            .handle(SendMessageCommand::new(rome_trip(), text))
            .await
    }

    /// Trip service that always fails.
    struct BrokenTrips {
        calls: Mutex<u32>,
    }

    #[async_trait]
    impl TripService for BrokenTrips {
        async fn get(&self, _id: &TripId) -> Result<Option<Trip>, ServiceError> {
            *self.calls.lock().unwrap() += 1;
            Err(ServiceError::transport("timeout"))
        }
    }

    #[tokio::test]
    async fn records_user_message_and_reply() {
        let f = fixture(SendMessageConfig::default()).await;

        let result = send(&f, "Find me a hotel").await.unwrap();

        assert_eq!(result.intent.kind, IntentKind::SearchHotel);
        assert_eq!(result.intent.slots.destination.as_deref(), Some("Rome"));
        assert_eq!(result.reply.sender(), Sender::Agent);
        assert!(result
            .reply
            .rich_content()
            .iter()
            .all(|c| matches!(c, RichContent::HotelCard(h) if h.city == "Rome")));

        let history = f.history.history(&rome_trip(), None).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].sender(), Sender::User);
        assert_eq!(history[0].text(), "Find me a hotel");
        assert_eq!(history[1], result.reply);
    }

    #[tokio::test]
    async fn records_only_reply_when_configured() {
        let f = fixture(SendMessageConfig {
            record_user_messages: false,
            ..Default::default()
        })
        .await;

        send(&f, "what's my points balance").await.unwrap();

        let history = f.history.history(&rome_trip(), None).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].sender(), Sender::Agent);
    }

    #[tokio::test]
    async fn rejects_blank_text_without_recording() {
        let f = fixture(SendMessageConfig::default()).await;

        let result = send(&f, "   \n").await;

        assert!(matches!(result, Err(SendMessageError::EmptyText)));
        assert!(f.history.history(&rome_trip(), None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejects_unknown_trip_without_recording() {
        let f = fixture(SendMessageConfig::default()).await;
        let unknown = TripId::new("trip-atlantis").unwrap();

        let result = f
            .handler
            .handle(SendMessageCommand::new(unknown.clone(), "find me a hotel"))
            .await;

        assert!(matches!(result, Err(SendMessageError::TripNotFound(ref id)) if id == &unknown));
        assert_eq!(f.history.trip_count().await, 0);
    }

    #[tokio::test]
    async fn broken_trip_service_still_answers() {
        let inventory = Arc::new(InMemoryInventory::seeded().unwrap());
        let mut services = TravelServices::from_inventory(inventory.clone());
        let trips = Arc::new(BrokenTrips {
            calls: Mutex::new(0),
        });
        services.trips = trips.clone() as Arc<dyn TripService>;
        let history = Arc::new(InMemoryChatHistory::new());
        let handler = SendMessageHandler::new(
            Arc::new(RuleBasedIntentClassifier::new(Arc::new(gazetteer(&inventory).await))),
            ActionResolver::new(services.clone()),
            ResponseComposer::default(),
            history.clone(),
            trips.clone(),
        );

        let result = handler
            .handle(SendMessageCommand::new(rome_trip(), "find me a hotel"))
            .await
            .unwrap();

        assert!(result.reply.text().contains("destination"));
        assert!(result.reply.rich_content().is_empty());
        assert_eq!(history.history(&rome_trip(), None).await.unwrap().len(), 2);
        assert!(*trips.calls.lock().unwrap() >= 1);
    }

    #[tokio::test]
    async fn search_then_book_uses_cards_from_history() {
        let f = fixture(SendMessageConfig::default()).await;

        send(&f, "Find me a hotel in Rome").await.unwrap();
        let booked = send(&f, "Book the Hotel de Russie").await.unwrap();

        assert_eq!(booked.intent.kind, IntentKind::BookHotel);
        let Some(RichContent::BookingConfirmation(booking)) = booked.reply.rich_content().first()
        else {
            panic!("expected a booking confirmation, got {:?}", booked.reply);
        };
        assert_eq!(booking.title, "Hotel de Russie");
        assert_eq!(f.inventory.booking_count().await, 2);

        let cancelled = send(&f, "cancel it").await.unwrap();
        assert_eq!(cancelled.intent.kind, IntentKind::CancelBooking);
        assert!(cancelled
            .reply
            .text()
            .contains(booking.confirmation_number.as_str()));
    }

    #[tokio::test]
    async fn lounge_search_from_named_airport_ignores_trip_destination() {
        let f = fixture(SendMessageConfig::default()).await;

        let result = send(&f, "any lounges? I'm flying from JFK").await.unwrap();

        assert_eq!(result.intent.kind, IntentKind::SearchLounge);
        assert_eq!(result.intent.slots.destination, None);
        assert!(result.reply.text().contains("JFK"));
        assert!(result
            .reply
            .rich_content()
            .iter()
            .all(|c| matches!(c, RichContent::LoungeCard(l) if l.airport_code == "JFK")));
    }

    #[tokio::test]
    async fn booking_a_hotel_never_shown_books_nothing() {
        let f = fixture(SendMessageConfig::default()).await;

        send(&f, "Find me a hotel in Rome").await.unwrap();
        let result = send(&f, "book the Grand Hyatt").await.unwrap();

        assert_eq!(result.intent.kind, IntentKind::BookHotel);
        assert!(result.reply.text().starts_with("Sorry"));
        assert!(result.reply.rich_content().is_empty());
        assert_eq!(f.inventory.booking_count().await, 1);
    }

    #[tokio::test]
    async fn lookback_window_bounds_candidates() {
        let f = fixture(SendMessageConfig {
            history_lookback: 2,
            ..Default::default()
        })
        .await;

        send(&f, "Find me a hotel in Rome").await.unwrap();
        send(&f, "what's my points balance").await.unwrap();
        let result = send(&f, "book the hotel").await.unwrap();

        assert_eq!(result.intent.kind, IntentKind::BookHotel);
        assert!(result.reply.text().starts_with("Sorry"));
        assert!(result.reply.rich_content().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_turns_append_whole_turns() {
        let f = Arc::new(fixture(SendMessageConfig::default()).await);

        let mut handles = Vec::new();
        for i in 0..20 {
            let f = f.clone();
            handles.push(tokio::spawn(async move {
                let text = if i % 2 == 0 {
                    "what's my points balance"
                } else {
                    "find me a restaurant"
                };
                send(&f, text).await.unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let history = f.history.history(&rome_trip(), None).await.unwrap();
        assert_eq!(history.len(), 40);
        for pair in history.chunks(2) {
            assert_eq!(pair[0].sender(), Sender::User);
            assert_eq!(pair[1].sender(), Sender::Agent);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn history_grows_append_only(texts in prop::collection::vec("[a-z ]{1,24}[a-z]", 1..5)) {
            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
            rt.block_on(async {
                let f = fixture(SendMessageConfig::default()).await;
                let mut before = f.history.history(&rome_trip(), None).await.unwrap();

                for text in &texts {
                    send(&f, text).await.unwrap();
                    let after = f.history.history(&rome_trip(), None).await.unwrap();
                    assert_eq!(after.len(), before.len() + 2);
                    assert_eq!(&after[..before.len()], &before[..]);

                    let again = f.history.history(&rome_trip(), None).await.unwrap();
                    assert_eq!(after, again);
                    before = after;
                }
            });
        }
    }
}
