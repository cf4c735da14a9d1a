//! Chat message entity.
//!
//! Messages are immutable records of user/agent exchanges within a trip's chat.
//! Each message has a sender, text, timestamp, and optional rich content cards.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, MessageId, Timestamp, TripId};

use super::rich_content::RichContent;

/// Who sent a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// The traveler.
    User,
    /// The concierge.
    Agent,
}

/// An immutable message in a trip's chat history.
///
/// # Invariants
///
/// - `id` is globally unique
/// - `text` is non-empty (validated at construction)
/// - belongs to exactly one trip (`trip_id`)
/// - `rich_content` is empty when the message carries no cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    id: MessageId,
    trip_id: TripId,
    sender: Sender,
    text: String,
    timestamp: Timestamp,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    rich_content: Vec<RichContent>,
}

impl ChatMessage {
    /// Creates a user message.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if text is empty or whitespace only
    pub fn user(trip_id: TripId, text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::validation("text", "Message text cannot be empty"));
        }

        Ok(Self {
            id: MessageId::new(),
            trip_id,
            sender: Sender::User,
            text,
            timestamp: Timestamp::now(),
            rich_content: Vec::new(),
        })
    }

    /// Creates an agent reply with optional cards.
    pub fn agent(trip_id: TripId, text: impl Into<String>, rich_content: Vec<RichContent>) -> Self {
        Self {
            id: MessageId::new(),
            trip_id,
            sender: Sender::Agent,
            text: text.into(),
            timestamp: Timestamp::now(),
            rich_content,
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn trip_id(&self) -> &TripId {
        &self.trip_id
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn rich_content(&self) -> &[RichContent] {
        &self.rich_content
    }

    /// Returns true if the message carries at least one card.
    pub fn has_rich_content(&self) -> bool {
        !self.rich_content.is_empty()
    }

    pub fn is_from_agent(&self) -> bool {
        self.sender == Sender::Agent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip() -> TripId {
        TripId::new("trip-rome").unwrap()
    }

    #[test]
    fn user_message_rejects_blank_text() {
        assert!(ChatMessage::user(trip(), "   ").is_err());
    }

    #[test]
    fn user_message_has_no_cards() {
        let msg = ChatMessage::user(trip(), "hello").unwrap();
        assert_eq!(msg.sender(), Sender::User);
        assert!(!msg.has_rich_content());
        assert_eq!(msg.trip_id(), &trip());
    }

    #[test]
    fn agent_message_skips_empty_rich_content_in_json() {
        let msg = ChatMessage::agent(trip(), "Hi there", vec![]);
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["sender"], "agent");
        assert_eq!(json["tripId"], "trip-rome");
        assert!(json.get("richContent").is_none());
    }
}
