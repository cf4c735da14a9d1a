//! Chat history port.
//!
//! Per-trip, append-only message log.
//!
//! # Design
//!
//! - **Append-only**: messages are never edited or deleted
//! - **Atomic turns**: `append_turn` writes all of a turn's messages under one lock,
//!   so readers never observe half a turn
//! - **Trip-scoped**: no ordering or locking across trips

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::chat::ChatMessage;
use crate::domain::foundation::TripId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatHistoryError {
    #[error("Message belongs to trip {found}, not {expected}")]
    TripMismatch { expected: TripId, found: TripId },

    #[error("Storage error: {0}")]
    Storage(String),
}

#[async_trait]
pub trait ChatHistoryStore: Send + Sync {
    /// Appends one message to the trip's history.
    ///
    /// # Errors
    ///
    /// - `TripMismatch` if the message belongs to another trip
    async fn append(&self, trip_id: &TripId, message: ChatMessage) -> Result<(), ChatHistoryError>;

    /// Appends several messages as one atomic operation.
    ///
    /// Either every message is appended, contiguously and in order, or none is.
    async fn append_turn(
        &self,
        trip_id: &TripId,
        messages: Vec<ChatMessage>,
    ) -> Result<(), ChatHistoryError>;

    /// Chronological history. With `limit`, only the most recent `limit` messages.
    async fn history(
        &self,
        trip_id: &TripId,
        limit: Option<usize>,
    ) -> Result<Vec<ChatMessage>, ChatHistoryError>;
}
