//! In-Memory Chat History Adapter
//!
//! Keeps each trip's messages in memory. Each trip has its own lock, so turns on
//! different trips never contend, while appends to one trip serialize.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::chat::ChatMessage;
use crate::domain::foundation::TripId;
use crate::ports::{ChatHistoryError, ChatHistoryStore};

type TripLog = Arc<RwLock<Vec<ChatMessage>>>;

/// In-memory, append-only chat history.
#[derive(Debug, Clone, Default)]
pub struct InMemoryChatHistory {
    logs: Arc<RwLock<HashMap<TripId, TripLog>>>,
}

impl InMemoryChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of trips with at least one message.
    pub async fn trip_count(&self) -> usize {
        self.logs.read().await.len()
    }

    async fn log_for(&self, trip_id: &TripId) -> TripLog {
        if let Some(log) = self.logs.read().await.get(trip_id) {
            return log.clone();
        }
        let mut logs = self.logs.write().await;
        logs.entry(trip_id.clone()).or_default().clone()
    }

    fn check_trip(trip_id: &TripId, message: &ChatMessage) -> Result<(), ChatHistoryError> {
        if message.trip_id() != trip_id {
            return Err(ChatHistoryError::TripMismatch {
                expected: trip_id.clone(),
                found: message.trip_id().clone(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ChatHistoryStore for InMemoryChatHistory {
    async fn append(&self, trip_id: &TripId, message: ChatMessage) -> Result<(), ChatHistoryError> {
        self.append_turn(trip_id, vec![message]).await
    }

    async fn append_turn(
        &self,
        trip_id: &TripId,
        messages: Vec<ChatMessage>,
    ) -> Result<(), ChatHistoryError> {
        for message in &messages {
            Self::check_trip(trip_id, message)?;
        }
        if messages.is_empty() {
            return Ok(());
        }

        let log = self.log_for(trip_id).await;
        let mut log = log.write().await;
        log.extend(messages);
        Ok(())
    }

    async fn history(
        &self,
        trip_id: &TripId,
        limit: Option<usize>,
    ) -> Result<Vec<ChatMessage>, ChatHistoryError> {
        let log = match self.logs.read().await.get(trip_id) {
            Some(log) => log.clone(),
            None => return Ok(Vec::new()),
        };
        let log = log.read().await;
        let start = limit.map_or(0, |n| log.len().saturating_sub(n));
        Ok(log[start..].to_vec())
    }
}
