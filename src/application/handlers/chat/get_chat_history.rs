//! GetChatHistoryHandler - Query handler for a trip's chat history.

use std::sync::Arc;

use thiserror::Error;
use tracing::error;

use crate::domain::chat::ChatMessage;
use crate::domain::foundation::TripId;
use crate::ports::{ChatHistoryError, ChatHistoryStore};

/// Query for a trip's chat history.
#[derive(Debug, Clone)]
pub struct GetChatHistoryQuery {
    pub trip_id: TripId,
    /// Return only the most recent `limit` messages.
    pub limit: Option<usize>,
}

impl GetChatHistoryQuery {
    pub fn new(trip_id: TripId) -> Self {
        Self {
            trip_id,
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[derive(Debug, Clone, Error)]
pub enum GetChatHistoryError {
    #[error("Chat history error: {0}")]
    History(String),
}

impl From<ChatHistoryError> for GetChatHistoryError {
    fn from(err: ChatHistoryError) -> Self {
        GetChatHistoryError::History(err.to_string())
    }
}

/// Handler for reading chat history.
pub struct GetChatHistoryHandler {
    history: Arc<dyn ChatHistoryStore>,
}

impl GetChatHistoryHandler {
    pub fn new(history: Arc<dyn ChatHistoryStore>) -> Self {
        Self { history }
    }

    /// Messages in chronological order. A trip with no messages yields an empty list.
    pub async fn handle(
        &self,
        query: GetChatHistoryQuery,
    ) -> Result<Vec<ChatMessage>, GetChatHistoryError> {
        self.history
            .history(&query.trip_id, query.limit)
            .await
            .map_err(|e| {
                error!(trip_id = %query.trip_id, error = %e, "Failed to read chat history");
                e.into()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::adapters::storage::InMemoryChatHistory;

    struct FailingStore;

    #[async_trait]
    impl ChatHistoryStore for FailingStore {
        async fn append(&self, _: &TripId, _: ChatMessage) -> Result<(), ChatHistoryError> {
            Err(ChatHistoryError::Storage("disk full".to_string()))
        }

        async fn append_turn(&self, _: &TripId, _: Vec<ChatMessage>) -> Result<(), ChatHistoryError> {
            Err(ChatHistoryError::Storage("disk full".to_string()))
        }

        async fn history(
            &self,
            _: &TripId,
            _: Option<usize>,
        ) -> Result<Vec<ChatMessage>, ChatHistoryError> {
            Err(ChatHistoryError::Storage("offline".to_string()))
        }
    }

    fn trip() -> TripId {
        TripId::new("trip-paris").unwrap()
    }

    async fn seeded_store() -> Arc<InMemoryChatHistory> {
        let store = Arc::new(InMemoryChatHistory::new());
        for text in ["hotels in paris", "book the first one", "thanks"] {
            store
                .append(&trip(), ChatMessage::user(trip(), text).unwrap())
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn returns_history_in_order() {
        let handler = GetChatHistoryHandler::new(seeded_store().await);

        let messages = handler.handle(GetChatHistoryQuery::new(trip())).await.unwrap();

        let texts: Vec<_> = messages.iter().map(|m| m.text()).collect();
        assert_eq!(texts, vec!["hotels in paris", "book the first one", "thanks"]);
    }

    #[tokio::test]
    async fn limit_keeps_most_recent() {
        let handler = GetChatHistoryHandler::new(seeded_store().await);

        let messages = handler
            .handle(GetChatHistoryQuery::new(trip()).with_limit(1))
            .await
            .unwrap();

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text(), "thanks");
    }

    #[tokio::test]
    async fn repeated_reads_are_identical() {
        let handler = GetChatHistoryHandler::new(seeded_store().await);

        let first = handler.handle(GetChatHistoryQuery::new(trip())).await.unwrap();
        let second = handler.handle(GetChatHistoryQuery::new(trip())).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn store_failure_is_reported() {
        let handler = GetChatHistoryHandler::new(Arc::new(FailingStore));

        let result = handler.handle(GetChatHistoryQuery::new(trip())).await;

        assert!(matches!(result, Err(GetChatHistoryError::History(msg)) if msg.contains("offline")));
    }
}
