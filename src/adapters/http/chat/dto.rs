//! HTTP DTOs for chat endpoints.
//!
//! Messages and intents serialize straight from the domain types; only the
//! request envelope and error body are HTTP-specific.

use serde::{Deserialize, Serialize};

use crate::domain::chat::{ChatMessage, Intent};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/trips/:trip_id/chat/messages`.
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

/// Query parameters for history retrieval.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryParams {
    /// Return only the most recent `limit` messages.
    #[serde(default)]
    pub limit: Option<usize>,
}

impl HistoryParams {
    /// Maximum allowed limit.
    pub const MAX_LIMIT: usize = 500;

    /// The requested limit, capped at MAX_LIMIT. `None` means the whole history.
    pub fn effective_limit(&self) -> Option<usize> {
        self.limit.map(|l| l.min(Self::MAX_LIMIT))
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response to a chat turn.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub reply: ChatMessage,
    pub intent: Intent,
}

/// A trip's messages, oldest first.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatHistoryResponse {
    pub trip_id: String,
    pub messages: Vec<ChatMessage>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Response
// ════════════════════════════════════════════════════════════════════════════════

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: format!("{} not found: {}", resource_type, id),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
        }
    }
}
