//! HTTP handlers for chat endpoints.
//!
//! These handlers connect Axum routes to the chat command and query handlers.

use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::warn;

use crate::application::handlers::chat::{
    GetChatHistoryError, GetChatHistoryHandler, GetChatHistoryQuery, SendMessageCommand,
    SendMessageError, SendMessageHandler,
};
use crate::domain::foundation::TripId;
use crate::ports::TripService;

use super::dto::{
    ChatHistoryResponse, ErrorResponse, HistoryParams, SendMessageRequest, SendMessageResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state for chat handlers.
#[derive(Clone)]
pub struct ChatAppState {
    pub send_message: Arc<SendMessageHandler>,
    pub get_history: Arc<GetChatHistoryHandler>,
    pub trips: Arc<dyn TripService>,
    /// Include internal error text in 500 responses.
    pub verbose_errors: bool,
}

impl ChatAppState {
    pub fn new(
        send_message: Arc<SendMessageHandler>,
        get_history: Arc<GetChatHistoryHandler>,
        trips: Arc<dyn TripService>,
    ) -> Self {
        Self {
            send_message,
            get_history,
            trips,
            verbose_errors: false,
        }
    }

    pub fn with_verbose_errors(mut self, verbose: bool) -> Self {
        self.verbose_errors = verbose;
        self
    }

    fn internal(&self, detail: String) -> ChatApiError {
        ChatApiError::Internal {
            detail,
            expose: self.verbose_errors,
        }
    }
}

fn parse_trip_id(raw: &str) -> Result<TripId, ChatApiError> {
    TripId::new(raw).map_err(|_| ChatApiError::BadRequest("Invalid trip ID format".to_string()))
}

// ════════════════════════════════════════════════════════════════════════════════
// POST /api/trips/:trip_id/chat/messages
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/trips/:trip_id/chat/messages - Run one chat turn.
///
/// # Errors
/// - 400 Bad Request: Invalid trip ID or blank text
/// - 404 Not Found: Unknown trip
pub async fn send_message(
    State(state): State<ChatAppState>,
    Path(trip_id): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, ChatApiError> {
    let trip_id = parse_trip_id(&trip_id)?;

    let result = state
        .send_message
        .handle(SendMessageCommand::new(trip_id, request.text))
        .await
        .map_err(|e| match e {
            SendMessageError::EmptyText => {
                ChatApiError::BadRequest("Message text cannot be empty".to_string())
            }
            SendMessageError::TripNotFound(id) => {
                ChatApiError::NotFound("Trip".to_string(), id.to_string())
            }
            other => state.internal(other.to_string()),
        })?;

    let response = SendMessageResponse {
        reply: result.reply,
        intent: result.intent,
    };
    Ok((StatusCode::OK, Json(response)))
}

// ════════════════════════════════════════════════════════════════════════════════
// GET /api/trips/:trip_id/chat/messages
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/trips/:trip_id/chat/messages - Chat history, oldest first.
///
/// # Query Parameters
/// - `limit`: Return only the most recent `limit` messages
///
/// # Errors
/// - 400 Bad Request: Invalid trip ID
/// - 404 Not Found: Unknown trip
pub async fn get_messages(
    State(state): State<ChatAppState>,
    Path(trip_id): Path<String>,
    Query(params): Query<HistoryParams>,
) -> Result<impl IntoResponse, ChatApiError> {
    let trip_id = parse_trip_id(&trip_id)?;

    match state.trips.get(&trip_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ChatApiError::NotFound("Trip".to_string(), trip_id.to_string())),
        Err(e) => warn!(trip_id = %trip_id, error = %e, "Trip lookup failed, serving history anyway"),
    }

    let mut query = GetChatHistoryQuery::new(trip_id.clone());
    if let Some(limit) = params.effective_limit() {
        query = query.with_limit(limit);
    }

    let messages = state
        .get_history
        .handle(query)
        .await
        .map_err(|e| match e {
            GetChatHistoryError::History(msg) => state.internal(msg),
        })?;

    let response = ChatHistoryResponse {
        trip_id: trip_id.to_string(),
        messages,
    };
    Ok((StatusCode::OK, Json(response)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts application errors to HTTP responses.
#[derive(Debug)]
pub enum ChatApiError {
    BadRequest(String),
    NotFound(String, String),
    Internal { detail: String, expose: bool },
}

impl IntoResponse for ChatApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ChatApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg)),
            ChatApiError::NotFound(resource, id) => {
                (StatusCode::NOT_FOUND, ErrorResponse::not_found(&resource, &id))
            }
            ChatApiError::Internal { detail, expose } => {
                tracing::error!("Internal error: {}", detail);
                let message = if expose {
                    detail
                } else {
                    "An internal error occurred".to_string()
                };
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal(message))
            }
        };

        (status, Json(error)).into_response()
    }
}
