//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Commands (sending a message) and queries (reading history) have separate handlers.

pub mod handlers;

pub use handlers::chat::{
    ActionResolver, GetChatHistoryError, GetChatHistoryHandler, GetChatHistoryQuery,
    SendMessageCommand, SendMessageConfig, SendMessageError, SendMessageHandler,
    SendMessageResult,
};
