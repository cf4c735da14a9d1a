//! Chat command and query handlers.
//!
//! One chat turn is classify → resolve → compose → record. The resolver is the
//! only piece that talks to the Domain Services.

mod action_resolver;
mod get_chat_history;
mod send_message;

pub use action_resolver::{apply_trip_defaults, ActionResolver};
pub use get_chat_history::{GetChatHistoryError, GetChatHistoryHandler, GetChatHistoryQuery};
pub use send_message::{
    SendMessageCommand, SendMessageConfig, SendMessageError, SendMessageHandler,
    SendMessageResult,
};
