//! Storage Adapters
//!
//! Implementations of the `ChatHistoryStore` port.
//!
//! ## Available Adapters
//!
//! - **InMemoryChatHistory** - Per-trip append-only log held in memory
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::InMemoryChatHistory;
//!
//! let history = Arc::new(InMemoryChatHistory::new());
//! ```

mod in_memory_chat_history;

pub use in_memory_chat_history::InMemoryChatHistory;
