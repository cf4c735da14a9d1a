//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - Axum routes for the chat API
//! - `inventory` - Domain Service implementations (seeded in-memory, remote REST)
//! - `storage` - Chat history stores

pub mod http;
pub mod inventory;
pub mod storage;

pub use inventory::{InMemoryInventory, RemoteInventory, RemoteInventoryConfig};
pub use storage::InMemoryChatHistory;
