//! Inventory Adapters
//!
//! Implementations of the Domain Service ports.
//!
//! ## Available Adapters
//!
//! - **InMemoryInventory** - Mock store seeded from the bundled YAML catalog
//! - **RemoteInventory** - REST/JSON client for a real inventory API

mod in_memory;
mod remote;

pub use in_memory::{InMemoryInventory, InventoryLoadError};
pub use remote::{RemoteInventory, RemoteInventoryConfig};
