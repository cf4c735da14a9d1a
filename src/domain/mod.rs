//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, money, timestamps, errors)
//! - `travel` - Entities exchanged with the Domain Services
//! - `chat` - Chat messages, intent classification and response composition

pub mod chat;
pub mod foundation;
pub mod travel;
