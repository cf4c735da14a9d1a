//! Chat domain - the intent dispatch core.
//!
//! A chat turn flows through three pure pieces:
//!
//! - [`IntentClassifier`] maps an utterance plus [`ConversationContext`] to an [`Intent`]
//! - the action resolver (application layer) turns the intent into an [`ActionResult`]
//! - [`ResponseComposer`] renders the result as an agent [`ChatMessage`]

mod action;
mod classifier;
mod composer;
mod context;
mod extraction;
mod gazetteer;
mod intent;
mod message;
mod rich_content;
mod utterance;

pub use action::{ActionResult, DomainEntity, ErrorKind};
pub use classifier::{IntentClassifier, RuleBasedIntentClassifier};
pub use composer::ResponseComposer;
pub use context::ConversationContext;
pub use gazetteer::{Gazetteer, Place, PlaceMatch};
pub use intent::{Intent, IntentKind, IntentSlots};
pub use message::{ChatMessage, Sender};
pub use rich_content::{BookableItem, RichContent};
pub use utterance::{normalize, Utterance};
