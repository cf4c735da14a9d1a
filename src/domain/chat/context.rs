//! Conversation context: the bounded lookback window the classifier and resolver read.

use crate::domain::travel::{Booking, BookingKind};

use super::classifier::brand_words;
use super::message::ChatMessage;
use super::rich_content::{BookableItem, RichContent};
use super::utterance::{normalize, Utterance};

/// Ordinal words mapped to a position in the most recent card set.
/// `None` stands for "last".
const ORDINALS: &[(&str, Option<usize>)] = &[
    ("first", Some(0)),
    ("1st", Some(0)),
    ("second", Some(1)),
    ("2nd", Some(1)),
    ("third", Some(2)),
    ("3rd", Some(2)),
    ("last", None),
];

/// Prior messages for one trip, most recent first.
///
/// Read-only input to classification and resolution.
#[derive(Debug, Clone, Default)]
pub struct ConversationContext {
    messages: Vec<ChatMessage>,
}

impl ConversationContext {
    /// An empty context (first turn of a conversation).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a context from a chronological history slice.
    pub fn from_chronological(mut messages: Vec<ChatMessage>) -> Self {
        messages.reverse();
        Self { messages }
    }

    /// Messages, most recent first.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    fn cards(&self) -> impl Iterator<Item = &RichContent> {
        self.messages.iter().flat_map(|m| m.rich_content().iter())
    }

    /// Kind of the most recently surfaced bookable card.
    pub fn most_recent_bookable_kind(&self) -> Option<BookingKind> {
        self.cards().find_map(RichContent::bookable_kind)
    }

    /// Kind of the most recent card whose entity the utterance names.
    pub fn named_kind(&self, utterance: &Utterance) -> Option<BookingKind> {
        self.cards()
            .filter_map(RichContent::bookable)
            .find(|item| names_item(utterance, item))
            .map(|item| item.kind())
    }

    /// Picks the entity a booking request refers to.
    ///
    /// In order: an entity named in the utterance, an ordinal into the most recent
    /// card set of that kind, then the first card of that set. An utterance naming
    /// a brand selects the most recent card carrying it, or nothing.
    pub fn select_candidate(&self, kind: BookingKind, utterance: &Utterance) -> Option<BookableItem> {
        let candidates: Vec<BookableItem> = self
            .cards()
            .filter_map(RichContent::bookable)
            .filter(|item| item.kind() == kind)
            .collect();
        if let Some(named) = candidates.iter().find(|item| names_item(utterance, item)) {
            return Some(named.clone());
        }
        let brands: Vec<&str> = brand_words(kind)
            .iter()
            .copied()
            .filter(|brand| utterance.has_phrase(brand))
            .collect();
        if !brands.is_empty() {
            return candidates
                .into_iter()
                .find(|item| brands.iter().any(|brand| carries_brand(item, brand)));
        }

        let latest_set: Vec<BookableItem> = self
            .messages
            .iter()
            .map(|m| {
                m.rich_content()
                    .iter()
                    .filter_map(RichContent::bookable)
                    .filter(|item| item.kind() == kind)
                    .collect::<Vec<_>>()
            })
            .find(|set| !set.is_empty())?;

        let ordinal = ORDINALS
            .iter()
            .filter_map(|(word, index)| utterance.position_of(word).map(|pos| (pos, *index)))
            .min_by_key(|(pos, _)| *pos)
            .map(|(_, index)| index);

        match ordinal {
            Some(Some(index)) => latest_set.into_iter().nth(index),
            Some(None) => latest_set.into_iter().last(),
            None => latest_set.into_iter().next(),
        }
    }

    /// The most recent active booking shown on a confirmation card.
    pub fn latest_confirmation(&self) -> Option<&Booking> {
        self.cards().find_map(|card| match card {
            RichContent::BookingConfirmation(booking) if booking.is_active() => Some(booking),
            _ => None,
        })
    }
}

fn names_item(utterance: &Utterance, item: &BookableItem) -> bool {
    item.references()
        .iter()
        .map(|r| normalize(r))
        .any(|r| utterance.has_phrase(&r))
}

fn carries_brand(item: &BookableItem, brand: &str) -> bool {
    item.references()
        .iter()
        .any(|r| Utterance::new(r).has_phrase(brand))
}
