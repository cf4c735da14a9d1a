//! Chat pipeline configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Chat turn tuning
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Prior messages the classifier and resolver look back over
    #[serde(default = "default_history_lookback")]
    pub history_lookback: usize,

    /// Cap on per-entity cards in one reply
    #[serde(default = "default_max_cards")]
    pub max_cards: usize,

    /// Cap on destination and theme list length
    #[serde(default = "default_max_list_items")]
    pub max_list_items: usize,

    /// Record the traveler's message alongside the agent reply
    #[serde(default = "default_record_user_messages")]
    pub record_user_messages: bool,
}

impl ChatConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=100).contains(&self.history_lookback) {
            return Err(ValidationError::InvalidHistoryLookback);
        }
        if !(1..=10).contains(&self.max_cards) {
            return Err(ValidationError::InvalidMaxCards);
        }
        if self.max_list_items == 0 {
            return Err(ValidationError::InvalidMaxListItems);
        }
        Ok(())
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            history_lookback: default_history_lookback(),
            max_cards: default_max_cards(),
            max_list_items: default_max_list_items(),
            record_user_messages: default_record_user_messages(),
        }
    }
}

fn default_history_lookback() -> usize {
    10
}

fn default_max_cards() -> usize {
    3
}

fn default_max_list_items() -> usize {
    6
}

fn default_record_user_messages() -> bool {
    true
}
