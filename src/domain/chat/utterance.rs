//! Normalized view of a user utterance for keyword and phrase matching.

/// Lowercases, strips punctuation to spaces and collapses whitespace.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// An utterance prepared for matching.
///
/// Phrases match on whole words only, so "car" does not match "card".
#[derive(Debug, Clone)]
pub struct Utterance {
    raw: String,
    lowered: String,
    padded: String,
}

impl Utterance {
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim();
        Self {
            raw: trimmed.to_string(),
            lowered: trimmed.to_lowercase(),
            padded: format!(" {} ", normalize(trimmed)),
        }
    }

    /// The trimmed original text.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Lowercased text with punctuation intact, for pattern extraction.
    pub fn lowered(&self) -> &str {
        &self.lowered
    }

    /// Normalized words.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.padded.split_whitespace()
    }

    /// Checks for a whole-word phrase. The phrase must already be normalized.
    pub fn has_phrase(&self, phrase: &str) -> bool {
        self.position_of(phrase).is_some()
    }

    /// Checks if any phrase in the list is present.
    pub fn has_any(&self, phrases: &[&str]) -> bool {
        phrases.iter().any(|p| self.has_phrase(p))
    }

    /// Checks if any word starts with the prefix ("cancel" matches "cancelled").
    pub fn has_word_prefix(&self, prefix: &str) -> bool {
        self.words().any(|w| w.starts_with(prefix))
    }

    /// Byte offset of the first whole-word occurrence of the phrase.
    pub fn position_of(&self, phrase: &str) -> Option<usize> {
        if phrase.is_empty() {
            return None;
        }
        self.padded.find(&format!(" {} ", phrase))
    }

    /// Earliest position of any phrase in the list.
    pub fn earliest_of(&self, phrases: &[&str]) -> Option<usize> {
        phrases.iter().filter_map(|p| self.position_of(p)).min()
    }

    /// The word immediately before a position returned by [`Utterance::position_of`].
    pub fn word_before(&self, position: usize) -> Option<&str> {
        self.padded.get(..position)?.split_whitespace().last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_punctuation_and_case() {
        assert_eq!(normalize("  What's my Points-Balance?! "), "what s my points balance");
    }

    #[test]
    fn phrases_match_whole_words_only() {
        let u = Utterance::new("Show me the card options");
        assert!(!u.has_phrase("car"));
        assert!(u.has_phrase("card"));
        assert!(u.has_phrase("show me"));
    }

    #[test]
    fn word_prefix_matches_inflections() {
        let u = Utterance::new("I want this cancelled");
        assert!(u.has_word_prefix("cancel"));
    }

    #[test]
    fn word_before_finds_preceding_word() {
        let u = Utterance::new("fly from New York to Rome");
        let pos = u.position_of("new york").unwrap();
        assert_eq!(u.word_before(pos), Some("from"));
        let pos = u.position_of("rome").unwrap();
        assert_eq!(u.word_before(pos), Some("to"));
    }

    #[test]
    fn earliest_of_picks_first_occurrence() {
        let u = Utterance::new("a hotel near a restaurant");
        let hotel = u.earliest_of(&["hotel"]).unwrap();
        let restaurant = u.earliest_of(&["restaurant"]).unwrap();
        assert!(hotel < restaurant);
    }
}
