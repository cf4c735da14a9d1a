//! Destination catalog entities used for inspiration and place-name matching.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::DestinationId;

/// A city travelers can go to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: DestinationId,
    pub name: String,
    pub country: String,
    pub airport_code: String,
    /// Alternative spellings and nicknames ("nyc", "big apple").
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Theme slugs this destination belongs to.
    #[serde(default)]
    pub themes: Vec<String>,
    #[serde(default)]
    pub summary: String,
}

impl Destination {
    /// Checks if the destination is tagged with the theme slug.
    pub fn has_theme(&self, slug: &str) -> bool {
        self.themes.iter().any(|t| t.eq_ignore_ascii_case(slug))
    }
}

/// A travel theme ("beach", "food & wine") grouping destinations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}
