//! Gazetteer of known places and themes, built from the destination catalog.

use crate::domain::travel::{Destination, Theme};

use super::utterance::{normalize, Utterance};

/// A known place and the names it can be referred to by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Place {
    /// Canonical city name passed to Domain Services.
    pub name: String,
    pub airport_code: String,
    /// Normalized names: city, airport code, aliases.
    names: Vec<String>,
}

/// A place found in an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceMatch<'a> {
    pub position: usize,
    pub place: &'a Place,
}

/// Known destinations and themes.
#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    places: Vec<Place>,
    themes: Vec<(String, Vec<String>)>,
}

impl Gazetteer {
    /// Builds a gazetteer from the destination catalog.
    pub fn from_catalog(destinations: &[Destination], themes: &[Theme]) -> Self {
        let places = destinations
            .iter()
            .map(|d| {
                let mut names = vec![normalize(&d.name), normalize(&d.airport_code)];
                names.extend(d.aliases.iter().map(|a| normalize(a)));
                names.retain(|n| !n.is_empty());
                Place {
                    name: d.name.clone(),
                    airport_code: d.airport_code.clone(),
                    names,
                }
            })
            .collect();

        let themes = themes
            .iter()
            .map(|t| {
                let mut names = inflections(&normalize(&t.slug));
                names.extend(inflections(&normalize(&t.name)));
                names.sort();
                names.dedup();
                (t.slug.clone(), names)
            })
            .collect();

        Self { places, themes }
    }

    pub fn place_count(&self) -> usize {
        self.places.len()
    }

    /// Every known place mentioned in the utterance, ordered by position.
    ///
    /// A place mentioned under several names is reported once, at its earliest position.
    pub fn find_places<'a>(&'a self, utterance: &Utterance) -> Vec<PlaceMatch<'a>> {
        let mut matches: Vec<PlaceMatch<'a>> = self
            .places
            .iter()
            .filter_map(|place| {
                place
                    .names
                    .iter()
                    .filter_map(|n| utterance.position_of(n))
                    .min()
                    .map(|position| PlaceMatch { position, place })
            })
            .collect();
        matches.sort_by_key(|m| m.position);
        matches
    }

    /// The first theme slug mentioned in the utterance.
    pub fn find_theme(&self, utterance: &Utterance) -> Option<String> {
        self.themes
            .iter()
            .filter_map(|(slug, names)| {
                names
                    .iter()
                    .filter_map(|n| utterance.position_of(n))
                    .min()
                    .map(|pos| (pos, slug))
            })
            .min_by_key(|(pos, _)| *pos)
            .map(|(_, slug)| slug.clone())
    }
}

/// A phrase and the plural forms of its last word ("beach" gives "beaches", "city" gives "cities").
fn inflections(phrase: &str) -> Vec<String> {
    if phrase.is_empty() {
        return Vec::new();
    }
    let mut forms = vec![phrase.to_string(), format!("{}s", phrase)];
    if phrase.ends_with(['s', 'x', 'z']) || phrase.ends_with("ch") || phrase.ends_with("sh") {
        forms.push(format!("{}es", phrase));
    }
    if let Some(stem) = phrase.strip_suffix('y') {
        if !stem.ends_with(['a', 'e', 'i', 'o', 'u']) {
            forms.push(format!("{}ies", stem));
        }
    }
    forms
}
