//! Entity slot extraction from utterances.
//!
//! Lightweight pattern rules: places come from the gazetteer, dates from common
//! phrases (ambiguous ones resolve to the nearest future date), guest counts from
//! numbers next to "guests"/"people".

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::foundation::ConfirmationNumber;

use super::gazetteer::Gazetteer;
use super::utterance::Utterance;

const MONTHS: &str = "january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec";

const NUMBER: &str = r"\d{1,2}|one|two|three|four|five|six|seven|eight|nine|ten";

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b").expect("valid ISO date regex"));

static MONTH_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\b({})\.?\s+(\d{{1,2}})(?:st|nd|rd|th)?\b", MONTHS))
        .expect("valid month-day regex")
});

static DAY_MONTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\b(\d{{1,2}})(?:st|nd|rd|th)?\s+(?:of\s+)?({})\b", MONTHS))
        .expect("valid day-month regex")
});

static NUMERIC_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2})/(\d{1,2})\b").expect("valid numeric date regex"));

static IN_DAYS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bin (\d{1,3}) days?\b").expect("valid relative date regex"));

static GUESTS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b({})\s+(?:guests?|people|persons|travell?ers|adults|pax)\b",
        NUMBER
    ))
    .expect("valid guest regex")
});

static PARTY_OF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\b(?:party|table|reservation) (?:of|for) ({})\b", NUMBER))
        .expect("valid party regex")
});

static CONFIRMATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\btc-?\d{6}\b").expect("valid confirmation regex"));

/// Known cuisines and the canonical name each maps to.
const CUISINES: &[(&str, &str)] = &[
    ("italian", "italian"),
    ("pizza", "italian"),
    ("pasta", "italian"),
    ("french", "french"),
    ("japanese", "japanese"),
    ("sushi", "japanese"),
    ("ramen", "japanese"),
    ("mexican", "mexican"),
    ("tacos", "mexican"),
    ("indian", "indian"),
    ("thai", "thai"),
    ("chinese", "chinese"),
    ("korean", "korean"),
    ("vietnamese", "vietnamese"),
    ("greek", "greek"),
    ("spanish", "spanish"),
    ("tapas", "spanish"),
    ("mediterranean", "mediterranean"),
    ("seafood", "seafood"),
    ("steakhouse", "steakhouse"),
    ("steak", "steakhouse"),
    ("vegetarian", "vegetarian"),
    ("vegan", "vegan"),
];

/// Every cuisine word that signals a restaurant request.
pub fn cuisine_words() -> impl Iterator<Item = &'static str> {
    CUISINES.iter().map(|(word, _)| *word)
}

/// Origin and destination found in the utterance.
///
/// "from X" marks an origin and "to Y" a destination. Two unmarked places read
/// as origin then destination; a single unmarked place is the destination.
pub fn extract_places(utterance: &Utterance, gazetteer: &Gazetteer) -> (Option<String>, Option<String>) {
    let matches = gazetteer.find_places(utterance);
    let mut origin: Option<String> = None;
    let mut destination: Option<String> = None;
    let mut unmarked = Vec::new();

    for m in &matches {
        match utterance.word_before(m.position) {
            Some("from") if origin.is_none() => origin = Some(m.place.name.clone()),
            Some("to") if destination.is_none() => destination = Some(m.place.name.clone()),
            _ => unmarked.push(m.place.name.clone()),
        }
    }

    if origin.is_none() && destination.is_none() && unmarked.len() >= 2 {
        return (Some(unmarked[0].clone()), Some(unmarked[1].clone()));
    }

    for name in unmarked {
        if destination.is_none() {
            destination = Some(name);
        } else if origin.is_none() {
            origin = Some(name);
        }
    }

    (origin, destination)
}

/// The date mentioned in the utterance, relative to `today`.
pub fn extract_date(utterance: &Utterance, today: NaiveDate) -> Option<NaiveDate> {
    let text = utterance.lowered();

    if let Some(caps) = ISO_DATE.captures(text) {
        let year = caps[1].parse().ok()?;
        let month = caps[2].parse().ok()?;
        let day = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if utterance.has_phrase("day after tomorrow") {
        return Some(today + Duration::days(2));
    }
    if utterance.has_phrase("tomorrow") {
        return Some(today + Duration::days(1));
    }
    if utterance.has_any(&["today", "tonight"]) {
        return Some(today);
    }
    if utterance.has_phrase("next week") {
        return Some(today + Duration::days(7));
    }
    if let Some(caps) = IN_DAYS.captures(text) {
        let days: i64 = caps[1].parse().ok()?;
        return Some(today + Duration::days(days));
    }

    if let Some(caps) = MONTH_DAY.captures(text) {
        let month = month_number(&caps[1])?;
        let day = caps[2].parse().ok()?;
        return nearest_future(month, day, today);
    }
    if let Some(caps) = DAY_MONTH.captures(text) {
        let day = caps[1].parse().ok()?;
        let month = month_number(&caps[2])?;
        return nearest_future(month, day, today);
    }
    if let Some(caps) = NUMERIC_DATE.captures(text) {
        let month = caps[1].parse().ok()?;
        let day = caps[2].parse().ok()?;
        return nearest_future(month, day, today);
    }

    utterance
        .words()
        .find_map(weekday_from_word)
        .map(|weekday| next_weekday(weekday, today))
}

/// Number of guests or party size.
pub fn extract_guest_count(utterance: &Utterance) -> Option<u32> {
    let text = utterance.lowered();
    GUESTS
        .captures(text)
        .or_else(|| PARTY_OF.captures(text))
        .and_then(|caps| parse_number(&caps[1]))
        .filter(|n| *n > 0)
}

/// Canonical cuisine named in the utterance.
pub fn extract_cuisine(utterance: &Utterance) -> Option<String> {
    CUISINES
        .iter()
        .filter_map(|(word, canonical)| utterance.position_of(word).map(|pos| (pos, *canonical)))
        .min_by_key(|(pos, _)| *pos)
        .map(|(_, canonical)| canonical.to_string())
}

/// Booking confirmation number quoted in the utterance.
pub fn extract_confirmation_number(utterance: &Utterance) -> Option<ConfirmationNumber> {
    CONFIRMATION
        .find(utterance.lowered())
        .and_then(|m| ConfirmationNumber::parse(m.as_str()).ok())
}

fn month_number(name: &str) -> Option<u32> {
    let month = match &name[..3] {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// The next occurrence of month/day on or after `today`.
fn nearest_future(month: u32, day: u32, today: NaiveDate) -> Option<NaiveDate> {
    let this_year = NaiveDate::from_ymd_opt(today.year(), month, day)?;
    if this_year >= today {
        Some(this_year)
    } else {
        NaiveDate::from_ymd_opt(today.year() + 1, month, day)
    }
}

fn weekday_from_word(word: &str) -> Option<Weekday> {
    match word {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

/// The next date falling on `weekday`, strictly after `today`.
fn next_weekday(weekday: Weekday, today: NaiveDate) -> NaiveDate {
    let current = today.weekday().num_days_from_monday() as i64;
    let target = weekday.num_days_from_monday() as i64;
    let mut ahead = (target - current).rem_euclid(7);
    if ahead == 0 {
        ahead = 7;
    }
    today + Duration::days(ahead)
}

fn parse_number(token: &str) -> Option<u32> {
    let n = match token {
        "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        digits => return digits.parse().ok(),
    };
    Some(n)
}
