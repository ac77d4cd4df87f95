//! Geographic-location inference
//!
//! Ordered heuristic chain over one raw post, first match wins:
//! 1. structured place field → its country name;
//! 2. author free-text location: full country name as substring;
//! 3. punctuation-stripped tokens vs US state abbreviations → United States;
//! 4. tokens vs alpha-2 codes (with the common "UK" alias), then alpha-3;
//! 5. injected free-text place resolver, first recognized country.
//!
//! No match is not an error — the location stays unset.

use crate::countries::{COUNTRIES, US_STATE_ABBREVS};
use crate::record::RawPost;

const UNITED_STATES: &str = "United States";
const UNITED_KINGDOM: &str = "United Kingdom";

/// Free-text place extraction collaborator (rule 5 fallback).
pub trait PlaceResolver {
    /// First recognized country in free-form text, if any.
    fn first_country(&self, text: &str) -> Option<String>;
}

/// Built-in fallback resolver: matches well-known city names.
///
/// Stands in for a full place-extraction service; tests inject fakes
/// through the same trait.
#[derive(Debug, Default)]
pub struct CityGazetteer;

static CITIES: &[(&str, &str)] = &[
    ("Amsterdam", "Netherlands"),
    ("Bangkok", "Thailand"),
    ("Barcelona", "Spain"),
    ("Beijing", "China"),
    ("Berlin", "Germany"),
    ("Bogota", "Colombia"),
    ("Buenos Aires", "Argentina"),
    ("Cairo", "Egypt"),
    ("Chicago", "United States"),
    ("Delhi", "India"),
    ("Dubai", "United Arab Emirates"),
    ("Dublin", "Ireland"),
    ("Istanbul", "Turkey"),
    ("Jakarta", "Indonesia"),
    ("Johannesburg", "South Africa"),
    ("Lagos", "Nigeria"),
    ("Lisbon", "Portugal"),
    ("London", "United Kingdom"),
    ("Los Angeles", "United States"),
    ("Madrid", "Spain"),
    ("Melbourne", "Australia"),
    ("Mexico City", "Mexico"),
    ("Milan", "Italy"),
    ("Moscow", "Russian Federation"),
    ("Mumbai", "India"),
    ("Nairobi", "Kenya"),
    ("New York", "United States"),
    ("Paris", "France"),
    ("Rio de Janeiro", "Brazil"),
    ("Rome", "Italy"),
    ("San Francisco", "United States"),
    ("Sao Paulo", "Brazil"),
    ("Seoul", "Korea, Republic of"),
    ("Shanghai", "China"),
    ("Singapore", "Singapore"),
    ("Sydney", "Australia"),
    ("Tokyo", "Japan"),
    ("Toronto", "Canada"),
    ("Vienna", "Austria"),
    ("Warsaw", "Poland"),
];

impl PlaceResolver for CityGazetteer {
    fn first_country(&self, text: &str) -> Option<String> {
        CITIES
            .iter()
            .find(|(city, _)| text.contains(city))
            .map(|(_, country)| (*country).to_string())
    }
}

/// Infer a location string for one post, or `None`.
pub fn infer_location(post: &RawPost, resolver: &dyn PlaceResolver) -> Option<String> {
    // Rule 1: explicit structured place wins over everything
    if let Some(country) = post.place.as_ref().and_then(|p| p.country.as_deref()) {
        if !country.is_empty() {
            return Some(country.to_string());
        }
    }

    let freeform = post.author.as_ref()?.location.as_deref()?.trim();
    if freeform.is_empty() {
        return None;
    }
    let tokens = strip_punctuation(freeform);

    country_name_substring(freeform)
        .or_else(|| us_state_abbrev(&tokens))
        .or_else(|| country_code(&tokens))
        .or_else(|| resolver.first_country(freeform))
}

/// Location words with ASCII punctuation stripped ("TX," → "TX").
fn strip_punctuation(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|ch| !ch.is_ascii_punctuation())
                .collect()
        })
        .filter(|word: &String| !word.is_empty())
        .collect()
}

/// Rule 2: full country name appearing anywhere in the free text.
/// Keeps scanning so that a later, longer name wins (Niger vs Nigeria).
fn country_name_substring(text: &str) -> Option<String> {
    let mut found = None;
    for country in COUNTRIES {
        if text.contains(country.name) {
            found = Some(country.name.to_string());
        }
    }
    found
}

/// Rule 3: US state postal abbreviation among the tokens.
fn us_state_abbrev(tokens: &[String]) -> Option<String> {
    tokens
        .iter()
        .any(|t| US_STATE_ABBREVS.contains(&t.as_str()))
        .then(|| UNITED_STATES.to_string())
}

/// Rule 4: alpha-2 codes (with the "UK" alias), then alpha-3 codes.
fn country_code(tokens: &[String]) -> Option<String> {
    // "UK" is not the official GB code but is far more common in the wild
    if tokens.iter().any(|t| t == "UK") {
        return Some(UNITED_KINGDOM.to_string());
    }
    COUNTRIES
        .iter()
        .find(|country| tokens.iter().any(|t| t == country.alpha2))
        .or_else(|| {
            COUNTRIES
                .iter()
                .find(|country| tokens.iter().any(|t| t == country.alpha3))
        })
        .map(|country| country.name.to_string())
}
