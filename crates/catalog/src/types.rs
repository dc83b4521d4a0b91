//! Core domain types for the character catalog.
//!
//! This module defines the records handed around the whole workspace:
//! - `Character`, the people record as listed by the API, plus the display
//!   data resolved during enrichment
//! - Wire payloads for the other collections (planets, species, films)
//! - The filter selection driven by the view layer

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::parser;

// =============================================================================
// Type Aliases & Constants
// =============================================================================

/// Numeric identifier found at the end of every resource URL (`.../people/1/`)
pub type ResourceId = u32;

/// Placeholder for homeworld fields that are missing or failed to resolve
pub const UNKNOWN: &str = "Unknown";

/// Filter value that selects records lacking a relation
pub const ABSENT_SENTINEL: &str = "none";

/// Number of records the API returns per listing page
pub const API_PAGE_SIZE: u32 = 10;

// =============================================================================
// Character
// =============================================================================

/// Display copy of a character's homeworld.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeworldDetails {
    pub name: String,
    pub terrain: String,
    pub climate: String,
    pub population: String,
}

impl HomeworldDetails {
    /// All four fields set to "Unknown"
    pub fn unknown() -> Self {
        Self {
            name: UNKNOWN.to_string(),
            terrain: UNKNOWN.to_string(),
            climate: UNKNOWN.to_string(),
            population: UNKNOWN.to_string(),
        }
    }

    /// True when the planet name never resolved
    pub fn is_unknown(&self) -> bool {
        self.name.is_empty() || self.name == UNKNOWN
    }
}

impl Default for HomeworldDetails {
    fn default() -> Self {
        Self::unknown()
    }
}

/// A character record.
///
/// The first block of fields mirrors the people listing. `homeworld_details`
/// and `species_names` are filled in once, during enrichment, and never
/// change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub mass: String,
    #[serde(default)]
    pub birth_year: String,
    /// RFC 3339 creation timestamp
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub films: Vec<String>,
    /// Homeworld URL. The API sends `""` or `null` when there is none.
    #[serde(default, deserialize_with = "parser::empty_string_as_none")]
    pub homeworld: Option<String>,
    #[serde(default)]
    pub species: Vec<String>,
    /// Source URL, doubles as the record's identity
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homeworld_details: Option<HomeworldDetails>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub species_names: Vec<String>,
}

impl Character {
    /// Create a bare character with only a name and identity URL.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            height: String::new(),
            mass: String::new(),
            birth_year: String::new(),
            created: String::new(),
            films: Vec::new(),
            homeworld: None,
            species: Vec::new(),
            url: url.into(),
            homeworld_details: None,
            species_names: Vec::new(),
        }
    }

    pub fn with_homeworld(mut self, url: impl Into<String>) -> Self {
        self.homeworld = Some(url.into());
        self
    }

    pub fn with_films<I, S>(mut self, films: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.films = films.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_species<I, S>(mut self, species: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.species = species.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_homeworld_details(mut self, details: HomeworldDetails) -> Self {
        self.homeworld_details = Some(details);
        self
    }

    pub fn with_species_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.species_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Identifier parsed from the record's own URL
    pub fn id(&self) -> Option<ResourceId> {
        parser::resource_id(&self.url)
    }

    /// Resolved homeworld name, if enrichment produced a real one
    pub fn homeworld_name(&self) -> Option<&str> {
        self.homeworld_details
            .as_ref()
            .filter(|details| !details.is_unknown())
            .map(|details| details.name.as_str())
    }
}

// =============================================================================
// Wire Payloads
// =============================================================================

/// One page of a collection endpoint (`/people/?page=N`, `/films/`, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing<T> {
    pub count: u32,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> Listing<T> {
    /// Number of pages needed to hold `count` records, at least one
    pub fn page_count(&self, page_size: u32) -> u32 {
        self.count.div_ceil(page_size.max(1)).max(1)
    }
}

/// Planet resource. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Planet {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub terrain: Option<String>,
    #[serde(default)]
    pub climate: Option<String>,
    #[serde(default)]
    pub population: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl From<Planet> for HomeworldDetails {
    fn from(planet: Planet) -> Self {
        fn or_unknown(value: Option<String>) -> String {
            value
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| UNKNOWN.to_string())
        }

        Self {
            name: or_unknown(planet.name),
            terrain: or_unknown(planet.terrain),
            climate: or_unknown(planet.climate),
            population: or_unknown(planet.population),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Film {
    pub title: String,
    #[serde(default)]
    pub url: String,
}

// =============================================================================
// Filter Selection
// =============================================================================

/// State of a single filter control.
///
/// Rust concept: an enum replaces the stringly-typed "" / "none" / name
/// convention, so every match is exhaustive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FilterChoice {
    /// No filter applied
    #[default]
    Any,
    /// Only records lacking the relation
    Absent,
    /// Only records related to this display name
    Named(String),
}

impl FilterChoice {
    /// Interpret a raw control value: `""` is Any, `"none"` is Absent.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" => Self::Any,
            ABSENT_SENTINEL => Self::Absent,
            name => Self::Named(name.to_string()),
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Any)
    }
}

impl FromStr for FilterChoice {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for FilterChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => Ok(()),
            Self::Absent => f.write_str(ABSENT_SENTINEL),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// The three independent filter controls.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSelection {
    pub homeworld: FilterChoice,
    pub film: FilterChoice,
    pub species: FilterChoice,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_homeworld(mut self, choice: FilterChoice) -> Self {
        self.homeworld = choice;
        self
    }

    pub fn with_film(mut self, choice: FilterChoice) -> Self {
        self.film = choice;
        self
    }

    pub fn with_species(mut self, choice: FilterChoice) -> Self {
        self.species = choice;
        self
    }

    /// True when no control narrows the list
    pub fn is_empty(&self) -> bool {
        !self.homeworld.is_active() && !self.film.is_active() && !self.species.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_deserializes_api_record() {
        let json = r#"{
            "name": "Luke Skywalker",
            "height": "172",
            "mass": "77",
            "birth_year": "19BBY",
            "created": "2014-12-09T13:50:51.644000Z",
            "films": ["https://swapi.dev/api/films/1/"],
            "homeworld": "https://swapi.dev/api/planets/1/",
            "species": [],
            "url": "https://swapi.dev/api/people/1/",
            "eye_color": "blue"
        }"#;

        let character: Character = serde_json::from_str(json).unwrap();
        assert_eq!(character.name, "Luke Skywalker");
        assert_eq!(character.id(), Some(1));
        assert_eq!(
            character.homeworld.as_deref(),
            Some("https://swapi.dev/api/planets/1/")
        );
        assert!(character.homeworld_details.is_none());
        assert!(character.species_names.is_empty());
    }

    #[test]
    fn test_empty_homeworld_is_none() {
        let json = r#"{"name": "Drifter", "homeworld": "", "url": "https://swapi.dev/api/people/99/"}"#;
        let character: Character = serde_json::from_str(json).unwrap();
        assert!(character.homeworld.is_none());

        let json = r#"{"name": "Drifter", "homeworld": null, "url": "https://swapi.dev/api/people/99/"}"#;
        let character: Character = serde_json::from_str(json).unwrap();
        assert!(character.homeworld.is_none());
    }

    #[test]
    fn test_planet_fields_default_to_unknown() {
        let planet = Planet {
            name: Some("Tatooine".to_string()),
            terrain: Some(String::new()),
            climate: None,
            population: Some("200000".to_string()),
            url: None,
        };

        let details = HomeworldDetails::from(planet);
        assert_eq!(details.name, "Tatooine");
        assert_eq!(details.terrain, UNKNOWN);
        assert_eq!(details.climate, UNKNOWN);
        assert_eq!(details.population, "200000");
    }

    #[test]
    fn test_homeworld_name_hides_unknown() {
        let known = Character::new("Luke", "https://swapi.dev/api/people/1/")
            .with_homeworld_details(HomeworldDetails {
                name: "Tatooine".to_string(),
                ..HomeworldDetails::unknown()
            });
        assert_eq!(known.homeworld_name(), Some("Tatooine"));

        let unknown = Character::new("Ghost", "https://swapi.dev/api/people/2/")
            .with_homeworld_details(HomeworldDetails::unknown());
        assert_eq!(unknown.homeworld_name(), None);
    }

    #[test]
    fn test_listing_page_count() {
        let listing: Listing<Character> = Listing {
            count: 82,
            next: None,
            previous: None,
            results: vec![],
        };
        assert_eq!(listing.page_count(API_PAGE_SIZE), 9);

        let empty: Listing<Character> = Listing {
            count: 0,
            next: None,
            previous: None,
            results: vec![],
        };
        assert_eq!(empty.page_count(API_PAGE_SIZE), 1);
    }

    #[test]
    fn test_filter_choice_parse() {
        assert_eq!(FilterChoice::parse(""), FilterChoice::Any);
        assert_eq!(FilterChoice::parse("  "), FilterChoice::Any);
        assert_eq!(FilterChoice::parse("none"), FilterChoice::Absent);
        assert_eq!(
            FilterChoice::parse("Tatooine"),
            FilterChoice::Named("Tatooine".to_string())
        );
        assert_eq!(FilterChoice::Absent.to_string(), "none");
        assert!(FilterSelection::new().is_empty());
        assert!(!FilterSelection::new()
            .with_film(FilterChoice::Absent)
            .is_empty());
    }
}
