//! Filter on film appearances.
//!
//! Characters only carry film URLs; titles are resolved through the
//! reference index by the identifier at the end of each URL.

use crate::traits::Filter;
use anyhow::Result;
use catalog::{Character, FilterChoice, ReferenceIndex};
use rayon::prelude::*;

/// Keeps characters by film appearance.
///
/// - `Absent` keeps characters with no film references
/// - `Named` keeps characters with a film resolving to the chosen title
pub struct FilmFilter {
    choice: FilterChoice,
}

impl FilmFilter {
    pub fn new(choice: FilterChoice) -> Self {
        Self { choice }
    }

    pub fn matches(&self, character: &Character, index: &ReferenceIndex) -> bool {
        match &self.choice {
            FilterChoice::Any => true,
            FilterChoice::Absent => character.films.is_empty(),
            FilterChoice::Named(title) => character
                .films
                .iter()
                .filter_map(|url| index.film_title(url))
                .any(|resolved| resolved == title),
        }
    }
}

impl Filter for FilmFilter {
    fn name(&self) -> &str {
        "FilmFilter"
    }

    fn apply(&self, characters: Vec<Character>, index: &ReferenceIndex) -> Result<Vec<Character>> {
        Ok(characters
            .into_par_iter()
            .filter(|character| self.matches(character, index))
            .collect())
    }
}
