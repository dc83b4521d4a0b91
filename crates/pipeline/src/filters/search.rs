//! Free-text search on character names.
//!
//! Case-insensitive substring match. Blank search text (after trimming)
//! means the filter is not applied at all.

use crate::traits::Filter;
use anyhow::Result;
use catalog::{Character, ReferenceIndex};
use rayon::prelude::*;

/// Keeps characters whose name contains the search text.
pub struct NameSearchFilter {
    needle: String,
}

impl NameSearchFilter {
    pub fn new(search_text: &str) -> Self {
        Self {
            needle: search_text.to_lowercase(),
        }
    }

    /// Whether `search_text` should produce a filter at all
    pub fn is_active(search_text: &str) -> bool {
        !search_text.trim().is_empty()
    }

    pub fn matches(&self, character: &Character) -> bool {
        character.name.to_lowercase().contains(&self.needle)
    }
}

impl Filter for NameSearchFilter {
    fn name(&self) -> &str {
        "NameSearchFilter"
    }

    fn apply(&self, characters: Vec<Character>, _index: &ReferenceIndex) -> Result<Vec<Character>> {
        Ok(characters
            .into_par_iter()
            .filter(|character| self.matches(character))
            .collect())
    }
}
