//! Filter on species.
//!
//! ## Algorithm
//! For a named species, per character:
//! 1. If enrichment resolved any species names, match case-insensitively
//!    against them
//! 2. Otherwise, if the character has species references, resolve the first
//!    one through the reference index and compare
//! 3. Otherwise (no species reference at all) the character counts as human

use crate::traits::Filter;
use anyhow::Result;
use catalog::{Character, FilterChoice, ReferenceIndex};
use rayon::prelude::*;

/// Species assumed for characters the API lists without one
pub const DEFAULT_SPECIES: &str = "human";

/// Keeps characters by species.
pub struct SpeciesFilter {
    choice: FilterChoice,
}

impl SpeciesFilter {
    pub fn new(choice: FilterChoice) -> Self {
        Self { choice }
    }

    pub fn matches(&self, character: &Character, index: &ReferenceIndex) -> bool {
        let wanted = match &self.choice {
            FilterChoice::Any => return true,
            FilterChoice::Absent => return character.species.is_empty(),
            FilterChoice::Named(name) => name,
        };

        if !character.species_names.is_empty() {
            return character
                .species_names
                .iter()
                .any(|name| !name.is_empty() && same_name(name, wanted));
        }

        if let Some(first) = character.species.first() {
            return index
                .species_name(first)
                .is_some_and(|name| same_name(name, wanted));
        }

        same_name(wanted, DEFAULT_SPECIES)
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

impl Filter for SpeciesFilter {
    fn name(&self) -> &str {
        "SpeciesFilter"
    }

    fn apply(&self, characters: Vec<Character>, index: &ReferenceIndex) -> Result<Vec<Character>> {
        Ok(characters
            .into_par_iter()
            .filter(|character| self.matches(character, index))
            .collect())
    }
}
