//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern, and
//! `apply_filters`, the entry point the browser recomputes its view with.

use crate::filters::{FilmFilter, HomeworldFilter, NameSearchFilter, SpeciesFilter};
use crate::traits::Filter;
use anyhow::Result;
use catalog::{Character, FilterSelection, ReferenceIndex};
use tracing;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(NameSearchFilter::new("sky"))
///     .add_filter(HomeworldFilter::new(FilterChoice::Named("Tatooine".into())));
///
/// let filtered = pipeline.apply(characters, &index)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Build the pipeline for a search text and filter selection.
    ///
    /// Filters are added in a fixed order (search, homeworld, film, species)
    /// and only when the corresponding control is active.
    pub fn for_query(search_text: &str, selection: &FilterSelection) -> Self {
        let mut pipeline = Self::new();
        if NameSearchFilter::is_active(search_text) {
            pipeline = pipeline.add_filter(NameSearchFilter::new(search_text));
        }
        if selection.homeworld.is_active() {
            pipeline = pipeline.add_filter(HomeworldFilter::new(selection.homeworld.clone()));
        }
        if selection.film.is_active() {
            pipeline = pipeline.add_filter(FilmFilter::new(selection.film.clone()));
        }
        if selection.species.is_active() {
            pipeline = pipeline.add_filter(SpeciesFilter::new(selection.species.clone()));
        }
        pipeline
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Number of filters in the pipeline
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Run every filter over the characters, in insertion order.
    ///
    /// Each filter sees only what the previous one kept, so the result is
    /// the conjunction of all of them. Relative order survives every stage.
    pub fn apply(&self, characters: Vec<Character>, index: &ReferenceIndex) -> Result<Vec<Character>> {
        let mut current = characters;
        for filter in &self.filters {
            let before = current.len();
            current = filter.apply(current, index)?;
            tracing::debug!(
                "{} kept {} of {} characters",
                filter.name(),
                current.len(),
                before
            );
        }
        Ok(current)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Filter the full character list for the current search text and selection.
///
/// All conditions are conjunctive and the input order is preserved. With
/// blank search text and an empty selection the list comes back unchanged.
pub fn apply_filters(
    all: &[Character],
    search_text: &str,
    selection: &FilterSelection,
    index: &ReferenceIndex,
) -> Result<Vec<Character>> {
    FilterPipeline::for_query(search_text, selection).apply(all.to_vec(), index)
}
