//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to the character list.

use anyhow::Result;
use catalog::{Character, ReferenceIndex};

/// Core trait for filtering characters.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be used in concurrent contexts
/// - Filters take ownership of the Vec<Character> and return a filtered Vec
/// - Surviving characters must keep their relative order
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of characters.
    ///
    /// # Arguments
    /// * `characters` - The characters to filter (takes ownership)
    /// * `index` - Reference index used to resolve film and species URLs
    fn apply(&self, characters: Vec<Character>, index: &ReferenceIndex) -> Result<Vec<Character>>;
}
