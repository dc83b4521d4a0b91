//! Filter implementations for the character pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod film;
pub mod homeworld;
pub mod search;
pub mod species;

// Re-export for convenience
pub use film::FilmFilter;
pub use homeworld::HomeworldFilter;
pub use search::NameSearchFilter;
pub use species::{DEFAULT_SPECIES, SpeciesFilter};
