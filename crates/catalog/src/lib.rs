//! # Catalog Crate
//!
//! Domain model for the character browser.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Character, HomeworldDetails, wire payloads, FilterSelection)
//! - **parser**: Decode JSON payloads, parse resource identifiers, format dates
//! - **index**: ReferenceIndex backing the filter option lists
//! - **error**: Error types for payload handling
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{Character, ReferenceIndex, parser};
//!
//! let luke: Character = parser::decode("character", value)?;
//! println!("{} (#{:?}) added {}", luke.name, luke.id(), parser::format_date(&luke.created));
//! ```

// Public modules
pub mod error;
pub mod index;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use index::{NameSet, ReferenceIndex};
pub use types::{
    // Type aliases & constants
    ResourceId,
    ABSENT_SENTINEL,
    API_PAGE_SIZE,
    UNKNOWN,
    // Core types
    Character,
    HomeworldDetails,
    FilterChoice,
    FilterSelection,
    // Wire payloads
    Film,
    Listing,
    Planet,
    Species,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_index_creation() {
        let index = ReferenceIndex::new();
        let (homeworlds, films, species) = index.counts();

        assert_eq!(homeworlds, 0);
        assert_eq!(films, 0);
        assert_eq!(species, 0);
        assert!(index.is_empty());
    }

    #[test]
    fn test_character_builder() {
        let character = Character::new("Chewbacca", "https://swapi.dev/api/people/13/")
            .with_homeworld("https://swapi.dev/api/planets/14/")
            .with_films(["https://swapi.dev/api/films/1/"])
            .with_species(["https://swapi.dev/api/species/3/"]);

        assert_eq!(character.id(), Some(13));
        assert_eq!(character.films.len(), 1);
        assert_eq!(character.species.len(), 1);
        assert!(character.homeworld_details.is_none());
    }
}
