//! Reference index used to populate filter controls.
//!
//! The index holds three deduplicated name sets (homeworlds, films, species)
//! plus identifier-keyed lookups for films and species. Lookups go through the
//! identifier parsed from each reference record's own URL, never through the
//! record's position in a listing, so sparse or reordered collections still
//! resolve correctly.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::parser::resource_id;
use crate::types::{Film, ResourceId, Species};

/// Insertion-ordered set of display names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameSet(Vec<String>);

impl NameSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a name unless it is already present. Returns true if inserted.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.0.push(name);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|existing| existing == name)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for NameSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = NameSet::new();
        for name in iter {
            set.insert(name);
        }
        set
    }
}

/// Cached option lists for the filter controls.
///
/// Built once after startup and not kept in sync with the character list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceIndex {
    pub homeworlds: NameSet,
    pub films: NameSet,
    pub species: NameSet,
    film_titles: BTreeMap<ResourceId, String>,
    species_names: BTreeMap<ResourceId, String>,
}

impl ReferenceIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from already fetched reference records
    pub fn from_parts(
        homeworlds: impl IntoIterator<Item = String>,
        films: impl IntoIterator<Item = Film>,
        species: impl IntoIterator<Item = Species>,
    ) -> Self {
        let mut index = Self::new();
        for name in homeworlds {
            index.insert_homeworld(name);
        }
        for film in films {
            index.insert_film(film);
        }
        for record in species {
            index.insert_species(record);
        }
        index
    }

    pub fn insert_homeworld(&mut self, name: impl Into<String>) {
        self.homeworlds.insert(name);
    }

    /// Add a film title. Films whose URL carries no identifier still show up
    /// as an option but can't be resolved from a character's film list.
    pub fn insert_film(&mut self, film: Film) {
        if let Some(id) = resource_id(&film.url) {
            self.film_titles.insert(id, film.title.clone());
        }
        self.films.insert(film.title);
    }

    pub fn insert_species(&mut self, species: Species) {
        if let Some(id) = resource_id(&species.url) {
            self.species_names.insert(id, species.name.clone());
        }
        self.species.insert(species.name);
    }

    /// Resolve a film reference URL to its title
    pub fn film_title(&self, film_url: &str) -> Option<&str> {
        let id = resource_id(film_url)?;
        self.film_titles.get(&id).map(String::as_str)
    }

    /// Resolve a species reference URL to its name
    pub fn species_name(&self, species_url: &str) -> Option<&str> {
        let id = resource_id(species_url)?;
        self.species_names.get(&id).map(String::as_str)
    }

    /// Get counts of (homeworlds, films, species)
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.homeworlds.len(), self.films.len(), self.species.len())
    }

    pub fn is_empty(&self) -> bool {
        self.homeworlds.is_empty() && self.films.is_empty() && self.species.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn film(id: u32, title: &str) -> Film {
        Film {
            title: title.to_string(),
            url: format!("https://swapi.dev/api/films/{id}/"),
        }
    }

    #[test]
    fn test_name_set_deduplicates_in_order() {
        let set: NameSet = ["Tatooine", "Alderaan", "Tatooine", "Hoth"]
            .into_iter()
            .collect();
        assert_eq!(set.as_slice(), &["Tatooine", "Alderaan", "Hoth"]);
    }

    #[test]
    fn test_film_lookup_by_identifier() {
        let index = ReferenceIndex::from_parts(
            Vec::new(),
            vec![film(4, "The Phantom Menace"), film(1, "A New Hope")],
            Vec::new(),
        );

        // Listing order differs from id order; lookups must not care
        assert_eq!(
            index.film_title("https://swapi.dev/api/films/1/"),
            Some("A New Hope")
        );
        assert_eq!(
            index.film_title("https://swapi.dev/api/films/4/"),
            Some("The Phantom Menace")
        );
        assert_eq!(index.film_title("https://swapi.dev/api/films/2/"), None);
        assert_eq!(
            index.films.as_slice(),
            &["The Phantom Menace", "A New Hope"]
        );
    }

    #[test]
    fn test_sparse_species_ids() {
        let index = ReferenceIndex::from_parts(
            Vec::new(),
            Vec::new(),
            vec![
                Species {
                    name: "Human".to_string(),
                    url: "https://swapi.dev/api/species/1/".to_string(),
                },
                Species {
                    name: "Wookie".to_string(),
                    url: "https://swapi.dev/api/species/3/".to_string(),
                },
            ],
        );

        assert_eq!(
            index.species_name("https://swapi.dev/api/species/3/"),
            Some("Wookie")
        );
        assert_eq!(index.species_name("https://swapi.dev/api/species/2/"), None);
    }

    #[test]
    fn test_unidentified_film_is_option_only() {
        let mut index = ReferenceIndex::new();
        index.insert_film(Film {
            title: "Holiday Special".to_string(),
            url: String::new(),
        });

        assert!(index.films.contains("Holiday Special"));
        assert_eq!(index.counts(), (0, 1, 0));
    }
}
