//! Filter on the resolved homeworld.

use crate::traits::Filter;
use anyhow::Result;
use catalog::{Character, FilterChoice, ReferenceIndex};
use rayon::prelude::*;

/// Keeps characters by homeworld name.
///
/// - `Absent` keeps characters whose homeworld never resolved ("Unknown")
/// - `Named` keeps characters whose resolved homeworld name equals the choice
pub struct HomeworldFilter {
    choice: FilterChoice,
}

impl HomeworldFilter {
    pub fn new(choice: FilterChoice) -> Self {
        Self { choice }
    }

    pub fn matches(&self, character: &Character) -> bool {
        match &self.choice {
            FilterChoice::Any => true,
            FilterChoice::Absent => character.homeworld_name().is_none(),
            FilterChoice::Named(name) => character
                .homeworld_details
                .as_ref()
                .is_some_and(|details| &details.name == name),
        }
    }
}

impl Filter for HomeworldFilter {
    fn name(&self) -> &str {
        "HomeworldFilter"
    }

    fn apply(&self, characters: Vec<Character>, _index: &ReferenceIndex) -> Result<Vec<Character>> {
        Ok(characters
            .into_par_iter()
            .filter(|character| self.matches(character))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::HomeworldDetails;

    fn from(name: &str, planet: &str) -> Character {
        Character::new(name, format!("https://swapi.dev/api/people/{name}/")).with_homeworld_details(
            HomeworldDetails {
                name: planet.to_string(),
                ..HomeworldDetails::unknown()
            },
        )
    }

    #[test]
    fn test_named_homeworld() {
        let characters = vec![from("Luke", "Tatooine"), from("Leia", "Alderaan")];

        let filter = HomeworldFilter::new(FilterChoice::Named("Alderaan".to_string()));
        let filtered = filter.apply(characters, &ReferenceIndex::new()).unwrap();

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Leia");
    }

    #[test]
    fn test_absent_matches_unknown_and_missing() {
        let unresolved = Character::new("Raw", "https://swapi.dev/api/people/98/");
        let characters = vec![
            from("Luke", "Tatooine"),
            from("Ghost", "Unknown"),
            unresolved,
        ];

        let filter = HomeworldFilter::new(FilterChoice::Absent);
        let filtered = filter.apply(characters, &ReferenceIndex::new()).unwrap();

        let names: Vec<_> = filtered.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Ghost", "Raw"]);
    }
}
