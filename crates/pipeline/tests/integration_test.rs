//! Integration tests for the pipeline.
//!
//! These tests verify that filtering and pagination work together
//! over a realistic enriched roster.

use catalog::{Character, Film, FilterChoice, FilterSelection, HomeworldDetails, ReferenceIndex, Species};
use pipeline::{apply_filters, paginate, FilterPipeline};

fn planet(name: &str) -> HomeworldDetails {
    HomeworldDetails {
        name: name.to_string(),
        ..HomeworldDetails::unknown()
    }
}

fn person(id: u32, name: &str) -> Character {
    Character::new(name, format!("https://swapi.dev/api/people/{id}/"))
}

fn film_url(id: u32) -> String {
    format!("https://swapi.dev/api/films/{id}/")
}

fn species_url(id: u32) -> String {
    format!("https://swapi.dev/api/species/{id}/")
}

fn create_test_setup() -> (Vec<Character>, ReferenceIndex) {
    let index = ReferenceIndex::from_parts(
        vec!["Tatooine".to_string(), "Alderaan".to_string()],
        vec![
            Film {
                title: "A New Hope".to_string(),
                url: film_url(1),
            },
            Film {
                title: "The Empire Strikes Back".to_string(),
                url: film_url(2),
            },
        ],
        vec![
            Species {
                name: "Human".to_string(),
                url: species_url(1),
            },
            Species {
                name: "Droid".to_string(),
                url: species_url(2),
            },
        ],
    );

    let characters = vec![
        person(1, "Luke Skywalker")
            .with_films([film_url(1), film_url(2)])
            .with_homeworld_details(planet("Tatooine")),
        person(2, "C-3PO")
            .with_films([film_url(1)])
            .with_species([species_url(2)])
            .with_species_names(["Droid"])
            .with_homeworld_details(planet("Tatooine")),
        person(5, "Leia Organa")
            .with_films([film_url(1)])
            .with_homeworld_details(planet("Alderaan")),
        person(13, "Chewbacca")
            .with_films([film_url(2)])
            .with_species([species_url(3)])
            .with_homeworld_details(HomeworldDetails::unknown()),
        person(99, "Lost Extra"),
    ];

    (characters, index)
}

fn names(characters: &[Character]) -> Vec<&str> {
    characters.iter().map(|c| c.name.as_str()).collect()
}

#[test]
fn test_empty_query_returns_everything_in_order() {
    let (characters, index) = create_test_setup();

    let filtered = apply_filters(&characters, "", &FilterSelection::new(), &index).unwrap();
    assert_eq!(filtered, characters);
}

#[test]
fn test_search_is_case_insensitive() {
    let (characters, index) = create_test_setup();

    let filtered = apply_filters(&characters, "luke", &FilterSelection::new(), &index).unwrap();
    assert_eq!(names(&filtered), vec!["Luke Skywalker"]);

    let filtered = apply_filters(&characters, "SKY", &FilterSelection::new(), &index).unwrap();
    assert_eq!(names(&filtered), vec!["Luke Skywalker"]);
}

#[test]
fn test_homeworld_named_and_absent() {
    let (characters, index) = create_test_setup();

    let tatooine = FilterSelection::new().with_homeworld(FilterChoice::parse("Tatooine"));
    let filtered = apply_filters(&characters, "", &tatooine, &index).unwrap();
    assert_eq!(names(&filtered), vec!["Luke Skywalker", "C-3PO"]);

    let none = FilterSelection::new().with_homeworld(FilterChoice::parse("none"));
    let filtered = apply_filters(&characters, "", &none, &index).unwrap();
    assert_eq!(names(&filtered), vec!["Chewbacca", "Lost Extra"]);
}

#[test]
fn test_homeworld_absent_excludes_resolved() {
    let index = ReferenceIndex::new();
    let characters = vec![
        person(1, "A").with_homeworld_details(planet("Tatooine")),
        person(2, "B").with_homeworld_details(HomeworldDetails::unknown()),
    ];

    let none = FilterSelection::new().with_homeworld(FilterChoice::Absent);
    let filtered = apply_filters(&characters, "", &none, &index).unwrap();
    assert_eq!(names(&filtered), vec!["B"]);
}

#[test]
fn test_combined_filters_are_conjunctive() {
    let (characters, index) = create_test_setup();

    let selection = FilterSelection::new()
        .with_homeworld(FilterChoice::Named("Tatooine".to_string()))
        .with_film(FilterChoice::Named("The Empire Strikes Back".to_string()));
    let filtered = apply_filters(&characters, "", &selection, &index).unwrap();
    assert_eq!(names(&filtered), vec!["Luke Skywalker"]);

    let filtered = apply_filters(&characters, "3po", &selection, &index).unwrap();
    assert!(filtered.is_empty());
}

#[test]
fn test_species_filter_defaults_to_human() {
    let (characters, index) = create_test_setup();

    let human = FilterSelection::new().with_species(FilterChoice::Named("Human".to_string()));
    let filtered = apply_filters(&characters, "", &human, &index).unwrap();
    assert_eq!(names(&filtered), vec!["Luke Skywalker", "Leia Organa", "Lost Extra"]);

    let droid = FilterSelection::new().with_species(FilterChoice::Named("droid".to_string()));
    let filtered = apply_filters(&characters, "", &droid, &index).unwrap();
    assert_eq!(names(&filtered), vec!["C-3PO"]);
}

#[test]
fn test_filter_then_paginate() {
    let characters: Vec<Character> = (1..=25).map(|id| person(id, &format!("Clone {id}"))).collect();
    let index = ReferenceIndex::new();

    let filtered = apply_filters(&characters, "clone", &FilterSelection::new(), &index).unwrap();
    assert_eq!(filtered.len(), 25);

    let page = paginate(&filtered, 3, 10);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.visible.len(), 5);
    assert_eq!(page.visible[0].name, "Clone 21");

    assert!(paginate(&filtered, 4, 10).visible.is_empty());
}

#[test]
fn test_pipeline_matches_apply_filters() {
    let (characters, index) = create_test_setup();
    let selection = FilterSelection::new().with_film(FilterChoice::Named("A New Hope".to_string()));

    let via_pipeline = FilterPipeline::for_query("organa", &selection)
        .apply(characters.clone(), &index)
        .unwrap();
    let via_helper = apply_filters(&characters, "organa", &selection, &index).unwrap();

    assert_eq!(via_pipeline, via_helper);
    assert_eq!(names(&via_helper), vec!["Leia Organa"]);
}
