//! Benchmarks for filtering and pagination
//!
//! Run with: cargo bench --package pipeline
//!
//! Uses a synthetic roster several times the size of the live one so the
//! parallel filters have something to chew on.

use catalog::{Character, Film, FilterChoice, FilterSelection, HomeworldDetails, ReferenceIndex, Species};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pipeline::{apply_filters, paginate};

const ROSTER_SIZE: u32 = 5_000;
const PLANETS: [&str; 5] = ["Tatooine", "Alderaan", "Yavin IV", "Hoth", "Dagobah"];

fn load_test_data() -> (Vec<Character>, ReferenceIndex) {
    let films: Vec<Film> = (1..=6)
        .map(|id| Film {
            title: format!("Episode {id}"),
            url: format!("https://swapi.dev/api/films/{id}/"),
        })
        .collect();
    let species: Vec<Species> = (1..=20)
        .map(|id| Species {
            name: format!("Species {id}"),
            url: format!("https://swapi.dev/api/species/{id}/"),
        })
        .collect();
    let index = ReferenceIndex::from_parts(
        PLANETS.iter().map(|p| p.to_string()).collect(),
        films,
        species,
    );

    let characters = (1..=ROSTER_SIZE)
        .map(|id| {
            let planet = PLANETS[(id as usize) % PLANETS.len()];
            Character::new(format!("Character {id}"), format!("https://swapi.dev/api/people/{id}/"))
                .with_films((1..=(id % 6) + 1).map(|f| format!("https://swapi.dev/api/films/{f}/")))
                .with_species([format!("https://swapi.dev/api/species/{}/", id % 20 + 1)])
                .with_homeworld_details(HomeworldDetails {
                    name: planet.to_string(),
                    ..HomeworldDetails::unknown()
                })
        })
        .collect();

    (characters, index)
}

fn bench_search_only(c: &mut Criterion) {
    let (characters, index) = load_test_data();
    let selection = FilterSelection::new();

    c.bench_function("search_only", |b| {
        b.iter(|| {
            let filtered = apply_filters(&characters, black_box("ter 12"), &selection, &index).unwrap();
            black_box(filtered)
        })
    });
}

fn bench_all_filters(c: &mut Criterion) {
    let (characters, index) = load_test_data();
    let selection = FilterSelection::new()
        .with_homeworld(FilterChoice::Named("Hoth".to_string()))
        .with_film(FilterChoice::Named("Episode 4".to_string()))
        .with_species(FilterChoice::Named("species 7".to_string()));

    c.bench_function("all_filters", |b| {
        b.iter(|| {
            let filtered = apply_filters(&characters, black_box("character"), &selection, &index).unwrap();
            black_box(filtered)
        })
    });
}

fn bench_paginate(c: &mut Criterion) {
    let (characters, _) = load_test_data();

    c.bench_function("paginate", |b| {
        b.iter(|| {
            let page = paginate(&characters, black_box(250), black_box(10));
            black_box(page.visible.len())
        })
    });
}

criterion_group!(benches, bench_search_only, bench_all_filters, bench_paginate);
criterion_main!(benches);
