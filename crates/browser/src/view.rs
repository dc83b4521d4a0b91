//! Presentation helpers for character cards and the detail view.

use std::fmt;

use catalog::{Character, HomeworldDetails};

pub use catalog::parser::format_date;

/// Card accent colors, in palette order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Pink,
    Indigo,
    Teal,
    Orange,
}

impl PaletteColor {
    pub const ALL: [PaletteColor; 9] = [
        PaletteColor::Red,
        PaletteColor::Blue,
        PaletteColor::Green,
        PaletteColor::Yellow,
        PaletteColor::Purple,
        PaletteColor::Pink,
        PaletteColor::Indigo,
        PaletteColor::Teal,
        PaletteColor::Orange,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PaletteColor::Red => "red",
            PaletteColor::Blue => "blue",
            PaletteColor::Green => "green",
            PaletteColor::Yellow => "yellow",
            PaletteColor::Purple => "purple",
            PaletteColor::Pink => "pink",
            PaletteColor::Indigo => "indigo",
            PaletteColor::Teal => "teal",
            PaletteColor::Orange => "orange",
        }
    }
}

impl fmt::Display for PaletteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accent color for a character, picked from its first species reference.
///
/// The pick is a 31-multiplier rolling hash over the UTF-16 code units of
/// the reference, with the running value wrapped to 32 bits before each
/// step, so the same reference always lands on the same color. Characters
/// without a species are blue.
pub fn species_color(species: &[String]) -> PaletteColor {
    let Some(first) = species.first() else {
        return PaletteColor::Blue;
    };

    let hash = first.encode_utf16().fold(0i64, |acc, unit| {
        let wrapped = acc as i32;
        i64::from(unit) + i64::from(wrapped.wrapping_shl(5)) - acc
    });

    let slot = hash.unsigned_abs() % PaletteColor::ALL.len() as u64;
    PaletteColor::ALL[slot as usize]
}

/// Placeholder portrait, seeded by the last path segment of the record URL
pub fn portrait_url(url: &str) -> Option<String> {
    url.split('/')
        .filter(|segment| !segment.is_empty())
        .next_back()
        .map(|seed| format!("https://picsum.photos/seed/sw-{seed}/300/400"))
}

pub fn film_count_label(count: usize) -> String {
    if count == 1 {
        "1 film".to_string()
    } else {
        format!("{count} films")
    }
}

/// One row of the character list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterCard {
    pub name: String,
    pub birth_year: String,
    pub homeworld: String,
    pub films: String,
    pub color: PaletteColor,
}

impl From<&Character> for CharacterCard {
    fn from(character: &Character) -> Self {
        Self {
            name: character.name.clone(),
            birth_year: character.birth_year.clone(),
            homeworld: character
                .homeworld_details
                .clone()
                .unwrap_or_default()
                .name,
            films: film_count_label(character.films.len()),
            color: species_color(&character.species),
        }
    }
}

/// Everything the detail view shows for one character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterDetail {
    pub name: String,
    pub height: String,
    pub mass: String,
    pub birth_year: String,
    pub film_count: usize,
    pub added: String,
    pub homeworld: HomeworldDetails,
    pub species: Vec<String>,
    pub portrait: Option<String>,
    pub color: PaletteColor,
}

impl From<&Character> for CharacterDetail {
    fn from(character: &Character) -> Self {
        Self {
            name: character.name.clone(),
            height: format!("{} cm", character.height),
            mass: format!("{} kg", character.mass),
            birth_year: character.birth_year.clone(),
            film_count: character.films.len(),
            added: format_date(&character.created),
            homeworld: character.homeworld_details.clone().unwrap_or_default(),
            species: character.species_names.clone(),
            portrait: portrait_url(&character.url),
            color: species_color(&character.species),
        }
    }
}
