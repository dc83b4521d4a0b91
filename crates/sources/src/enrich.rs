//! Per-character enrichment.
//!
//! Resolves a character's homeworld and species references into display
//! data. The homeworld lookup and every species lookup run concurrently.
//! Each lookup that fails is treated as absent:
//! - homeworld: all four fields fall back to "Unknown"
//! - species: the failed name is left out of `species_names`
//!
//! Enrichment itself never fails.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::debug;

use catalog::{Character, HomeworldDetails, Planet, Species};
use swapi_client::{DataSource, fetch};

use crate::collection::SharedSource;

/// Fill in `homeworld_details` and `species_names` for one character.
pub async fn enrich_character(source: SharedSource, mut character: Character) -> Character {
    let homeworld = character.homeworld.clone();
    let homeworld_lookup = {
        let source = Arc::clone(&source);
        async move {
            match homeworld {
                Some(url) => resolve_homeworld(source.as_ref(), &url).await,
                None => None,
            }
        }
    };
    let species_lookup = resolve_species_names(source, character.species.clone());

    let (details, species_names) = tokio::join!(homeworld_lookup, species_lookup);

    character.homeworld_details = Some(details.unwrap_or_else(HomeworldDetails::unknown));
    character.species_names = species_names;
    character
}

/// Look up a planet; any failure yields `None`.
pub async fn resolve_homeworld(source: &dyn DataSource, url: &str) -> Option<HomeworldDetails> {
    match fetch::<Planet>(source, url).await {
        Ok(planet) => Some(planet.into()),
        Err(err) => {
            debug!("Homeworld lookup failed for {}: {}", url, err);
            None
        }
    }
}

/// Look up a species name; any failure yields `None`.
pub async fn resolve_species(source: &dyn DataSource, url: &str) -> Option<String> {
    match fetch::<Species>(source, url).await {
        Ok(species) => Some(species.name),
        Err(err) => {
            debug!("Species lookup failed for {}: {}", url, err);
            None
        }
    }
}

/// Resolve every species URL concurrently, keeping reference order and
/// skipping the ones that failed.
async fn resolve_species_names(source: SharedSource, urls: Vec<String>) -> Vec<String> {
    if urls.is_empty() {
        return Vec::new();
    }

    let mut set = JoinSet::new();
    for (slot, url) in urls.into_iter().enumerate() {
        let source = Arc::clone(&source);
        set.spawn(async move { (slot, resolve_species(source.as_ref(), &url).await) });
    }

    let mut resolved: Vec<(usize, String)> = Vec::with_capacity(set.len());
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((slot, Some(name))) => resolved.push((slot, name)),
            Ok((_, None)) => {}
            Err(err) => debug!("Species lookup task failed: {}", err),
        }
    }

    resolved.sort_by_key(|(slot, _)| *slot);
    resolved.into_iter().map(|(_, name)| name).collect()
}
