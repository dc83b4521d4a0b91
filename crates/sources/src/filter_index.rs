//! Filter index builder.
//!
//! Fetches the reference records behind the filter controls:
//! - candidate homeworlds (planet IDs 1..=5), failures dropped one by one
//! - every film and every species, through their collection endpoints
//!
//! The builder never fails. A collection that can't be fetched leaves its
//! option list empty and is logged.

use std::ops::RangeInclusive;
use std::sync::Arc;

use tracing::{info, instrument, warn};

use catalog::{Film, Planet, ReferenceIndex, ResourceId, Species};
use swapi_client::{Resource, fetch, resource_url};

use crate::collection::{SharedSource, collect_pages};
use crate::error::Result;
use crate::fanout::FanOut;

/// Planet IDs offered as homeworld options
pub const HOMEWORLD_CANDIDATES: RangeInclusive<ResourceId> = 1..=5;

/// Build the reference index behind the filter controls.
#[instrument(skip_all)]
pub async fn load_filter_index(source: SharedSource, fan_out: &FanOut) -> ReferenceIndex {
    let (homeworlds, films, species) = tokio::join!(
        load_homeworld_names(Arc::clone(&source), fan_out),
        collect_pages::<Film>(Arc::clone(&source), Resource::Films, fan_out),
        collect_pages::<Species>(Arc::clone(&source), Resource::Species, fan_out),
    );

    let homeworlds = or_empty("homeworld", homeworlds);
    let films = or_empty("film", films);
    let species = or_empty("species", species);

    let index = ReferenceIndex::from_parts(homeworlds, films, species);
    let (homeworld_count, film_count, species_count) = index.counts();
    info!(
        "Built filter index: {} homeworlds, {} films, {} species",
        homeworld_count, film_count, species_count
    );
    index
}

/// Fetch every candidate planet concurrently, keeping the ones that resolved.
async fn load_homeworld_names(source: SharedSource, fan_out: &FanOut) -> Result<Vec<String>> {
    let tasks: Vec<_> = HOMEWORLD_CANDIDATES
        .map(|id| {
            let source = Arc::clone(&source);
            async move {
                let url = resource_url(source.base_url(), Resource::Planets, id);
                match fetch::<Planet>(source.as_ref(), &url).await {
                    Ok(planet) => planet.name.filter(|name| !name.is_empty()),
                    Err(err) => {
                        warn!("Skipping homeworld candidate {}: {}", id, err);
                        None
                    }
                }
            }
        })
        .collect();

    Ok(fan_out.run(tasks).await?.into_iter().flatten().collect())
}

fn or_empty<T>(category: &str, loaded: Result<Vec<T>>) -> Vec<T> {
    loaded.unwrap_or_else(|err| {
        warn!("Error fetching {} filter options: {}", category, err);
        Vec::new()
    })
}
