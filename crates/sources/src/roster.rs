//! Roster Source - the character aggregation pipeline
//!
//! Loads the full character list once at startup.
//!
//! ## Algorithm
//! 1. Fetch people page 1 to learn the total count, derive the page count
//!    from the fixed API page size (10)
//! 2. Fetch every remaining page concurrently, flatten in page order
//! 3. Enrich every character (homeworld + species) concurrently, bounded by
//!    the fan-out's concurrency cap
//!
//! Failure in steps 1-2 aborts the load. Failures in step 3 degrade per
//! character and never surface.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, instrument};

use catalog::Character;
use swapi_client::Resource;

use crate::collection::{SharedSource, collect_pages};
use crate::enrich::enrich_character;
use crate::error::Result;
use crate::fanout::FanOut;

/// Load and enrich every character exposed by `source`.
#[instrument(skip_all, fields(max_concurrency = fan_out.max_concurrency()))]
pub async fn load_all_characters(source: SharedSource, fan_out: &FanOut) -> Result<Vec<Character>> {
    let start = Instant::now();

    let listed: Vec<Character> =
        collect_pages(Arc::clone(&source), Resource::People, fan_out).await?;
    info!(
        "Listed {} characters in {:.2?}",
        listed.len(),
        start.elapsed()
    );

    let tasks: Vec<_> = listed
        .into_iter()
        .map(|character| enrich_character(Arc::clone(&source), character))
        .collect();
    let enriched = fan_out.run(tasks).await?;

    info!(
        "Enriched {} characters in {:.2?}",
        enriched.len(),
        start.elapsed()
    );
    Ok(enriched)
}

/// Builder-style wrapper around `load_all_characters`.
///
/// Holds the source and the concurrency cap so a view can start (and
/// restart) loads without re-plumbing configuration.
#[derive(Clone)]
pub struct RosterSource {
    source: SharedSource,
    max_concurrency: usize,
}

impl RosterSource {
    pub fn new(source: SharedSource) -> Self {
        Self {
            source,
            max_concurrency: crate::fanout::DEFAULT_MAX_CONCURRENCY,
        }
    }

    /// Configure the fan-out cap (default: 16)
    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = max;
        self
    }

    pub fn source(&self) -> &SharedSource {
        &self.source
    }

    /// A fan-out bound to `cancel` with this roster's cap
    pub fn fan_out(&self, cancel: tokio_util::sync::CancellationToken) -> FanOut {
        FanOut::new(self.max_concurrency).with_cancellation(cancel)
    }

    /// Run the full aggregation under `fan_out`
    pub async fn load(&self, fan_out: &FanOut) -> Result<Vec<Character>> {
        load_all_characters(Arc::clone(&self.source), fan_out).await
    }
}
