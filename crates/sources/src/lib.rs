//! # Sources Crate
//!
//! This crate loads everything the character browser shows from the remote
//! data source.
//!
//! ## Components
//!
//! ### Roster Source (Aggregation Pipeline)
//! The full character list:
//! - Page count derived from the first listing page
//! - Remaining pages fetched concurrently
//! - Every character enriched with homeworld and species display data
//!
//! ### Filter Index Builder
//! Option lists for the filter controls:
//! - Candidate homeworlds (planets 1..=5)
//! - Every film and every species
//!
//! ### FanOut
//! The bounded, cancellable task runner both of the above share.
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{FanOut, RosterSource, load_filter_index};
//! use swapi_client::SwapiClient;
//! use std::sync::Arc;
//!
//! let source = Arc::new(SwapiClient::new("https://swapi.dev/api", timeout)?);
//! let roster = RosterSource::new(source.clone()).with_max_concurrency(16);
//! let fan_out = roster.fan_out(cancel.clone());
//!
//! let (characters, index) = tokio::join!(
//!     roster.load(&fan_out),
//!     load_filter_index(source, &fan_out),
//! );
//! ```

// Public modules
pub mod collection;
pub mod enrich;
pub mod error;
pub mod fanout;
pub mod filter_index;
pub mod roster;

// Re-export commonly used types
pub use collection::{SharedSource, collect_pages};
pub use enrich::enrich_character;
pub use error::{Result, SourceError};
pub use fanout::{DEFAULT_MAX_CONCURRENCY, FanOut};
pub use filter_index::{HOMEWORLD_CANDIDATES, load_filter_index};
pub use roster::{RosterSource, load_all_characters};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use swapi_client::FakeSource;

    #[test]
    fn test_roster_source_creation() {
        let source: SharedSource = Arc::new(FakeSource::new());
        let roster = RosterSource::new(source).with_max_concurrency(4);
        let fan_out = roster.fan_out(tokio_util::sync::CancellationToken::new());
        assert_eq!(fan_out.max_concurrency(), 4);
    }

    #[test]
    fn test_homeworld_candidates() {
        let ids: Vec<_> = HOMEWORLD_CANDIDATES.collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }
}
