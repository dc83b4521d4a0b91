//! Error types for the sources crate.

use swapi_client::{ClientError, Resource};
use thiserror::Error;

/// Errors that abort a load.
///
/// Detail lookups (homeworld, species, filter candidates) never produce one of
/// these; they degrade to defaults instead.
#[derive(Error, Debug)]
pub enum SourceError {
    /// A collection page could not be fetched or decoded
    #[error("Failed to fetch {resource:?} page {page}: {source}")]
    Listing {
        resource: Resource,
        page: u32,
        #[source]
        source: ClientError,
    },

    /// The cancellation token fired before the load finished
    #[error("Load was cancelled")]
    Cancelled,

    /// A spawned fetch task panicked
    #[error("Fetch task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl SourceError {
    pub fn listing(resource: Resource, page: u32, source: ClientError) -> Self {
        SourceError::Listing {
            resource,
            page,
            source,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, SourceError::Cancelled)
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, SourceError>;
