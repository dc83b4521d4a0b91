//! Error types for the catalog crate.
//!
//! Rust error handling concepts demonstrated:
//! - thiserror for defining custom error types
//! - Struct-like variants that carry context (what failed, and why)
//! - `#[source]` chaining so callers can walk down to the serde error

use thiserror::Error;

/// Errors that can occur while interpreting API payloads.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A JSON document did not have the expected shape
    #[error("Failed to decode {what}: {source}")]
    Decode {
        what: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
