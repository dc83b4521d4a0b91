//! Filtering and pagination of the aggregated character roster.
//!
//! This crate provides:
//! - Filter trait and implementations for search and dropdown filters
//! - FilterPipeline for composing filters
//! - Pagination helpers for slicing the filtered list into pages
//!
//! ## Architecture
//! The browser recomputes its view in two stages:
//! 1. Filters narrow the full roster (name search, homeworld, film, species)
//! 2. The filtered list is sliced into the current page
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{apply_filters, paginate};
//!
//! let filtered = apply_filters(&characters, "sky", &selection, &index)?;
//! let page = paginate(&filtered, 1, 10);
//! ```

pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod pagination;

// Re-export main types
pub use traits::Filter;
pub use filter_pipeline::{apply_filters, FilterPipeline};
pub use pagination::{paginate, total_pages, PageSlice, PageWindow, Pager, DEFAULT_PAGE_SIZE};
