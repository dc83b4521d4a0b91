//! Parsing helpers for API payloads.
//!
//! Everything the API hands back is either a JSON document or a URL string.
//! This module turns both into typed values:
//! - `decode` turns a raw JSON value into a typed payload
//! - `resource_id` pulls the trailing identifier out of a resource URL
//! - `format_date` renders creation timestamps for display

use chrono::DateTime;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::error::{CatalogError, Result};
use crate::types::ResourceId;

/// Decode a JSON document into `T`, naming `what` in the error.
pub fn decode<T: DeserializeOwned>(what: &str, value: serde_json::Value) -> Result<T> {
    serde_json::from_value(value).map_err(|source| CatalogError::Decode {
        what: what.to_string(),
        source,
    })
}

/// Extract the identifier from a resource URL.
///
/// `https://swapi.dev/api/films/4/` yields `Some(4)`. The last non-empty path
/// segment has to be a number, anything else yields `None`.
pub fn resource_id(url: &str) -> Option<ResourceId> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .next_back()?
        .parse()
        .ok()
}

/// Render an RFC 3339 timestamp as `dd-mm-yyyy`.
///
/// Input that isn't a valid timestamp is returned as-is.
pub fn format_date(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(timestamp) => timestamp.date_naive().format("%d-%m-%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Serde helper: treat `null` and `""` the same way, as a missing value.
pub fn empty_string_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Film, Listing};
    use serde_json::json;

    #[test]
    fn test_resource_id() {
        assert_eq!(resource_id("https://swapi.dev/api/people/1/"), Some(1));
        assert_eq!(resource_id("https://swapi.dev/api/films/42"), Some(42));
        assert_eq!(resource_id("https://swapi.dev/api/species/3/?format=json"), Some(3));
        assert_eq!(resource_id("https://swapi.dev/api/people/"), None);
        assert_eq!(resource_id("Human"), None);
        assert_eq!(resource_id(""), None);
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2014-12-09T13:50:51.644000Z"), "09-12-2014");
        assert_eq!(format_date("2014-12-20T21:17:56.891000Z"), "20-12-2014");
        assert_eq!(format_date("not a date"), "not a date");
    }

    #[test]
    fn test_decode_listing() {
        let value = json!({
            "count": 6,
            "next": null,
            "previous": null,
            "results": [
                {"title": "A New Hope", "url": "https://swapi.dev/api/films/1/"}
            ]
        });

        let listing: Listing<Film> = decode("film listing", value).unwrap();
        assert_eq!(listing.count, 6);
        assert_eq!(listing.results[0].title, "A New Hope");
    }

    #[test]
    fn test_decode_reports_context() {
        let err = decode::<Listing<Film>>("film listing", json!({"results": 3})).unwrap_err();
        assert!(err.to_string().starts_with("Failed to decode film listing"));
    }
}
