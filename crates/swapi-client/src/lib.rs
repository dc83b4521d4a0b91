//! Client for the remote Star Wars REST API.
//!
//! This crate provides the seam between the character pipeline and the
//! network. It handles:
//! - The `DataSource` trait every pipeline stage fetches through
//! - `SwapiClient`, the HTTP implementation built on reqwest
//! - `FakeSource`, an in-memory implementation for tests and demos
//! - URL building for collection pages and single resources
//!
//! Only GET requests are issued. No custom headers, no auth, no retries.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};

use catalog::{CatalogError, Listing, ResourceId, parser};

pub mod fake;

pub use fake::FakeSource;

/// Public API used when no base URL is configured
pub const DEFAULT_BASE_URL: &str = "https://swapi.dev/api";

/// Errors that can occur when talking to the data source
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error(transparent)]
    Decode(#[from] CatalogError),
}

/// The collections exposed by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    People,
    Planets,
    Species,
    Films,
}

impl Resource {
    /// Path segment under the base URL
    pub fn path(self) -> &'static str {
        match self {
            Resource::People => "people",
            Resource::Planets => "planets",
            Resource::Species => "species",
            Resource::Films => "films",
        }
    }
}

/// URL of one page of a collection: `{base}/people/?page=2`
pub fn listing_url(base_url: &str, resource: Resource, page: u32) -> String {
    format!(
        "{}/{}/?page={}",
        base_url.trim_end_matches('/'),
        resource.path(),
        page
    )
}

/// URL of a single resource: `{base}/planets/1/`
pub fn resource_url(base_url: &str, resource: Resource, id: ResourceId) -> String {
    format!(
        "{}/{}/{}/",
        base_url.trim_end_matches('/'),
        resource.path(),
        id
    )
}

/// Anything that can answer GET requests with JSON documents.
///
/// ## Design Note
/// - `Send + Sync` so one source can be shared by every task of a fan-out
/// - Returns raw JSON; typing happens in `fetch` / `fetch_listing`
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Base URL that collection and resource URLs are built from
    fn base_url(&self) -> &str;

    /// GET `url` and return the decoded JSON body
    async fn get_json(&self, url: &str) -> Result<serde_json::Value, ClientError>;
}

/// GET `url` and decode the body into `T`
pub async fn fetch<T: DeserializeOwned>(
    source: &dyn DataSource,
    url: &str,
) -> Result<T, ClientError> {
    let value = source.get_json(url).await?;
    Ok(parser::decode(url, value)?)
}

/// GET one page of a collection
pub async fn fetch_listing<T: DeserializeOwned>(
    source: &dyn DataSource,
    resource: Resource,
    page: u32,
) -> Result<Listing<T>, ClientError> {
    let url = listing_url(source.base_url(), resource, page);
    fetch(source, &url).await
}

/// HTTP implementation of `DataSource`.
#[derive(Clone)]
pub struct SwapiClient {
    client: reqwest::Client,
    base_url: String,
}

impl SwapiClient {
    /// Build a client for `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Build)?;

        debug!("Created API client for {}", base_url);
        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl DataSource for SwapiClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    #[instrument(name = "swapi_get", skip(self))]
    async fn get_json(&self, url: &str) -> Result<serde_json::Value, ClientError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ClientError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            debug!("GET {} -> {}", url, status);
            return Err(ClientError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|source| ClientError::Request {
                url: url.to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Film;
    use serde_json::json;

    #[test]
    fn test_listing_url() {
        assert_eq!(
            listing_url("https://swapi.dev/api", Resource::People, 3),
            "https://swapi.dev/api/people/?page=3"
        );
        assert_eq!(
            listing_url("https://swapi.dev/api/", Resource::Films, 1),
            "https://swapi.dev/api/films/?page=1"
        );
    }

    #[test]
    fn test_resource_url_round_trips_identifier() {
        let url = resource_url(DEFAULT_BASE_URL, Resource::Planets, 5);
        assert_eq!(url, "https://swapi.dev/api/planets/5/");
        assert_eq!(parser::resource_id(&url), Some(5));
    }

    #[test]
    fn test_client_strips_trailing_slash() {
        let client = SwapiClient::new("https://swapi.dev/api/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "https://swapi.dev/api");
    }

    #[tokio::test]
    async fn test_fetch_listing_through_fake() {
        let source = FakeSource::new().with_response(
            listing_url(fake::FAKE_BASE_URL, Resource::Films, 1),
            json!({
                "count": 1,
                "results": [{"title": "A New Hope", "url": "https://swapi.dev/api/films/1/"}]
            }),
        );

        let listing: Listing<Film> = fetch_listing(&source, Resource::Films, 1).await.unwrap();
        assert_eq!(listing.results.len(), 1);
        assert_eq!(listing.results[0].title, "A New Hope");
    }

    #[tokio::test]
    async fn test_fetch_decode_error() {
        let source = FakeSource::new().with_response("http://fake/x", json!({"unexpected": true}));

        let result: Result<Film, _> = fetch(&source, "http://fake/x").await;
        assert!(matches!(result, Err(ClientError::Decode(_))));
    }

    #[tokio::test]
    async fn test_missing_url_is_not_found() {
        let source = FakeSource::new();
        let err = source.get_json("http://fake/nowhere").await.unwrap_err();
        assert!(matches!(err, ClientError::Status { status: 404, .. }));
    }
}
