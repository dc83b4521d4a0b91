//! Walking every page of a collection endpoint.
//!
//! The first page tells us the total record count; the remaining pages are
//! requested concurrently through the shared `FanOut` and stitched back
//! together in page order.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use catalog::{API_PAGE_SIZE, Listing};
use swapi_client::{DataSource, Resource, fetch_listing};

use crate::error::{Result, SourceError};
use crate::fanout::FanOut;

/// Shared handle to the remote data source
pub type SharedSource = Arc<dyn DataSource>;

/// Fetch every record of `resource`, preserving page order then in-page order.
///
/// Any page failure aborts the whole walk.
pub async fn collect_pages<T>(
    source: SharedSource,
    resource: Resource,
    fan_out: &FanOut,
) -> Result<Vec<T>>
where
    T: DeserializeOwned + Send + 'static,
{
    let first: Listing<T> = fan_out
        .guard(fetch_listing::<T>(source.as_ref(), resource, 1))
        .await?
        .map_err(|err| SourceError::listing(resource, 1, err))?;

    let page_count = first.page_count(API_PAGE_SIZE);
    debug!(
        "{:?}: {} records across {} pages",
        resource, first.count, page_count
    );

    let tasks: Vec<_> = (2..=page_count)
        .map(|page| {
            let source = Arc::clone(&source);
            async move {
                fetch_listing::<T>(source.as_ref(), resource, page)
                    .await
                    .map(|listing| listing.results)
                    .map_err(|err| SourceError::listing(resource, page, err))
            }
        })
        .collect();

    let mut records = first.results;
    for page in fan_out.run(tasks).await? {
        records.extend(page?);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Film;
    use serde_json::json;
    use swapi_client::fake::FAKE_BASE_URL;
    use swapi_client::{FakeSource, listing_url};

    fn film_page(count: u32, titles: &[(u32, &str)]) -> serde_json::Value {
        let results: Vec<_> = titles
            .iter()
            .map(|(id, title)| {
                json!({"title": title, "url": format!("https://swapi.dev/api/films/{id}/")})
            })
            .collect();
        json!({"count": count, "results": results})
    }

    #[tokio::test]
    async fn test_single_page() {
        let source: SharedSource = Arc::new(FakeSource::new().with_response(
            listing_url(FAKE_BASE_URL, Resource::Films, 1),
            film_page(2, &[(1, "A New Hope"), (2, "The Empire Strikes Back")]),
        ));

        let films: Vec<Film> = collect_pages(source, Resource::Films, &FanOut::default())
            .await
            .unwrap();
        assert_eq!(films.len(), 2);
    }

    #[tokio::test]
    async fn test_pages_concatenate_in_order() {
        let titles: Vec<(u32, String)> = (1..=12).map(|i| (i, format!("Film {i}"))).collect();
        let page_one: Vec<(u32, &str)> = titles[..10].iter().map(|(i, t)| (*i, t.as_str())).collect();
        let page_two: Vec<(u32, &str)> = titles[10..].iter().map(|(i, t)| (*i, t.as_str())).collect();

        let fake = FakeSource::new()
            .with_response(
                listing_url(FAKE_BASE_URL, Resource::Films, 1),
                film_page(12, &page_one),
            )
            .with_response(
                listing_url(FAKE_BASE_URL, Resource::Films, 2),
                film_page(12, &page_two),
            );
        let source: SharedSource = Arc::new(fake);

        let films: Vec<Film> = collect_pages(source, Resource::Films, &FanOut::default())
            .await
            .unwrap();
        let names: Vec<_> = films.iter().map(|f| f.title.clone()).collect();
        let expected: Vec<_> = (1..=12).map(|i| format!("Film {i}")).collect();
        assert_eq!(names, expected);
    }

    #[tokio::test]
    async fn test_missing_page_fails() {
        let source: SharedSource = Arc::new(FakeSource::new().with_response(
            listing_url(FAKE_BASE_URL, Resource::Films, 1),
            film_page(15, &[(1, "A New Hope")]),
        ));

        let result: Result<Vec<Film>> =
            collect_pages(source, Resource::Films, &FanOut::default()).await;
        match result {
            Err(SourceError::Listing { page, .. }) => assert_eq!(page, 2),
            other => panic!("expected listing error, got {other:?}"),
        }
    }
}
