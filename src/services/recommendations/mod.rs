//! Recommendation engine
//!
//! Every strategy follows the same pipeline: take the cached app list, enrich a
//! bounded prefix of it with per-app details, filter, rank with a stable
//! descending sort and truncate. `total_found` counts the filtered matches
//! inside the sample, not across the whole catalog.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::{
    cache::{CacheKey, TtlCache},
    config::SampleSizes,
    models::{AppDetail, AppListing},
    services::providers::CatalogProvider,
};

pub mod budget;
pub mod recent;
pub mod sales;
pub mod subgenre;
pub mod taste;

pub use subgenre::{SubGenre, ACTION_RPG};

pub struct Recommender {
    catalog: Arc<dyn CatalogProvider>,
    /// Process-wide app list cache; the lock is held across a refill so
    /// concurrent tools trigger at most one download
    app_list: Mutex<TtlCache<Arc<Vec<AppListing>>>>,
    samples: SampleSizes,
}

impl Recommender {
    pub fn new(catalog: Arc<dyn CatalogProvider>, cache_ttl: Duration, samples: SampleSizes) -> Self {
        Self {
            catalog,
            app_list: Mutex::new(TtlCache::new(cache_ttl)),
            samples,
        }
    }

    pub fn catalog(&self) -> &Arc<dyn CatalogProvider> {
        &self.catalog
    }

    /// Returns the full app list, downloading it when the cache is cold or stale
    ///
    /// An empty list is never cached, so a failed download is retried by the
    /// next caller instead of sticking for a whole TTL window.
    pub(crate) async fn listings(&self) -> Arc<Vec<AppListing>> {
        let mut cache = self.app_list.lock().await;

        if let Some(apps) = cache.get(&CacheKey::AppList) {
            if !apps.is_empty() {
                tracing::debug!(apps = apps.len(), "App list cache hit");
                return apps;
            }
        }

        tracing::debug!(provider = self.catalog.name(), "App list cache miss");
        let apps = Arc::new(self.catalog.fetch_all_listings().await);
        if !apps.is_empty() {
            cache.set(&CacheKey::AppList, apps.clone());
        }
        apps
    }

    /// Fetches details for the first `sample_size` listings, skipping apps
    /// without details
    pub(crate) async fn sample_details(
        &self,
        listings: &[AppListing],
        sample_size: usize,
    ) -> Vec<(u64, AppDetail)> {
        let sample = &listings[..sample_size.min(listings.len())];
        let mut details = Vec::with_capacity(sample.len());

        for listing in sample {
            if let Some(detail) = self.catalog.fetch_detail(listing.appid).await {
                details.push((listing.appid, detail));
            }
        }

        tracing::debug!(
            sampled = sample.len(),
            with_details = details.len(),
            "Sample enriched"
        );

        details
    }
}

/// Sorts by `key` descending, keeping the original order among equal keys
pub(crate) fn sort_descending_by<T, K: Ord>(items: &mut [T], key: impl Fn(&T) -> K) {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

/// `true` when no genre filter is set or the detail carries the genre
pub(crate) fn genre_filter_passes(detail: &AppDetail, genre: Option<&str>) -> bool {
    genre.map_or(true, |g| detail.has_genre(g))
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::services::providers::MockCatalogProvider;

    fn recommender(catalog: MockCatalogProvider) -> Recommender {
        Recommender::new(Arc::new(catalog), Duration::from_secs(300), SampleSizes::default())
    }

    #[tokio::test]
    async fn test_listings_are_cached() {
        let mut catalog = MockCatalogProvider::new();
        catalog
            .expect_fetch_all_listings()
            .times(1)
            .returning(|| vec![AppListing::new(1, "Alpha Quest")]);
        catalog.expect_name().return_const("mock");

        let recommender = recommender(catalog);
        assert_eq!(recommender.listings().await.len(), 1);
        assert_eq!(recommender.listings().await.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_listings_are_refetched() {
        let mut catalog = MockCatalogProvider::new();
        catalog
            .expect_fetch_all_listings()
            .times(2)
            .returning(Vec::new);
        catalog.expect_name().return_const("mock");

        let recommender = recommender(catalog);
        assert!(recommender.listings().await.is_empty());
        assert!(recommender.listings().await.is_empty());
    }

    #[tokio::test]
    async fn test_sample_details_respects_sample_size_and_skips_missing() {
        let listings = vec![
            AppListing::new(1, "One"),
            AppListing::new(2, "Two"),
            AppListing::new(3, "Three"),
        ];
        let catalog = mock_catalog(
            listings.clone(),
            vec![(1, detail("One", &[], 0)), (3, detail("Three", &[], 0))],
            None,
        );

        let recommender = recommender(catalog);
        let sampled = recommender.sample_details(&listings, 2).await;
        assert_eq!(sampled.len(), 1);
        assert_eq!(sampled[0].0, 1);

        let sampled = recommender.sample_details(&listings, 50).await;
        assert_eq!(sampled.iter().map(|(id, _)| *id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_sort_descending_is_stable() {
        let mut items = vec![("a", 1), ("b", 3), ("c", 1), ("d", 3)];
        sort_descending_by(&mut items, |(_, k)| *k);
        assert_eq!(items, vec![("b", 3), ("d", 3), ("a", 1), ("c", 1)]);
    }
}
