/// Game catalog provider abstraction
///
/// The recommendation engine only talks to the catalog through this trait, so
/// the Steam client can be swapped for a mock in tests. Implementations never
/// surface errors: every failure is folded into an empty or absent result.
use crate::models::{AppDetail, AppListing, FeaturedPayload};

pub mod steam;

pub use steam::SteamCatalogClient;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Fetch the full list of apps, exactly as upstream returns it
    ///
    /// Returns an empty list when the request fails.
    async fn fetch_all_listings(&self) -> Vec<AppListing>;

    /// Fetch the store details of one app
    ///
    /// Returns `None` when the app is unknown, upstream reports it as
    /// unsuccessful, or the request fails.
    async fn fetch_detail(&self, appid: u64) -> Option<AppDetail>;

    /// Fetch the featured categories, including the current specials
    async fn fetch_featured(&self) -> Option<FeaturedPayload>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
