pub mod providers;
pub mod rate_limiter;
pub mod recommendations;
pub mod title_search;

pub use providers::{CatalogProvider, SteamCatalogClient};
pub use rate_limiter::RateLimiter;
pub use recommendations::Recommender;
