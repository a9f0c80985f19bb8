use std::sync::Arc;

use crate::{
    config::Config,
    error::AppResult,
    services::{CatalogProvider, Recommender, SteamCatalogClient},
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
}

impl AppState {
    pub fn new(recommender: Recommender) -> Self {
        Self {
            recommender: Arc::new(recommender),
        }
    }

    /// Wires the Steam client, rate limiter and app list cache from configuration
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let catalog: Arc<dyn CatalogProvider> = Arc::new(SteamCatalogClient::from_config(config)?);

        tracing::info!(
            provider = catalog.name(),
            request_delay_ms = config.request_delay_ms,
            cache_ttl_secs = config.cache_ttl_secs,
            "Catalog provider configured"
        );

        Ok(Self::new(Recommender::new(
            catalog,
            config.cache_ttl(),
            config.sample_sizes(),
        )))
    }
}
