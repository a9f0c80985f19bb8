/// Steam catalog provider
///
/// API Flow:
/// 1. App list: {web_api}/ISteamApps/GetAppList/v2/ → every appid + name
/// 2. Details: {store_api}/appdetails?appids={id} → price, genres, release date
/// 3. Featured: {store_api}/featuredcategories → current specials
///
/// Every request goes through one shared rate limiter.
use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{AppDetail, AppListing, FeaturedPayload},
    services::{providers::CatalogProvider, rate_limiter::RateLimiter},
};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

#[derive(Debug, Default, Deserialize)]
struct AppListResponse {
    #[serde(default)]
    applist: AppListBody,
}

#[derive(Debug, Default, Deserialize)]
struct AppListBody {
    #[serde(default)]
    apps: Vec<AppListing>,
}

/// One entry of the `appdetails` response, keyed by appid upstream
#[derive(Debug, Deserialize)]
struct AppDetailsEntry {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

#[derive(Clone)]
pub struct SteamCatalogClient {
    http_client: HttpClient,
    web_api_url: String,
    store_api_url: String,
    rate_limiter: Arc<RateLimiter>,
}

impl SteamCatalogClient {
    pub fn new(
        web_api_url: String,
        store_api_url: String,
        request_delay: Duration,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            web_api_url,
            store_api_url,
            rate_limiter: Arc::new(RateLimiter::new(request_delay)),
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.steam_web_api_url.clone(),
            config.steam_store_api_url.clone(),
            config.request_delay(),
            config.http_timeout(),
        )
    }

    /// Issues one throttled GET and decodes the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        self.rate_limiter.throttle().await;

        let response = self.http_client.get(url).query(query).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Steam API returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        serde_json::from_str(&response_text).map_err(|e| {
            tracing::debug!(response = %response_text, "Undecodable Steam response");
            AppError::ExternalApi(format!("Failed to parse Steam response: {}", e))
        })
    }

    #[instrument(skip(self))]
    async fn request_app_list(&self) -> AppResult<Vec<AppListing>> {
        let url = format!("{}/ISteamApps/GetAppList/v2/", self.web_api_url);
        let response: AppListResponse = self.get_json(&url, &[]).await?;
        Ok(response.applist.apps)
    }

    #[instrument(skip(self))]
    async fn request_detail(&self, appid: u64) -> AppResult<Option<AppDetail>> {
        let url = format!("{}/appdetails", self.store_api_url);
        let response: HashMap<String, AppDetailsEntry> = self
            .get_json(&url, &[("appids", appid.to_string())])
            .await?;
        extract_detail(response, appid)
    }

    #[instrument(skip(self))]
    async fn request_featured(&self) -> AppResult<FeaturedPayload> {
        let url = format!("{}/featuredcategories", self.store_api_url);
        self.get_json(&url, &[]).await
    }
}

/// Picks the entry for `appid` out of an `appdetails` response
///
/// Missing or unsuccessful entries are `Ok(None)`; a `data` object that does
/// not decode is an error.
fn extract_detail(
    mut response: HashMap<String, AppDetailsEntry>,
    appid: u64,
) -> AppResult<Option<AppDetail>> {
    let Some(entry) = response.remove(&appid.to_string()) else {
        return Ok(None);
    };

    match entry.data {
        Some(data) if entry.success => serde_json::from_value(data).map(Some).map_err(|e| {
            AppError::ExternalApi(format!("Malformed details for appid {}: {}", appid, e))
        }),
        _ => Ok(None),
    }
}

#[async_trait::async_trait]
impl CatalogProvider for SteamCatalogClient {
    async fn fetch_all_listings(&self) -> Vec<AppListing> {
        match self.request_app_list().await {
            Ok(apps) => {
                tracing::info!(apps = apps.len(), provider = "steam", "App list fetched");
                apps
            }
            Err(e) => {
                tracing::warn!(error = %e, provider = "steam", "App list fetch failed");
                Vec::new()
            }
        }
    }

    async fn fetch_detail(&self, appid: u64) -> Option<AppDetail> {
        match self.request_detail(appid).await {
            Ok(detail) => {
                if detail.is_none() {
                    tracing::debug!(appid = appid, provider = "steam", "No details for app");
                }
                detail
            }
            Err(e) => {
                tracing::warn!(error = %e, appid = appid, provider = "steam", "App details fetch failed");
                None
            }
        }
    }

    async fn fetch_featured(&self) -> Option<FeaturedPayload> {
        self.request_featured()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, provider = "steam", "Featured categories fetch failed");
            })
            .ok()
    }

    fn name(&self) -> &'static str {
        "steam"
    }
}
