use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Steam Web API base URL (app list)
    #[serde(default = "default_steam_web_api_url")]
    pub steam_web_api_url: String,

    /// Steam Store API base URL (app details, featured categories)
    #[serde(default = "default_steam_store_api_url")]
    pub steam_store_api_url: String,

    /// Minimum spacing between two upstream requests, in milliseconds
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Upstream HTTP request timeout, in seconds
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// How long the full app list stays cached, in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    #[serde(default = "default_budget_sample_size")]
    pub budget_sample_size: usize,

    #[serde(default = "default_taste_sample_size")]
    pub taste_sample_size: usize,

    #[serde(default = "default_recent_sample_size")]
    pub recent_sample_size: usize,

    #[serde(default = "default_subgenre_sample_size")]
    pub subgenre_sample_size: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// How many listings each strategy enriches with per-app details
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleSizes {
    pub budget: usize,
    pub taste: usize,
    pub recent: usize,
    pub subgenre: usize,
}

impl Default for SampleSizes {
    fn default() -> Self {
        Self {
            budget: default_budget_sample_size(),
            taste: default_taste_sample_size(),
            recent: default_recent_sample_size(),
            subgenre: default_subgenre_sample_size(),
        }
    }
}

fn default_steam_web_api_url() -> String {
    "https://api.steampowered.com".to_string()
}

fn default_steam_store_api_url() -> String {
    "https://store.steampowered.com/api".to_string()
}

fn default_request_delay_ms() -> u64 {
    1500
}

fn default_http_timeout_secs() -> u64 {
    30
}

fn default_cache_ttl_secs() -> u64 {
    300
}

fn default_budget_sample_size() -> usize {
    1000
}

fn default_taste_sample_size() -> usize {
    500
}

fn default_recent_sample_size() -> usize {
    1000
}

fn default_subgenre_sample_size() -> usize {
    1000
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn sample_sizes(&self) -> SampleSizes {
        SampleSizes {
            budget: self.budget_sample_size,
            taste: self.taste_sample_size,
            recent: self.recent_sample_size,
            subgenre: self.subgenre_sample_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_environment() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();

        assert_eq!(config.steam_web_api_url, "https://api.steampowered.com");
        assert_eq!(config.request_delay(), Duration::from_millis(1500));
        assert_eq!(config.cache_ttl(), Duration::from_secs(300));
        assert_eq!(config.sample_sizes(), SampleSizes::default());
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_overrides_from_environment() {
        let vars = vec![
            ("REQUEST_DELAY_MS".to_string(), "250".to_string()),
            ("TASTE_SAMPLE_SIZE".to_string(), "40".to_string()),
            ("PORT".to_string(), "8080".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();

        assert_eq!(config.request_delay(), Duration::from_millis(250));
        assert_eq!(config.sample_sizes().taste, 40);
        assert_eq!(config.sample_sizes().budget, 1000);
        assert_eq!(config.port, 8080);
    }
}
