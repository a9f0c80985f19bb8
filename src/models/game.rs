use serde::{Deserialize, Serialize};

use super::{AppDetail, AppListing, Price};
use crate::error::AppResult;

/// Result envelope returned by every tool
///
/// `query` carries the echoed inputs and is flattened into the top level. A
/// failed run keeps the echoed inputs, drops `total_found` and reports the
/// failure in `error` next to an empty `results` list.
#[derive(Debug, Clone, Serialize)]
pub struct ToolPayload<Q, R> {
    #[serde(flatten)]
    pub query: Q,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_found: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub results: Vec<R>,
}

/// Filtered matches before truncation
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked<R> {
    pub total_found: usize,
    pub results: Vec<R>,
}

impl<R> Ranked<R> {
    /// Keeps the first `limit` entries while remembering how many matched
    pub fn truncate(mut matches: Vec<R>, limit: usize) -> Self {
        let total_found = matches.len();
        matches.truncate(limit);
        Self {
            total_found,
            results: matches,
        }
    }
}

impl<Q, R> ToolPayload<Q, R> {
    pub fn from_outcome(query: Q, outcome: AppResult<Ranked<R>>, context: &str) -> Self {
        match outcome {
            Ok(ranked) => Self {
                query,
                total_found: Some(ranked.total_found),
                error: None,
                results: ranked.results,
            },
            Err(e) => {
                tracing::warn!(error = %e, tool = context, "Tool run failed");
                Self {
                    query,
                    total_found: None,
                    error: Some(format!("{} failed: {}", context, e)),
                    results: Vec::new(),
                }
            }
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

// ============================================================================
// Tool parameters (echoed back in payloads)
// ============================================================================

fn default_limit() -> usize {
    10
}

fn default_min_discount() -> u32 {
    50
}

fn default_days() -> u32 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    pub query: String,
    #[serde(default = "default_limit", skip_serializing)]
    pub limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleParams {
    #[serde(default = "default_min_discount")]
    pub min_discount: u32,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default = "default_limit", skip_serializing)]
    pub limit: usize,
}

impl Default for SaleParams {
    fn default() -> Self {
        Self {
            min_discount: default_min_discount(),
            max_price: None,
            genre: None,
            limit: default_limit(),
        }
    }
}

/// Ranking key for the budget listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetSort {
    /// Recommendation count
    #[default]
    Rating,
    /// Raw release date text, compared as a string
    ReleaseDate,
    /// Recommendation count, reported as `rating_percent`
    Popularity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetParams {
    pub max_price: f64,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub sort_by: BudgetSort,
    #[serde(default = "default_limit", skip_serializing)]
    pub limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasteParams {
    pub liked_games: Vec<String>,
    #[serde(default)]
    pub preferences: Option<Vec<String>>,
    #[serde(default = "default_limit", skip_serializing)]
    pub limit: usize,
}

/// Echoed taste inputs plus the genres derived from them
#[derive(Debug, Clone, Serialize)]
pub struct TasteSummary {
    pub liked_games: Vec<String>,
    pub preferences: Option<Vec<String>>,
    pub top_genres: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentParams {
    #[serde(default = "default_days")]
    pub days: u32,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub min_rating: Option<u64>,
    #[serde(default = "default_limit", skip_serializing)]
    pub limit: usize,
}

impl Default for RecentParams {
    fn default() -> Self {
        Self {
            days: default_days(),
            genre: None,
            min_rating: None,
            limit: default_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubGenreParams {
    #[serde(default = "default_limit", skip_serializing)]
    pub limit: usize,
}

impl Default for SubGenreParams {
    fn default() -> Self {
        Self {
            limit: default_limit(),
        }
    }
}

/// Echoed sub-genre label, e.g. `{"genre": "Action RPG"}`
#[derive(Debug, Clone, Serialize)]
pub struct SubGenreSummary {
    pub genre: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameDetailsParams {
    pub appid: u64,
}

// ============================================================================
// Result records
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub appid: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl From<&AppListing> for SearchHit {
    fn from(listing: &AppListing) -> Self {
        Self {
            appid: listing.appid,
            name: listing.name.clone(),
            kind: "game",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleGame {
    pub appid: u64,
    pub name: String,
    pub original_price: f64,
    pub final_price: f64,
    pub discount_percent: u32,
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetGame {
    pub appid: u64,
    pub name: String,
    pub price: f64,
    pub rating_percent: u64,
    pub release_date: String,
    pub genres: Vec<String>,
    pub recommendations: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TasteMatch {
    pub appid: u64,
    pub name: String,
    pub match_score: u32,
    pub genres: Vec<String>,
    pub recommendations: u64,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentGame {
    pub appid: u64,
    pub name: String,
    pub release_date: String,
    pub genres: Vec<String>,
    pub recommendations: u64,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubGenreGame {
    pub appid: u64,
    pub name: String,
    pub genres: Vec<String>,
    pub recommendations: u64,
    pub price: f64,
    pub release_date: String,
}

/// Full description of a single app
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameDetails {
    pub appid: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub price: Option<Price>,
    pub release_date: String,
    pub developers: Vec<String>,
    pub publishers: Vec<String>,
    pub genres: Vec<String>,
    pub recommendations: u64,
}

impl GameDetails {
    pub fn from_detail(appid: u64, detail: &AppDetail) -> Self {
        Self {
            appid,
            name: detail.name().to_string(),
            kind: detail.app_type().to_string(),
            description: detail.description().to_string(),
            price: detail.price(),
            release_date: detail.release_date_text().to_string(),
            developers: detail.developers.clone(),
            publishers: detail.publishers.clone(),
            genres: detail.genre_names(),
            recommendations: detail.recommendation_count(),
        }
    }
}

/// Single-game lookup result; failures only echo the requested id
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum GameDetailsPayload {
    Found(GameDetails),
    Missing { error: String, appid: u64 },
}
