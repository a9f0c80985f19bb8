use serde::{Deserialize, Serialize};

pub mod game;

pub use game::*;

// ============================================================================
// Steam API Types
// ============================================================================

/// One entry of the full app list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppListing {
    pub appid: u64,
    #[serde(default)]
    pub name: String,
}

impl AppListing {
    pub fn new(appid: u64, name: impl Into<String>) -> Self {
        Self {
            appid,
            name: name.into(),
        }
    }

    /// Case-insensitive substring match against the listing name
    pub fn name_contains(&self, needle_lowercase: &str) -> bool {
        self.name.to_lowercase().contains(needle_lowercase)
    }
}

/// Raw `data` object returned by the store `appdetails` endpoint
///
/// Every field is optional upstream; the accessors below supply the defaults
/// the recommendation strategies rely on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppDetail {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub app_type: Option<String>,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub price_overview: Option<PriceOverview>,
    #[serde(default)]
    pub release_date: Option<ReleaseDate>,
    #[serde(default)]
    pub developers: Vec<String>,
    #[serde(default)]
    pub publishers: Vec<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub recommendations: Option<Recommendations>,
}

/// Store prices are expressed in cents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceOverview {
    #[serde(rename = "final", default)]
    pub final_cents: Option<u64>,
    #[serde(rename = "initial", default)]
    pub initial_cents: Option<u64>,
    #[serde(default)]
    pub discount_percent: Option<u32>,
}

impl PriceOverview {
    pub fn is_empty(&self) -> bool {
        self.final_cents.is_none() && self.initial_cents.is_none() && self.discount_percent.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReleaseDate {
    #[serde(default)]
    pub coming_soon: Option<bool>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    #[serde(default)]
    pub id: Option<String>,
    pub description: String,
}

impl Genre {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: None,
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    #[serde(default)]
    pub total: u64,
}

/// Normalized price in dollars
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Price {
    pub final_price: f64,
    pub initial_price: f64,
    pub discount_percent: u32,
}

fn cents_to_dollars(cents: u64) -> f64 {
    cents as f64 / 100.0
}

impl AppDetail {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }

    pub fn app_type(&self) -> &str {
        self.app_type.as_deref().unwrap_or("Unknown")
    }

    pub fn description(&self) -> &str {
        self.short_description.as_deref().unwrap_or_default()
    }

    /// Genre descriptions in upstream order
    pub fn genre_names(&self) -> Vec<String> {
        self.genres.iter().map(|g| g.description.clone()).collect()
    }

    /// Case-insensitive exact match against any of the genres
    pub fn has_genre(&self, genre: &str) -> bool {
        let wanted = genre.to_lowercase();
        self.genres
            .iter()
            .any(|g| g.description.to_lowercase() == wanted)
    }

    pub fn recommendation_count(&self) -> u64 {
        self.recommendations.as_ref().map_or(0, |r| r.total)
    }

    /// Raw release date text, e.g. "Dec 10, 2020"; empty when unknown
    pub fn release_date_text(&self) -> &str {
        self.release_date
            .as_ref()
            .and_then(|r| r.date.as_deref())
            .unwrap_or_default()
    }

    /// Price block, or `None` when the store omits it or sends it empty
    pub fn price(&self) -> Option<Price> {
        let overview = self.price_overview.as_ref().filter(|p| !p.is_empty())?;

        Some(Price {
            final_price: cents_to_dollars(overview.final_cents.unwrap_or(0)),
            initial_price: cents_to_dollars(overview.initial_cents.unwrap_or(0)),
            discount_percent: overview.discount_percent.unwrap_or(0),
        })
    }

    /// Final price in dollars, 0 for free or unpriced apps
    pub fn final_price_or_free(&self) -> f64 {
        self.price().map_or(0.0, |p| p.final_price)
    }
}

/// Response from the store `featuredcategories` endpoint
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FeaturedPayload {
    #[serde(default)]
    pub specials: Option<FeaturedCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FeaturedCategory {
    #[serde(default)]
    pub items: Vec<FeaturedItem>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeaturedItem {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_detail_deserialization() {
        let json = r#"{
            "type": "game",
            "name": "Portal 2",
            "steam_appid": 620,
            "short_description": "The sequel.",
            "price_overview": {
                "currency": "USD",
                "initial": 999,
                "final": 199,
                "discount_percent": 80,
                "final_formatted": "$1.99"
            },
            "release_date": { "coming_soon": false, "date": "Apr 18, 2011" },
            "developers": ["Valve"],
            "publishers": ["Valve"],
            "genres": [{ "id": "1", "description": "Action" }, { "id": "25", "description": "Adventure" }],
            "recommendations": { "total": 250000 }
        }"#;

        let detail: AppDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.name(), "Portal 2");
        assert_eq!(detail.app_type(), "game");
        assert_eq!(detail.genre_names(), vec!["Action", "Adventure"]);
        assert_eq!(detail.recommendation_count(), 250000);
        assert_eq!(detail.release_date_text(), "Apr 18, 2011");

        let price = detail.price().unwrap();
        assert_eq!(price.final_price, 1.99);
        assert_eq!(price.initial_price, 9.99);
        assert_eq!(price.discount_percent, 80);
    }

    #[test]
    fn test_app_detail_defaults_for_missing_fields() {
        let detail: AppDetail = serde_json::from_str("{}").unwrap();
        assert_eq!(detail.name(), "Unknown");
        assert_eq!(detail.app_type(), "Unknown");
        assert_eq!(detail.description(), "");
        assert!(detail.genre_names().is_empty());
        assert_eq!(detail.recommendation_count(), 0);
        assert_eq!(detail.release_date_text(), "");
        assert_eq!(detail.price(), None);
        assert_eq!(detail.final_price_or_free(), 0.0);
    }

    #[test]
    fn test_empty_price_block_counts_as_missing() {
        let detail: AppDetail = serde_json::from_str(r#"{ "price_overview": {} }"#).unwrap();
        assert!(detail.price_overview.is_some());
        assert_eq!(detail.price(), None);
    }

    #[test]
    fn test_has_genre_is_case_insensitive_exact() {
        let detail = AppDetail {
            genres: vec![Genre::new("Action"), Genre::new("Massively Multiplayer")],
            ..Default::default()
        };
        assert!(detail.has_genre("action"));
        assert!(detail.has_genre("MASSIVELY MULTIPLAYER"));
        assert!(!detail.has_genre("multiplayer"));
    }

    #[test]
    fn test_listing_name_contains() {
        let listing = AppListing::new(730, "Counter-Strike 2");
        assert!(listing.name_contains("counter"));
        assert!(!listing.name_contains("half-life"));
    }

    #[test]
    fn test_featured_payload_deserialization() {
        let json = r#"{
            "specials": { "id": "cat_specials", "items": [{ "id": 10, "name": "Counter-Strike", "discounted": true }] },
            "status": 1
        }"#;
        let featured: FeaturedPayload = serde_json::from_str(json).unwrap();
        let items = featured.specials.unwrap().items;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 10);
    }
}
