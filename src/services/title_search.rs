use crate::{
    error::AppResult,
    models::{
        AppListing, GameDetails, GameDetailsPayload, Ranked, SearchHit, SearchParams, ToolPayload,
    },
    services::recommendations::Recommender,
};

/// Case-insensitive substring search over listing names, in listing order
pub fn search_listings(listings: &[AppListing], query: &str, limit: usize) -> Ranked<SearchHit> {
    let needle = query.to_lowercase();
    let hits: Vec<SearchHit> = listings
        .iter()
        .filter(|listing| listing.name_contains(&needle))
        .map(SearchHit::from)
        .collect();

    Ranked::truncate(hits, limit)
}

impl Recommender {
    /// Search the app list by name
    pub async fn search_games(&self, params: SearchParams) -> ToolPayload<SearchParams, SearchHit> {
        let outcome = self.find_games_by_name(&params).await;
        ToolPayload::from_outcome(params, outcome, "Game search")
    }

    async fn find_games_by_name(&self, params: &SearchParams) -> AppResult<Ranked<SearchHit>> {
        let listings = self.listings().await;
        let ranked = search_listings(&listings, &params.query, params.limit);

        tracing::info!(
            query = %params.query,
            total_found = ranked.total_found,
            "Game search completed"
        );

        Ok(ranked)
    }

    /// Full store details for a single app
    pub async fn game_details(&self, appid: u64) -> GameDetailsPayload {
        match self.catalog().fetch_detail(appid).await {
            Some(detail) => GameDetailsPayload::Found(GameDetails::from_detail(appid, &detail)),
            None => GameDetailsPayload::Missing {
                error: format!("No details found for appid {}", appid),
                appid,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::config::SampleSizes;
    use crate::services::recommendations::test_support::*;

    fn listings() -> Vec<AppListing> {
        vec![
            AppListing::new(10, "Counter-Strike"),
            AppListing::new(80, "Counter-Strike: Condition Zero"),
            AppListing::new(70, "Half-Life"),
            AppListing::new(730, "Counter-Strike 2"),
        ]
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let ranked = search_listings(&listings(), "counter", 10);
        assert_eq!(ranked.total_found, 3);
        let ids: Vec<u64> = ranked.results.iter().map(|h| h.appid).collect();
        assert_eq!(ids, vec![10, 80, 730]);
        assert!(ranked.results.iter().all(|h| h.kind == "game"));
    }

    #[test]
    fn test_search_respects_limit() {
        let ranked = search_listings(&listings(), "COUNTER-STRIKE", 2);
        assert_eq!(ranked.results.len(), 2);
        assert_eq!(ranked.total_found, 3);
    }

    #[test]
    fn test_search_without_matches() {
        let ranked = search_listings(&listings(), "portal", 10);
        assert_eq!(ranked.total_found, 0);
        assert!(ranked.results.is_empty());
    }

    #[tokio::test]
    async fn test_search_games_payload() {
        let catalog = mock_catalog(listings(), Vec::new(), None);
        let recommender =
            Recommender::new(Arc::new(catalog), Duration::from_secs(300), SampleSizes::default());

        let payload = recommender
            .search_games(SearchParams {
                query: "half".to_string(),
                limit: 10,
            })
            .await;

        assert_eq!(payload.total_found, Some(1));
        assert_eq!(payload.results[0].name, "Half-Life");
        assert_eq!(payload.query.query, "half");
    }

    #[tokio::test]
    async fn test_game_details_found_and_missing() {
        let details = vec![(70, with_release(with_price(detail("Half-Life", &["Action"], 42), 999, 999, 0), "Nov 8, 1998"))];
        let catalog = mock_catalog(listings(), details, None);
        let recommender =
            Recommender::new(Arc::new(catalog), Duration::from_secs(300), SampleSizes::default());

        match recommender.game_details(70).await {
            GameDetailsPayload::Found(found) => {
                assert_eq!(found.name, "Half-Life");
                assert_eq!(found.kind, "game");
                assert_eq!(found.recommendations, 42);
                assert_eq!(found.release_date, "Nov 8, 1998");
                assert_eq!(found.price.unwrap().final_price, 9.99);
            }
            other => panic!("expected details, got {:?}", other),
        }

        assert!(matches!(
            recommender.game_details(1).await,
            GameDetailsPayload::Missing { appid: 1, .. }
        ));
    }
}
