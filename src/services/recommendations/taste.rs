use crate::{
    error::{AppError, AppResult},
    models::{AppDetail, Ranked, TasteMatch, TasteParams, TasteSummary, ToolPayload},
};

use super::{sort_descending_by, Recommender};

/// Weight added to a genre for each explicit preference tag
const PREFERENCE_BONUS: u32 = 2;

/// How many of the most frequent genres form the target set
const TOP_GENRE_COUNT: usize = 5;

/// Genre frequencies in first-seen order
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct GenreTally {
    counts: Vec<(String, u32)>,
}

impl GenreTally {
    pub(crate) fn add(&mut self, genre: &str, weight: u32) {
        match self.counts.iter_mut().find(|(name, _)| name == genre) {
            Some((_, count)) => *count += weight,
            None => self.counts.push((genre.to_string(), weight)),
        }
    }

    /// The `n` heaviest genres; ties keep first-seen order
    pub(crate) fn top(&self, n: usize) -> GenreTally {
        let mut counts = self.counts.clone();
        sort_descending_by(&mut counts, |(_, count)| *count);
        counts.truncate(n);
        GenreTally { counts }
    }

    pub(crate) fn weight(&self, genre: &str) -> Option<u32> {
        self.counts
            .iter()
            .find(|(name, _)| name == genre)
            .map(|(_, count)| *count)
    }

    pub(crate) fn names(&self) -> Vec<String> {
        self.counts.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Sum of the weights of every genre the candidate shares with this tally
    pub(crate) fn match_score(&self, genres: &[String]) -> u32 {
        genres.iter().filter_map(|g| self.weight(g)).sum()
    }
}

impl Recommender {
    /// Games sharing genres with titles the caller already likes
    pub async fn recommend_by_taste(
        &self,
        params: TasteParams,
    ) -> ToolPayload<TasteSummary, TasteMatch> {
        let mut summary = TasteSummary {
            liked_games: params.liked_games.clone(),
            preferences: params.preferences.clone(),
            top_genres: Vec::new(),
        };

        let outcome = match self.target_genres(&params).await {
            Ok(targets) => {
                summary.top_genres = targets.names();
                self.find_taste_matches(&params, &targets).await
            }
            Err(e) => Err(e),
        };

        ToolPayload::from_outcome(summary, outcome, "Taste recommendation")
    }

    /// Resolves each liked name to the first listing containing it and weighs
    /// the genres of all resolved titles
    async fn target_genres(&self, params: &TasteParams) -> AppResult<GenreTally> {
        let listings = self.listings().await;

        let mut liked_details: Vec<AppDetail> = Vec::new();
        for liked in &params.liked_games {
            let needle = liked.to_lowercase();
            let Some(listing) = listings.iter().find(|l| l.name_contains(&needle)) else {
                tracing::debug!(liked = %liked, "Liked game not found in app list");
                continue;
            };
            if let Some(detail) = self.catalog.fetch_detail(listing.appid).await {
                liked_details.push(detail);
            }
        }

        if liked_details.is_empty() {
            return Err(AppError::NotFound(
                "No details could be found for any of the liked games".to_string(),
            ));
        }

        let mut tally = GenreTally::default();
        for detail in &liked_details {
            for genre in &detail.genres {
                tally.add(&genre.description, 1);
            }
        }
        for preference in params.preferences.iter().flatten() {
            tally.add(preference, PREFERENCE_BONUS);
        }

        let targets = tally.top(TOP_GENRE_COUNT);
        tracing::info!(
            resolved = liked_details.len(),
            top_genres = ?targets.names(),
            "Taste profile built"
        );

        Ok(targets)
    }

    async fn find_taste_matches(
        &self,
        params: &TasteParams,
        targets: &GenreTally,
    ) -> AppResult<Ranked<TasteMatch>> {
        let listings = self.listings().await;
        let sampled = self.sample_details(&listings, self.samples.taste).await;

        let mut matches: Vec<TasteMatch> = sampled
            .iter()
            .filter(|(_, detail)| !params.liked_games.iter().any(|liked| liked == detail.name()))
            .filter_map(|(appid, detail)| {
                let genres = detail.genre_names();
                let match_score = targets.match_score(&genres);
                (match_score > 0).then(|| TasteMatch {
                    appid: *appid,
                    name: detail.name().to_string(),
                    match_score,
                    genres,
                    recommendations: detail.recommendation_count(),
                    price: detail.final_price_or_free(),
                })
            })
            .collect();

        sort_descending_by(&mut matches, |m| (m.match_score, m.recommendations));

        tracing::info!(
            sampled = sampled.len(),
            matched = matches.len(),
            "Taste recommendations ranked"
        );

        Ok(Ranked::truncate(matches, params.limit))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::super::test_support::*;
    use super::*;
    use crate::config::SampleSizes;
    use crate::models::AppListing;

    fn taste_recommender() -> Recommender {
        let listings = vec![
            AppListing::new(400, "Portal"),
            AppListing::new(70, "Half-Life"),
            AppListing::new(1, "Arena Blaster"),
            AppListing::new(2, "Puzzle Box"),
            AppListing::new(3, "Action Puzzler"),
            AppListing::new(4, "Farm Life"),
        ];
        let details = vec![
            (400, detail("Portal", &["Action", "Puzzle"], 5000)),
            (70, detail("Half-Life", &["Action", "Shooter"], 8000)),
            (1, with_price(detail("Arena Blaster", &["Action", "Shooter"], 100), 1499, 1499, 0)),
            (2, detail("Puzzle Box", &["Puzzle"], 900)),
            (3, detail("Action Puzzler", &["Action", "Puzzle"], 50)),
            (4, detail("Farm Life", &["Simulation"], 3000)),
        ];
        let catalog = mock_catalog(listings, details, None);
        Recommender::new(Arc::new(catalog), Duration::from_secs(300), SampleSizes::default())
    }

    fn params(liked: &[&str], preferences: Option<&[&str]>) -> TasteParams {
        TasteParams {
            liked_games: liked.iter().map(|s| s.to_string()).collect(),
            preferences: preferences.map(|p| p.iter().map(|s| s.to_string()).collect()),
            limit: 10,
        }
    }

    #[test]
    fn test_tally_ties_keep_encounter_order() {
        let mut tally = GenreTally::default();
        for genre in ["Puzzle", "Action", "Action", "Shooter", "Indie"] {
            tally.add(genre, 1);
        }
        assert_eq!(tally.top(3).names(), vec!["Action", "Puzzle", "Shooter"]);
    }

    #[test]
    fn test_preference_creates_or_boosts_genre() {
        let mut tally = GenreTally::default();
        tally.add("Action", 1);
        tally.add("Action", PREFERENCE_BONUS);
        tally.add("Roguelike", PREFERENCE_BONUS);

        assert_eq!(tally.weight("Action"), Some(3));
        assert_eq!(tally.weight("Roguelike"), Some(2));
        assert_eq!(tally.weight("Puzzle"), None);
    }

    #[test]
    fn test_match_score_sums_shared_weights() {
        let mut tally = GenreTally::default();
        tally.add("Action", 2);
        tally.add("Puzzle", 1);

        let genres = vec!["Action".to_string(), "Puzzle".to_string(), "Indie".to_string()];
        assert_eq!(tally.match_score(&genres), 3);
        assert_eq!(tally.match_score(&["Racing".to_string()]), 0);
    }

    #[tokio::test]
    async fn test_shared_genre_ranks_first_and_liked_games_excluded() {
        let payload = taste_recommender()
            .recommend_by_taste(params(&["Portal", "Half-Life"], None))
            .await;

        assert!(!payload.is_error());
        assert_eq!(payload.query.top_genres, vec!["Action", "Puzzle", "Shooter"]);
        assert!(payload
            .results
            .iter()
            .all(|m| m.name != "Portal" && m.name != "Half-Life"));

        let ranked: Vec<(&str, u32)> = payload
            .results
            .iter()
            .map(|m| (m.name.as_str(), m.match_score))
            .collect();
        assert_eq!(
            ranked,
            vec![("Arena Blaster", 3), ("Action Puzzler", 3), ("Puzzle Box", 1)]
        );
        assert_eq!(payload.results[0].price, 14.99);
        assert_eq!(payload.total_found, Some(3));
    }

    #[tokio::test]
    async fn test_liked_name_is_matched_case_insensitively() {
        let payload = taste_recommender()
            .recommend_by_taste(params(&["portal"], Some(&["Simulation"])))
            .await;

        assert_eq!(payload.query.top_genres, vec!["Simulation", "Action", "Puzzle"]);
        // "portal" differs from the listed name, so the liked title itself is not excluded
        let top_two: Vec<(&str, u32)> = payload.results[..2]
            .iter()
            .map(|m| (m.name.as_str(), m.match_score))
            .collect();
        assert_eq!(top_two, vec![("Portal", 2), ("Farm Life", 2)]);
    }

    #[tokio::test]
    async fn test_unknown_liked_games_is_an_error_payload() {
        let payload = taste_recommender()
            .recommend_by_taste(params(&["Nonexistent Game"], None))
            .await;

        assert!(payload.is_error());
        assert!(payload.results.is_empty());
        assert!(payload.query.top_genres.is_empty());
        assert_eq!(payload.query.liked_games, vec!["Nonexistent Game"]);
    }
}
