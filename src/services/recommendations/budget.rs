use crate::{
    error::AppResult,
    models::{AppDetail, BudgetGame, BudgetParams, BudgetSort, Ranked, ToolPayload},
};

use super::{genre_filter_passes, sort_descending_by, Recommender};

impl Recommender {
    /// Best games at or under a price ceiling
    pub async fn top_games_by_budget(
        &self,
        params: BudgetParams,
    ) -> ToolPayload<BudgetParams, BudgetGame> {
        let outcome = self.find_budget_games(&params).await;
        ToolPayload::from_outcome(params, outcome, "Budget recommendation")
    }

    async fn find_budget_games(&self, params: &BudgetParams) -> AppResult<Ranked<BudgetGame>> {
        let listings = self.listings().await;
        let sampled = self.sample_details(&listings, self.samples.budget).await;

        let mut budget_games: Vec<BudgetGame> = sampled
            .iter()
            .filter_map(|(appid, detail)| budget_candidate(*appid, detail, params))
            .collect();

        rank_budget_games(&mut budget_games, params.sort_by);

        tracing::info!(
            sampled = sampled.len(),
            matched = budget_games.len(),
            max_price = params.max_price,
            sort_by = ?params.sort_by,
            "Budget recommendations ranked"
        );

        Ok(Ranked::truncate(budget_games, params.limit))
    }
}

fn budget_candidate(appid: u64, detail: &AppDetail, params: &BudgetParams) -> Option<BudgetGame> {
    let price = detail.price()?;

    if price.final_price > params.max_price {
        return None;
    }
    if !genre_filter_passes(detail, params.genre.as_deref()) {
        return None;
    }

    let recommendations = detail.recommendation_count();
    Some(BudgetGame {
        appid,
        name: detail.name().to_string(),
        price: price.final_price,
        rating_percent: recommendations,
        release_date: detail.release_date_text().to_string(),
        genres: detail.genre_names(),
        recommendations,
    })
}

/// Release dates are compared as raw text, not as calendar dates
fn rank_budget_games(games: &mut [BudgetGame], sort_by: BudgetSort) {
    match sort_by {
        BudgetSort::Rating => sort_descending_by(games, |g| g.recommendations),
        BudgetSort::ReleaseDate => sort_descending_by(games, |g| g.release_date.clone()),
        BudgetSort::Popularity => sort_descending_by(games, |g| g.rating_percent),
    }
}
