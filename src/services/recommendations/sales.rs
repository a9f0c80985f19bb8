use crate::{
    error::{AppError, AppResult},
    models::{AppDetail, Ranked, SaleGame, SaleParams, ToolPayload},
};

use super::{genre_filter_passes, sort_descending_by, Recommender};

impl Recommender {
    /// Discounted games from the store specials, deepest discount first
    pub async fn sale_recommendations(&self, params: SaleParams) -> ToolPayload<SaleParams, SaleGame> {
        let outcome = self.find_sales(&params).await;
        ToolPayload::from_outcome(params, outcome, "Sale recommendation")
    }

    async fn find_sales(&self, params: &SaleParams) -> AppResult<Ranked<SaleGame>> {
        let specials = self
            .catalog
            .fetch_featured()
            .await
            .and_then(|featured| featured.specials)
            .ok_or_else(|| AppError::ExternalApi("Sale information is unavailable".to_string()))?;

        let mut sale_games = Vec::new();
        for item in &specials.items {
            let Some(detail) = self.catalog.fetch_detail(item.id).await else {
                continue;
            };
            if let Some(game) = sale_candidate(item.id, &detail, params) {
                sale_games.push(game);
            }
        }

        sort_descending_by(&mut sale_games, |g| g.discount_percent);

        tracing::info!(
            specials = specials.items.len(),
            matched = sale_games.len(),
            min_discount = params.min_discount,
            "Sale recommendations ranked"
        );

        Ok(Ranked::truncate(sale_games, params.limit))
    }
}

fn sale_candidate(appid: u64, detail: &AppDetail, params: &SaleParams) -> Option<SaleGame> {
    let price = detail.price()?;

    if price.discount_percent < params.min_discount {
        return None;
    }
    if params.max_price.is_some_and(|max| price.final_price > max) {
        return None;
    }
    if !genre_filter_passes(detail, params.genre.as_deref()) {
        return None;
    }

    Some(SaleGame {
        appid,
        name: detail.name().to_string(),
        original_price: price.initial_price,
        final_price: price.final_price,
        discount_percent: price.discount_percent,
        genres: detail.genre_names(),
    })
}
