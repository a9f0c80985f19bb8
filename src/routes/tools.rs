use axum::{extract::State, Extension, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::{
    middleware::request_id::RequestId,
    models::{
        BudgetGame, BudgetParams, GameDetailsParams, GameDetailsPayload, RecentGame, RecentParams,
        SaleGame, SaleParams, SearchHit, SearchParams, SubGenreGame, SubGenreParams,
        SubGenreSummary, TasteMatch, TasteParams, TasteSummary, ToolPayload,
    },
};

use super::AppState;

/// Description of one callable tool
#[derive(Debug, Serialize)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Value,
}

pub fn tool_descriptors() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name: "search_games",
            description: "Search Steam games by name (case-insensitive substring match).",
            parameters: json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string", "description": "Part of the game name" },
                    "limit": { "type": "integer", "description": "Maximum results (default 10)" }
                },
                "required": ["query"]
            }),
        },
        ToolDescriptor {
            name: "get_game_details",
            description: "Price, description, genres, release date and recommendation count of one game.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "appid": { "type": "integer", "description": "Steam app id" }
                },
                "required": ["appid"]
            }),
        },
        ToolDescriptor {
            name: "get_sale_recommendations",
            description: "Discounted games from the current Steam specials, deepest discount first.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "min_discount": { "type": "integer", "description": "Minimum discount percent (default 50)" },
                    "max_price": { "type": "number", "description": "Maximum final price in dollars" },
                    "genre": { "type": "string", "description": "Genre filter" },
                    "limit": { "type": "integer", "description": "Maximum results (default 10)" }
                }
            }),
        },
        ToolDescriptor {
            name: "top_games_by_budget",
            description: "Best games at or under a price ceiling.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "max_price": { "type": "number", "description": "Budget in dollars" },
                    "genre": { "type": "string", "description": "Genre filter" },
                    "sort_by": {
                        "type": "string",
                        "enum": ["rating", "release_date", "popularity"],
                        "description": "Ranking key (default rating)"
                    },
                    "limit": { "type": "integer", "description": "Maximum results (default 10)" }
                },
                "required": ["max_price"]
            }),
        },
        ToolDescriptor {
            name: "recommend_by_taste",
            description: "Games sharing genres with titles the player already likes.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "liked_games": { "type": "array", "items": { "type": "string" }, "description": "Names of liked games" },
                    "preferences": { "type": "array", "items": { "type": "string" }, "description": "Extra preferred genres or tags" },
                    "limit": { "type": "integer", "description": "Maximum results (default 10)" }
                },
                "required": ["liked_games"]
            }),
        },
        ToolDescriptor {
            name: "get_recent_releases",
            description: "Games released within the last few days.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "days": { "type": "integer", "description": "Look-back window in days (default 30)" },
                    "genre": { "type": "string", "description": "Genre filter" },
                    "min_rating": { "type": "integer", "description": "Minimum recommendation count" },
                    "limit": { "type": "integer", "description": "Maximum results (default 10)" }
                }
            }),
        },
        ToolDescriptor {
            name: "recommend_action_rpg_games",
            description: "Most recommended action RPGs.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "limit": { "type": "integer", "description": "Maximum results (default 10)" }
                }
            }),
        },
    ]
}

/// Lists every callable tool with its parameter schema
pub async fn list_tools() -> Json<Vec<ToolDescriptor>> {
    Json(tool_descriptors())
}

pub async fn search_games(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(params): Json<SearchParams>,
) -> Json<ToolPayload<SearchParams, SearchHit>> {
    tracing::info!(request_id = %request_id, query = %params.query, "search_games called");
    Json(state.recommender.search_games(params).await)
}

pub async fn get_game_details(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(params): Json<GameDetailsParams>,
) -> Json<GameDetailsPayload> {
    tracing::info!(request_id = %request_id, appid = params.appid, "get_game_details called");
    Json(state.recommender.game_details(params.appid).await)
}

pub async fn get_sale_recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(params): Json<SaleParams>,
) -> Json<ToolPayload<SaleParams, SaleGame>> {
    tracing::info!(
        request_id = %request_id,
        min_discount = params.min_discount,
        "get_sale_recommendations called"
    );
    Json(state.recommender.sale_recommendations(params).await)
}

pub async fn top_games_by_budget(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(params): Json<BudgetParams>,
) -> Json<ToolPayload<BudgetParams, BudgetGame>> {
    tracing::info!(
        request_id = %request_id,
        max_price = params.max_price,
        "top_games_by_budget called"
    );
    Json(state.recommender.top_games_by_budget(params).await)
}

pub async fn recommend_by_taste(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(params): Json<TasteParams>,
) -> Json<ToolPayload<TasteSummary, TasteMatch>> {
    tracing::info!(
        request_id = %request_id,
        liked_games = params.liked_games.len(),
        "recommend_by_taste called"
    );
    Json(state.recommender.recommend_by_taste(params).await)
}

pub async fn get_recent_releases(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(params): Json<RecentParams>,
) -> Json<ToolPayload<RecentParams, RecentGame>> {
    tracing::info!(request_id = %request_id, days = params.days, "get_recent_releases called");
    Json(state.recommender.recent_releases(params).await)
}

pub async fn recommend_action_rpg_games(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(params): Json<SubGenreParams>,
) -> Json<ToolPayload<SubGenreSummary, SubGenreGame>> {
    tracing::info!(request_id = %request_id, limit = params.limit, "recommend_action_rpg_games called");
    Json(state.recommender.recommend_action_rpg_games(params).await)
}
