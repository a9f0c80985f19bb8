use axum::{
    http::StatusCode,
    middleware::from_fn,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

pub mod state;
pub mod tools;

pub use state::AppState;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/tools", get(tools::list_tools))
        .merge(tool_routes())
        .layer(
            ServiceBuilder::new()
                .layer(from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// One POST route per tool, taking the tool parameters as a JSON body
fn tool_routes() -> Router<AppState> {
    Router::new()
        .route("/tools/search_games", post(tools::search_games))
        .route("/tools/get_game_details", post(tools::get_game_details))
        .route(
            "/tools/get_sale_recommendations",
            post(tools::get_sale_recommendations),
        )
        .route("/tools/top_games_by_budget", post(tools::top_games_by_budget))
        .route("/tools/recommend_by_taste", post(tools::recommend_by_taste))
        .route("/tools/get_recent_releases", post(tools::get_recent_releases))
        .route(
            "/tools/recommend_action_rpg_games",
            post(tools::recommend_action_rpg_games),
        )
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
