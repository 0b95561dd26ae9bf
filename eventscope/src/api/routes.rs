use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::handlers::search::{KEYWORD_PATH, SIMILAR_PATH};
use super::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(KEYWORD_PATH, get(handlers::search::keyword_search))
        .route("/search/keyword/", get(handlers::search::keyword_search))
        .route(SIMILAR_PATH, get(handlers::search::similar_search))
        .route("/search/similar/", get(handlers::search::similar_search))
        .route("/keywords", get(handlers::keywords::extract_keywords))
        .route("/keywords/", get(handlers::keywords::extract_keywords))
        .route("/health", get(handlers::health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
