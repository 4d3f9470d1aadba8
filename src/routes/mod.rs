use axum::{http::StatusCode, middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::{
    index::SimilarityIndex,
    middleware::{make_span_with_request_id, request_id_middleware},
    services::{posters::PosterResolver, recommendations::DEFAULT_RECOMMENDATIONS},
};

pub mod movies;
pub mod page;
pub mod recommendations;

/// Shared, read-only application state
pub struct AppState {
    pub index: Arc<SimilarityIndex>,
    pub posters: Arc<dyn PosterResolver>,
    /// Number of recommendations per query
    pub recommendation_count: usize,
}

impl AppState {
    pub fn new(index: Arc<SimilarityIndex>, posters: Arc<dyn PosterResolver>) -> Self {
        Self {
            index,
            posters,
            recommendation_count: DEFAULT_RECOMMENDATIONS,
        }
    }

    pub fn with_recommendation_count(mut self, count: usize) -> Self {
        self.recommendation_count = count;
        self
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(page::index))
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/movies", get(movies::list))
        .route("/recommendations", get(recommendations::recommend))
        .route("/recommendations/grid", get(recommendations::grid))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
