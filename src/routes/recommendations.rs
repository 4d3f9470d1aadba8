use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{Recommendation, RecommendationGrid},
    routes::AppState,
    services::{presentation, recommendations},
};

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub title: Option<String>,
    /// Overrides the configured number of recommendations
    pub k: Option<usize>,
}

impl RecommendationQuery {
    fn title(&self) -> AppResult<&str> {
        self.title
            .as_deref()
            .ok_or_else(|| AppError::InvalidInput("Missing 'title' query parameter".to_string()))
    }
}

/// Handler for ranked recommendations without posters
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<Vec<Recommendation>>> {
    let title = params.title()?;
    let k = params.k.unwrap_or(state.recommendation_count);

    tracing::info!(
        request_id = %request_id,
        title = %title,
        k,
        "Processing recommendation request"
    );

    let recommendations = recommendations::recommend(&state.index, title, k)?;
    Ok(Json(recommendations))
}

/// Handler for recommendations with posters, laid out in rows
pub async fn grid(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationGrid>> {
    let title = params.title()?;
    let k = params.k.unwrap_or(state.recommendation_count);

    tracing::info!(
        request_id = %request_id,
        title = %title,
        k,
        "Processing recommendation grid request"
    );

    let grid = presentation::build_grid(
        &state.index,
        state.posters.as_ref(),
        title,
        k,
        presentation::GRID_COLUMNS,
    )
    .await?;

    Ok(Json(grid))
}
