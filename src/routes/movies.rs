use axum::{extract::State, Json};
use std::sync::Arc;

use crate::routes::AppState;

/// Handler listing every known title in index order
pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.index.titles().map(str::to_string).collect())
}
