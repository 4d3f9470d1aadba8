use crate::{
    error::{AppError, AppResult},
    index::SimilarityIndex,
    models::Recommendation,
};

/// Default number of recommendations per query
pub const DEFAULT_RECOMMENDATIONS: usize = 10;

/// Returns the `k` movies most similar to `title`
///
/// Candidates are every other row of the index, ranked by descending
/// similarity to the query row. Equal scores keep ascending row order. The
/// query row itself is removed before ranking, so a tie with the
/// self-similarity entry can never leak the query into the results.
pub fn recommend(
    index: &SimilarityIndex,
    title: &str,
    k: usize,
) -> AppResult<Vec<Recommendation>> {
    // A blank title is only rejected when no movie actually carries it
    let idx = index.resolve_index(title).map_err(|e| {
        if title.trim().is_empty() {
            AppError::InvalidInput("Movie title cannot be empty".to_string())
        } else {
            e
        }
    })?;
    let scores = index
        .row(idx)
        .ok_or_else(|| AppError::Internal(format!("No similarity row for index {}", idx)))?;

    let mut ranked: Vec<(usize, f32)> = scores
        .iter()
        .copied()
        .enumerate()
        .filter(|(col, _)| *col != idx)
        .collect();

    // sort_by is stable, so ties stay in column order
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let recommendations: Vec<Recommendation> = ranked
        .into_iter()
        .take(k)
        .filter_map(|(col, score)| {
            index.movie(col).map(|movie| Recommendation {
                movie: movie.clone(),
                score,
            })
        })
        .collect();

    tracing::debug!(
        title = %title,
        row = idx,
        results = recommendations.len(),
        "Recommendations computed"
    );

    Ok(recommendations)
}
