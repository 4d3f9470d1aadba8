use crate::{
    error::AppResult,
    index::SimilarityIndex,
    models::{PosterCard, RecommendationGrid},
    services::{posters::PosterResolver, recommendations},
};

/// Cards per grid row
pub const GRID_COLUMNS: usize = 5;

/// Runs a recommendation query and attaches a poster to every result
///
/// Posters are fetched one after another in result order, then the cards are
/// laid out in rows of `columns`. A query with fewer results than `k` simply
/// yields fewer cards.
pub async fn build_grid(
    index: &SimilarityIndex,
    posters: &dyn PosterResolver,
    title: &str,
    k: usize,
    columns: usize,
) -> AppResult<RecommendationGrid> {
    let recommendations = recommendations::recommend(index, title, k)?;

    let mut cards = Vec::with_capacity(recommendations.len());
    for rec in recommendations {
        let outcome = posters.resolve(rec.movie.movie_id).await;
        cards.push(PosterCard {
            movie_id: rec.movie.movie_id,
            title: rec.movie.title,
            poster_found: outcome.is_found(),
            poster_url: outcome.into_url(),
        });
    }

    let placeholders = cards.iter().filter(|c| !c.poster_found).count();
    tracing::info!(
        title = %title,
        results = cards.len(),
        placeholders,
        "Recommendation grid built"
    );

    let rows = cards
        .chunks(columns.max(1))
        .map(<[PosterCard]>::to_vec)
        .collect();

    Ok(RecommendationGrid {
        query: title.to_string(),
        rows,
    })
}
