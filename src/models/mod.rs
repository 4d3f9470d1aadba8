use serde::{Deserialize, Serialize};

pub mod movie;

pub use movie::Movie;

/// A single recommended movie with its similarity to the query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub movie: Movie,
    pub score: f32,
}

/// One rendered result: a title and the poster to show for it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PosterCard {
    pub movie_id: u64,
    pub title: String,
    pub poster_url: String,
    /// False when `poster_url` is the placeholder
    pub poster_found: bool,
}

/// Recommendations laid out in fixed-width rows, as shown to the user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationGrid {
    /// Title the recommendations were computed for
    pub query: String,
    pub rows: Vec<Vec<PosterCard>>,
}

impl RecommendationGrid {
    /// Total number of cards across all rows
    pub fn len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cards in display order
    pub fn cards(&self) -> impl Iterator<Item = &PosterCard> {
        self.rows.iter().flatten()
    }
}
