//! In-memory similarity index
//!
//! Holds the ordered movie list and the dense similarity matrix produced by
//! the offline feature pipeline. Row `i` of the matrix corresponds to
//! `movies[i]`. The index is built once at startup and only read afterwards.

use serde::Deserialize;
use std::path::Path;

use crate::{
    error::{AppError, AppResult, LoadError},
    models::Movie,
};

/// On-disk layout of the similarity artifact
#[derive(Debug, Deserialize)]
struct Artifact {
    movies: Vec<Movie>,
    similarity: Vec<Vec<f32>>,
}

#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    movies: Vec<Movie>,
    matrix: Vec<Vec<f32>>,
}

impl SimilarityIndex {
    /// Loads and validates the JSON artifact at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let artifact: Artifact = serde_json::from_str(&raw)?;
        let index = Self::from_parts(artifact.movies, artifact.similarity)?;

        tracing::info!(
            path = %path.display(),
            movies = index.len(),
            "Loaded similarity index"
        );

        Ok(index)
    }

    /// Builds an index from in-memory parts, enforcing that the matrix is
    /// square and aligned with the movie list
    pub fn from_parts(movies: Vec<Movie>, matrix: Vec<Vec<f32>>) -> Result<Self, LoadError> {
        let n = movies.len();

        if matrix.len() != n {
            return Err(LoadError::Schema(format!(
                "similarity matrix has {} rows but there are {} movies",
                matrix.len(),
                n
            )));
        }

        if let Some((row, scores)) = matrix.iter().enumerate().find(|(_, r)| r.len() != n) {
            return Err(LoadError::Schema(format!(
                "similarity row {} has {} columns, expected {}",
                row,
                scores.len(),
                n
            )));
        }

        Ok(Self { movies, matrix })
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn movie(&self, row: usize) -> Option<&Movie> {
        self.movies.get(row)
    }

    /// Similarity scores of `row` against every movie, in row order
    pub fn row(&self, row: usize) -> Option<&[f32]> {
        self.matrix.get(row).map(Vec::as_slice)
    }

    /// All titles in row order, for populating a selection control
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.movies.iter().map(|m| m.title.as_str())
    }

    /// Resolves an exact title to its row
    ///
    /// Titles are expected to be unique. When they are not, the first row
    /// carrying the title wins.
    pub fn resolve_index(&self, title: &str) -> AppResult<usize> {
        self.movies
            .iter()
            .position(|m| m.title == title)
            .ok_or_else(|| AppError::NotFound(format!("Movie '{}' is not in the index", title)))
    }
}
