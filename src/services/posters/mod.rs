//! Poster lookup abstraction
//!
//! A resolver turns a movie identifier into an image URL. Resolution never
//! fails from the caller's point of view: any problem downgrades to a
//! placeholder image, but the outcome type keeps the two cases apart so
//! callers and tests can tell a real poster from a degraded one.

pub mod tmdb;

pub use tmdb::TmdbPosterResolver;

/// Result of a single poster lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PosterOutcome {
    /// A poster URL built from the metadata service's response
    Found(String),
    /// The placeholder, used when the lookup yielded nothing usable
    Fallback(String),
}

impl PosterOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, PosterOutcome::Found(_))
    }

    /// Collapses the outcome to the URL to display
    pub fn into_url(self) -> String {
        match self {
            PosterOutcome::Found(url) | PosterOutcome::Fallback(url) => url,
        }
    }
}

/// Trait for poster sources
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PosterResolver: Send + Sync {
    /// Looks up the poster for `movie_id`
    async fn resolve(&self, movie_id: u64) -> PosterOutcome;

    /// Looks up the poster for `movie_id` and returns the URL to display,
    /// which is the placeholder when nothing was found
    async fn fetch_poster(&self, movie_id: u64) -> String {
        self.resolve(movie_id).await.into_url()
    }
}
