//! TMDB poster resolver
//!
//! API Flow:
//! 1. Details: /3/movie/{movie_id}?api_key=... → JSON with optional `poster_path`
//! 2. Poster URL: {image_url}{poster_path}
//!
//! One request per lookup, bounded by the client timeout. No retry, no cache.

use reqwest::Client as HttpClient;
use serde::Deserialize;
use std::time::Duration;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    services::posters::{PosterOutcome, PosterResolver},
};

/// Subset of the TMDB movie details response used for posters
#[derive(Debug, Deserialize)]
struct TmdbMovieDetails {
    #[serde(default)]
    poster_path: Option<String>,
}

#[derive(Clone)]
pub struct TmdbPosterResolver {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_url: String,
    placeholder_url: String,
}

impl TmdbPosterResolver {
    pub fn new(
        api_key: String,
        api_url: String,
        image_url: String,
        placeholder_url: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            image_url,
            placeholder_url,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
            config.tmdb_image_url.clone(),
            config.placeholder_poster_url.clone(),
            config.poster_timeout(),
        )
    }

    /// Fetches the movie details and extracts a non-empty `poster_path`
    async fn lookup_poster_path(&self, movie_id: u64) -> AppResult<Option<String>> {
        let url = format!("{}/3/movie/{}", self.api_url, movie_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let details: TmdbMovieDetails = response.json().await?;

        Ok(details.poster_path.filter(|path| !path.is_empty()))
    }
}

#[async_trait::async_trait]
impl PosterResolver for TmdbPosterResolver {
    async fn resolve(&self, movie_id: u64) -> PosterOutcome {
        match self.lookup_poster_path(movie_id).await {
            Ok(Some(poster_path)) => {
                PosterOutcome::Found(format!("{}{}", self.image_url, poster_path))
            }
            Ok(None) => {
                tracing::debug!(movie_id, "TMDB response has no poster_path");
                PosterOutcome::Fallback(self.placeholder_url.clone())
            }
            Err(e) => {
                tracing::warn!(movie_id, error = %e, "Poster lookup failed, using placeholder");
                PosterOutcome::Fallback(self.placeholder_url.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const IMAGE_URL: &str = "https://image.tmdb.org/t/p/w500";
    const PLACEHOLDER: &str = "https://via.placeholder.com/300x450?text=No+Poster";

    fn create_test_resolver(api_url: &str) -> TmdbPosterResolver {
        TmdbPosterResolver::new(
            "test_key".to_string(),
            api_url.to_string(),
            IMAGE_URL.to_string(),
            PLACEHOLDER.to_string(),
            Duration::from_secs(2),
        )
        .unwrap()
    }

    async fn mount_details(server: &MockServer, movie_id: u64, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(format!("/3/movie/{}", movie_id)))
            .and(query_param("api_key", "test_key"))
            .respond_with(response)
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_poster_path_builds_cdn_url() {
        let server = MockServer::start().await;
        mount_details(
            &server,
            19995,
            ResponseTemplate::new(200).set_body_json(json!({
                "id": 19995,
                "title": "Avatar",
                "poster_path": "/xyz.jpg"
            })),
        )
        .await;

        let resolver = create_test_resolver(&server.uri());
        let outcome = resolver.resolve(19995).await;

        assert_eq!(
            outcome,
            PosterOutcome::Found("https://image.tmdb.org/t/p/w500/xyz.jpg".to_string())
        );
    }

    #[tokio::test]
    async fn test_missing_poster_path_falls_back() {
        let server = MockServer::start().await;
        mount_details(&server, 1, ResponseTemplate::new(200).set_body_json(json!({}))).await;

        let resolver = create_test_resolver(&server.uri());
        assert_eq!(
            resolver.resolve(1).await,
            PosterOutcome::Fallback(PLACEHOLDER.to_string())
        );
    }

    #[tokio::test]
    async fn test_null_and_empty_poster_path_fall_back() {
        let server = MockServer::start().await;
        mount_details(
            &server,
            2,
            ResponseTemplate::new(200).set_body_json(json!({ "poster_path": null })),
        )
        .await;
        mount_details(
            &server,
            3,
            ResponseTemplate::new(200).set_body_json(json!({ "poster_path": "" })),
        )
        .await;

        let resolver = create_test_resolver(&server.uri());
        assert_eq!(resolver.fetch_poster(2).await, PLACEHOLDER);
        assert_eq!(resolver.fetch_poster(3).await, PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_malformed_json_falls_back() {
        let server = MockServer::start().await;
        mount_details(
            &server,
            4,
            ResponseTemplate::new(200).set_body_string("{ this is not json"),
        )
        .await;

        let resolver = create_test_resolver(&server.uri());
        assert!(!resolver.resolve(4).await.is_found());
    }

    #[tokio::test]
    async fn test_error_status_falls_back() {
        let server = MockServer::start().await;
        mount_details(
            &server,
            5,
            ResponseTemplate::new(401).set_body_json(json!({
                "status_code": 7,
                "status_message": "Invalid API key: You must be granted a valid key."
            })),
        )
        .await;

        let resolver = create_test_resolver(&server.uri());
        assert_eq!(resolver.fetch_poster(5).await, PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_slow_response_times_out_to_placeholder() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/movie/6"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "poster_path": "/late.jpg" }))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let resolver = TmdbPosterResolver::new(
            "test_key".to_string(),
            server.uri(),
            IMAGE_URL.to_string(),
            PLACEHOLDER.to_string(),
            Duration::from_millis(100),
        )
        .unwrap();

        assert_eq!(
            resolver.resolve(6).await,
            PosterOutcome::Fallback(PLACEHOLDER.to_string())
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_falls_back() {
        // Nothing listens on port 9 of localhost
        let resolver = create_test_resolver("http://127.0.0.1:9");
        assert_eq!(resolver.fetch_poster(7).await, PLACEHOLDER);
    }

    #[test]
    fn test_trailing_slash_trimmed_from_api_url() {
        let resolver = create_test_resolver("https://api.themoviedb.org/");
        assert_eq!(resolver.api_url, "https://api.themoviedb.org");
    }

    #[test]
    fn test_details_deserialization() {
        let details: TmdbMovieDetails =
            serde_json::from_str(r#"{"id": 1, "poster_path": "/a.jpg", "vote_average": 7.2}"#)
                .unwrap();
        assert_eq!(details.poster_path, Some("/a.jpg".to_string()));
    }
}
