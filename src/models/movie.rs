use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A movie as stored in the similarity artifact
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    /// TMDB identifier, used for poster lookups
    pub movie_id: u64,
    /// Display title, also the lookup key for recommendations
    pub title: String,
    /// Any other descriptive fields carried by the artifact (genres, overview, ...)
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Movie {
    /// Creates a movie with no extra details
    pub fn new(movie_id: u64, title: impl Into<String>) -> Self {
        Self {
            movie_id,
            title: title.into(),
            details: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_movie() {
        let movie = Movie::new(19995, "Avatar");
        assert_eq!(movie.movie_id, 19995);
        assert_eq!(movie.title, "Avatar");
        assert!(movie.details.is_empty());
    }

    #[test]
    fn test_movie_keeps_extra_fields() {
        let json = r#"{
            "movie_id": 285,
            "title": "Pirates of the Caribbean: At World's End",
            "genres": ["Adventure", "Fantasy", "Action"],
            "overview": "Captain Barbossa, long believed to be dead..."
        }"#;

        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.movie_id, 285);
        assert_eq!(movie.title, "Pirates of the Caribbean: At World's End");
        assert_eq!(movie.details.len(), 2);
        assert_eq!(movie.details["genres"][0], "Adventure");
    }

    #[test]
    fn test_movie_serializes_details_inline() {
        let mut movie = Movie::new(1, "A");
        movie
            .details
            .insert("tagline".to_string(), Value::String("tag".to_string()));

        let json = serde_json::to_value(&movie).unwrap();
        assert_eq!(json["movie_id"], 1);
        assert_eq!(json["tagline"], "tag");
    }
}
