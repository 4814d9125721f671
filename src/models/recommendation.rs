use serde::{Deserialize, Serialize};

use super::{CatalogItem, MovieId, UserId};

/// A catalog item paired with its similarity to a user's profile
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMovie {
    pub movie: CatalogItem,
    pub score: f64,
}

/// How a recommendation list was produced
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Personalized,
    Fallback,
}

/// Why the non-personalized list was served instead
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// No liked items could be derived for the user
    ColdStart,
    /// Reading the catalog or the user's signals failed
    EngineError,
}

/// A movie as returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendedMovie {
    pub id: MovieId,
    pub title: String,
    pub description: String,
    pub genres: Vec<String>,
    pub imdb_rating: Option<String>,
    /// Similarity to the user's profile; absent for fallback picks
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub score: Option<f64>,
}

impl From<ScoredMovie> for RecommendedMovie {
    fn from(scored: ScoredMovie) -> Self {
        let mut movie = RecommendedMovie::from(scored.movie);
        movie.score = Some(scored.score);
        movie
    }
}

impl From<CatalogItem> for RecommendedMovie {
    fn from(item: CatalogItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            description: item.description,
            genres: item.genres,
            imdb_rating: item.imdb_rating,
            score: None,
        }
    }
}

/// Response body of the recommendations endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResponse {
    pub user_id: UserId,
    pub strategy: Strategy,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reason: Option<FallbackReason>,
    pub movies: Vec<RecommendedMovie>,
}

impl RecommendationResponse {
    pub fn personalized(user_id: UserId, movies: Vec<ScoredMovie>) -> Self {
        Self {
            user_id,
            strategy: Strategy::Personalized,
            reason: None,
            movies: movies.into_iter().map(RecommendedMovie::from).collect(),
        }
    }

    pub fn fallback(user_id: UserId, reason: FallbackReason, movies: Vec<CatalogItem>) -> Self {
        Self {
            user_id,
            strategy: Strategy::Fallback,
            reason: Some(reason),
            movies: movies.into_iter().map(RecommendedMovie::from).collect(),
        }
    }
}
