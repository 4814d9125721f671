use std::collections::BTreeMap;
use std::sync::Arc;

use rand::seq::SliceRandom;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{CatalogItem, MovieId, RatingSignal, SeenSignal, UserId, MAX_SCORE, MIN_SCORE},
    services::sources::MovieSource,
};

/// Movie source backed by process memory
///
/// Used by tests and for running the service without a database. Cloning
/// shares the underlying store.
#[derive(Clone, Default)]
pub struct InMemoryMovieSource {
    inner: Arc<RwLock<MemoryStore>>,
}

#[derive(Default)]
struct MemoryStore {
    movies: BTreeMap<MovieId, CatalogItem>,
    ratings: BTreeMap<(UserId, MovieId), i32>,
    seen: Vec<SeenSignal>,
}

impl InMemoryMovieSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source pre-populated with a catalog
    pub async fn with_catalog(items: impl IntoIterator<Item = CatalogItem>) -> Self {
        let source = Self::new();
        for item in items {
            source.insert_movie(item).await;
        }
        source
    }

    /// Inserts or replaces a catalog item
    pub async fn insert_movie(&self, item: CatalogItem) {
        let mut inner = self.inner.write().await;
        inner.movies.insert(item.id, item);
    }

    /// Records a score, replacing any earlier score by the same user
    pub async fn rate(&self, user_id: UserId, movie_id: MovieId, score: i32) -> AppResult<()> {
        if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            return Err(AppError::InvalidInput(format!(
                "Rating must be between {} and {}, got {}",
                MIN_SCORE, MAX_SCORE, score
            )));
        }

        let mut inner = self.inner.write().await;
        if !inner.movies.contains_key(&movie_id) {
            return Err(AppError::NotFound(format!("Movie {}", movie_id)));
        }
        inner.ratings.insert((user_id, movie_id), score);
        Ok(())
    }

    /// Adds a movie to the user's seen list. Adding it twice is a no-op.
    pub async fn mark_seen(&self, user_id: UserId, movie_id: MovieId) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        if !inner.movies.contains_key(&movie_id) {
            return Err(AppError::NotFound(format!("Movie {}", movie_id)));
        }

        let already_seen = inner
            .seen
            .iter()
            .any(|entry| entry.user_id == user_id && entry.movie_id == movie_id);
        if !already_seen {
            inner.seen.push(SeenSignal::new(user_id, movie_id));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl MovieSource for InMemoryMovieSource {
    async fn list_catalog_items(&self) -> AppResult<Vec<CatalogItem>> {
        let inner = self.inner.read().await;
        Ok(inner.movies.values().cloned().collect())
    }

    async fn list_user_ratings(
        &self,
        user_id: UserId,
        min_score: Option<i32>,
    ) -> AppResult<Vec<RatingSignal>> {
        let inner = self.inner.read().await;
        let ratings = inner
            .ratings
            .range((user_id, MovieId::MIN)..=(user_id, MovieId::MAX))
            .filter(|(_, score)| min_score.map_or(true, |min| **score >= min))
            .map(|(&(user_id, movie_id), &score)| RatingSignal::new(user_id, movie_id, score))
            .collect();
        Ok(ratings)
    }

    async fn list_user_seen(
        &self,
        user_id: UserId,
        limit: Option<usize>,
    ) -> AppResult<Vec<SeenSignal>> {
        let inner = self.inner.read().await;
        let seen = inner
            .seen
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .take(limit.unwrap_or(usize::MAX))
            .copied()
            .collect();
        Ok(seen)
    }

    async fn sample_catalog_items(&self, count: usize) -> AppResult<Vec<CatalogItem>> {
        let inner = self.inner.read().await;
        let items: Vec<&CatalogItem> = inner.movies.values().collect();
        let mut rng = rand::thread_rng();
        Ok(items
            .choose_multiple(&mut rng, count)
            .map(|&item| item.clone())
            .collect())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
