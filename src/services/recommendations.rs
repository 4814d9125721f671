use std::sync::Arc;
use std::time::Instant;

use crate::{
    error::{AppError, AppResult},
    models::{FallbackReason, RecommendationResponse, UserId},
    services::{
        recommender::{self, RecommenderConfig, Recommendations},
        sources::MovieSource,
    },
};

/// Generates personalized watch recommendations
///
/// Reads a fresh snapshot of the catalog and the user's ratings and seen list
/// on every call, then runs the content-based recommender over it. Nothing is
/// cached between calls.
#[derive(Clone)]
pub struct RecommendationService {
    source: Arc<dyn MovieSource>,
    config: RecommenderConfig,
}

impl RecommendationService {
    pub fn new(source: Arc<dyn MovieSource>, config: RecommenderConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Ranks up to `count` unseen movies for the user.
    ///
    /// Returns `Recommendations::ColdStart` when no taste can be inferred.
    /// Source read failures propagate unchanged; nothing is retried.
    pub async fn get_recommendations(
        &self,
        user_id: UserId,
        count: usize,
    ) -> AppResult<Recommendations> {
        let start = Instant::now();

        let (catalog, ratings, seen) = tokio::try_join!(
            self.source.list_catalog_items(),
            self.source.list_user_ratings(user_id, None),
            self.source.list_user_seen(user_id, None),
        )?;

        tracing::debug!(
            source = self.source.name(),
            catalog_size = catalog.len(),
            ratings = ratings.len(),
            seen = seen.len(),
            "Loaded recommendation snapshot"
        );

        let config = self.config.clone();
        let recommendations = tokio::task::spawn_blocking(move || {
            recommender::recommend(user_id, &catalog, &ratings, &seen, count, &config)
        })
        .await
        .map_err(|e| AppError::Internal(format!("Recommender task failed: {}", e)))?;

        tracing::info!(
            user_id,
            requested = count,
            returned = recommendations.movies().len(),
            cold_start = recommendations.is_cold_start(),
            processing_time_ms = start.elapsed().as_millis(),
            "Recommendations computed"
        );

        Ok(recommendations)
    }

    /// Personalized recommendations, or a random catalog sample when the user
    /// is a cold start or the recommender could not read its inputs.
    ///
    /// Only a failure of the fallback sample itself is returned as an error.
    pub async fn recommend_with_fallback(
        &self,
        user_id: UserId,
        count: usize,
    ) -> AppResult<RecommendationResponse> {
        match self.get_recommendations(user_id, count).await {
            Ok(Recommendations::Personalized(movies)) => {
                Ok(RecommendationResponse::personalized(user_id, movies))
            }
            Ok(Recommendations::ColdStart) => {
                tracing::info!(user_id, "Cold start, serving random picks");
                self.fallback(user_id, count, FallbackReason::ColdStart).await
            }
            Err(e) => {
                tracing::warn!(
                    user_id,
                    error = %e,
                    "Recommender failed, serving random picks"
                );
                self.fallback(user_id, count, FallbackReason::EngineError).await
            }
        }
    }

    async fn fallback(
        &self,
        user_id: UserId,
        count: usize,
        reason: FallbackReason,
    ) -> AppResult<RecommendationResponse> {
        let movies = self.source.sample_catalog_items(count).await?;
        Ok(RecommendationResponse::fallback(user_id, reason, movies))
    }
}
