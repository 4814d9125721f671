use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{RecommendationResponse, UserId},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub count: Option<usize>,
}

/// Handler for the recommendations endpoint
///
/// Always answers with a list: personalized when the user's taste can be
/// inferred, otherwise a random sample of the catalog.
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(user_id): Path<UserId>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    let count = params.count.unwrap_or(state.default_count);
    if count == 0 || count > state.max_count {
        return Err(AppError::InvalidInput(format!(
            "count must be between 1 and {}",
            state.max_count
        )));
    }

    tracing::info!(
        request_id = %request_id,
        user_id,
        count,
        "Processing recommendation request"
    );

    let response = state
        .recommendations
        .recommend_with_fallback(user_id, count)
        .await?;

    tracing::info!(
        request_id = %request_id,
        strategy = ?response.strategy,
        returned = response.movies.len(),
        "Recommendation request completed"
    );

    Ok(Json(response))
}
