//! Content-based recommendation engine
//!
//! Pipeline, one catalog snapshot per call:
//! 1. `features` fits text/genre vocabularies and extracts raw blocks per item
//! 2. `normalize` makes the blocks commensurable
//! 3. `combine` weights and concatenates them into unit-length vectors
//! 4. `profile` averages the vectors of the user's liked items
//! 5. `ranking` scores the catalog against the profile and drops seen/rated items
//!
//! Everything here is synchronous and allocation-local: nothing is cached
//! between calls and no input is mutated.

pub mod combine;
pub mod features;
pub mod normalize;
pub mod profile;
pub mod ranking;
pub mod vocabulary;

use serde::{Deserialize, Serialize};

use crate::models::{CatalogItem, RatingSignal, ScoredMovie, SeenSignal, UserId};

pub use combine::{BlockLayout, FeatureMatrix, FeatureWeights};
pub use profile::{LikedItems, LikedSource, UserProfile};
pub use ranking::RankedItem;

/// Minimum rating that marks a movie as liked
pub const DEFAULT_LIKED_THRESHOLD: i32 = 7;
/// Seen entries used to build a profile when nothing is rated highly
pub const DEFAULT_SEEN_FALLBACK_LIMIT: usize = 5;

/// Tunables of the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommenderConfig {
    pub weights: FeatureWeights,
    pub liked_threshold: i32,
    pub seen_fallback_limit: usize,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            weights: FeatureWeights::default(),
            liked_threshold: DEFAULT_LIKED_THRESHOLD,
            seen_fallback_limit: DEFAULT_SEEN_FALLBACK_LIMIT,
        }
    }
}

/// Outcome of a recommendation call
#[derive(Debug, Clone, PartialEq)]
pub enum Recommendations {
    /// Ranked unseen movies, best first. May be empty when the catalog holds
    /// nothing the user has not already rated or seen.
    Personalized(Vec<ScoredMovie>),
    /// No liked items could be derived; the caller should serve a
    /// non-personalized list instead
    ColdStart,
}

impl Recommendations {
    pub fn is_cold_start(&self) -> bool {
        matches!(self, Recommendations::ColdStart)
    }

    /// Recommended movies; empty for a cold start
    pub fn movies(&self) -> &[ScoredMovie] {
        match self {
            Recommendations::Personalized(movies) => movies,
            Recommendations::ColdStart => &[],
        }
    }

    pub fn into_movies(self) -> Vec<ScoredMovie> {
        match self {
            Recommendations::Personalized(movies) => movies,
            Recommendations::ColdStart => Vec::new(),
        }
    }
}

/// Ranks up to `count` catalog movies the user has neither rated nor seen.
///
/// `ratings` and `seen` are the user's signals; entries belonging to other
/// users are ignored.
pub fn recommend(
    user_id: UserId,
    catalog: &[CatalogItem],
    ratings: &[RatingSignal],
    seen: &[SeenSignal],
    count: usize,
    config: &RecommenderConfig,
) -> Recommendations {
    let Some(liked) = profile::liked_items(
        user_id,
        ratings,
        seen,
        config.liked_threshold,
        config.seen_fallback_limit,
    ) else {
        tracing::debug!(user_id, "No liked items, cold start");
        return Recommendations::ColdStart;
    };

    if catalog.is_empty() {
        return Recommendations::Personalized(Vec::new());
    }

    let matrix = FeatureMatrix::build(catalog, &config.weights);

    let Some(user_profile) = profile::build_profile(&matrix, &liked) else {
        tracing::debug!(
            user_id,
            liked = liked.ids.len(),
            "Liked items missing from catalog, cold start"
        );
        return Recommendations::ColdStart;
    };

    tracing::debug!(
        user_id,
        liked_source = ?user_profile.source,
        liked_items = user_profile.item_count,
        "Built user profile"
    );

    let excluded = ranking::exclusion_set(user_id, ratings, seen);
    let ranked = ranking::rank(&user_profile.vector, &matrix, &excluded, count);

    Recommendations::Personalized(
        ranked
            .into_iter()
            .map(|item| ScoredMovie {
                movie: catalog[item.position].clone(),
                score: item.score,
            })
            .collect(),
    )
}
