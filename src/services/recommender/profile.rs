//! User profile synthesis from sparse taste signals.

use serde::Serialize;
use std::collections::HashSet;

use crate::models::{MovieId, RatingSignal, SeenSignal, UserId};

use super::combine::FeatureMatrix;

/// Where a user's liked items came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LikedSource {
    /// Ratings at or above the liked threshold
    Ratings,
    /// Leading entries of the seen list, used when nothing is rated highly
    Seen,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikedItems {
    pub ids: Vec<MovieId>,
    pub source: LikedSource,
}

/// Selects the items that represent a user's taste.
///
/// Ratings of at least `threshold` win. Without any, the first `seen_limit`
/// seen entries are used in the order the source returned them. `None` means
/// a cold start.
pub fn liked_items(
    user_id: UserId,
    ratings: &[RatingSignal],
    seen: &[SeenSignal],
    threshold: i32,
    seen_limit: usize,
) -> Option<LikedItems> {
    let rated: Vec<MovieId> = ratings
        .iter()
        .filter(|rating| rating.user_id == user_id && rating.score >= threshold)
        .map(|rating| rating.movie_id)
        .collect();

    if !rated.is_empty() {
        return Some(LikedItems {
            ids: rated,
            source: LikedSource::Ratings,
        });
    }

    let watched: Vec<MovieId> = seen
        .iter()
        .filter(|entry| entry.user_id == user_id)
        .take(seen_limit)
        .map(|entry| entry.movie_id)
        .collect();

    if watched.is_empty() {
        None
    } else {
        Some(LikedItems {
            ids: watched,
            source: LikedSource::Seen,
        })
    }
}

/// Averaged feature vector of a user's liked items
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub vector: Vec<f64>,
    /// Number of liked items found in the snapshot
    pub item_count: usize,
    pub source: LikedSource,
}

/// Component-wise mean of the liked items' vectors.
///
/// The mean is not renormalized, so scores against it are proportional to,
/// not equal to, cosine similarity. Liked ids missing from the snapshot are
/// skipped; `None` if none remain.
pub fn build_profile(matrix: &FeatureMatrix, liked: &LikedItems) -> Option<UserProfile> {
    let mut vector = vec![0.0; matrix.width()];
    let mut counted: HashSet<MovieId> = HashSet::new();

    for &movie_id in &liked.ids {
        let Some(row) = matrix.vector(movie_id) else {
            continue;
        };
        if !counted.insert(movie_id) {
            continue;
        }
        for (acc, x) in vector.iter_mut().zip(row) {
            *acc += x;
        }
    }

    if counted.is_empty() {
        return None;
    }

    let n = counted.len() as f64;
    for acc in vector.iter_mut() {
        *acc /= n;
    }

    Some(UserProfile {
        vector,
        item_count: counted.len(),
        source: liked.source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CatalogItem;
    use crate::services::recommender::combine::FeatureWeights;

    fn seen(user_id: UserId, movie_id: MovieId) -> SeenSignal {
        SeenSignal::new(user_id, movie_id)
    }

    #[test]
    fn test_liked_items_prefers_high_ratings() {
        let ratings = vec![
            RatingSignal::new(1, 10, 7),
            RatingSignal::new(1, 11, 6),
            RatingSignal::new(1, 12, 10),
            RatingSignal::new(2, 13, 9),
        ];
        let watched = vec![seen(1, 20)];

        let liked = liked_items(1, &ratings, &watched, 7, 5).unwrap();
        assert_eq!(liked.source, LikedSource::Ratings);
        assert_eq!(liked.ids, vec![10, 12]);
    }

    #[test]
    fn test_liked_items_falls_back_to_first_seen() {
        let ratings = vec![RatingSignal::new(1, 10, 3)];
        let watched: Vec<SeenSignal> = (20..28).map(|movie_id| seen(1, movie_id)).collect();

        let liked = liked_items(1, &ratings, &watched, 7, 5).unwrap();
        assert_eq!(liked.source, LikedSource::Seen);
        assert_eq!(liked.ids, vec![20, 21, 22, 23, 24]);
    }

    #[test]
    fn test_liked_items_cold_start() {
        assert!(liked_items(1, &[], &[], 7, 5).is_none());

        let low = vec![RatingSignal::new(1, 10, 2)];
        assert!(liked_items(1, &low, &[], 7, 5).is_none());

        let other_user = vec![seen(2, 10)];
        assert!(liked_items(1, &[], &other_user, 7, 5).is_none());
    }

    #[test]
    fn test_profile_is_mean_of_liked_vectors() {
        let catalog = vec![
            CatalogItem::new(1, "Alien").with_genres(["Horror"]).with_imdb_rating("8.5"),
            CatalogItem::new(2, "Up").with_genres(["Animation"]).with_imdb_rating("8.3"),
            CatalogItem::new(3, "Cats").with_genres(["Musical"]).with_imdb_rating("2.8"),
        ];
        let matrix = FeatureMatrix::build(&catalog, &FeatureWeights::default());
        let liked = LikedItems {
            ids: vec![1, 2, 2, 99],
            source: LikedSource::Ratings,
        };

        let profile = build_profile(&matrix, &liked).unwrap();
        assert_eq!(profile.item_count, 2);
        assert_eq!(profile.vector.len(), matrix.width());

        let first = matrix.vector(1).unwrap();
        let second = matrix.vector(2).unwrap();
        for (i, value) in profile.vector.iter().enumerate() {
            assert!((value - (first[i] + second[i]) / 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_profile_none_when_liked_items_missing_from_catalog() {
        let catalog = vec![CatalogItem::new(1, "Alien")];
        let matrix = FeatureMatrix::build(&catalog, &FeatureWeights::default());
        let liked = LikedItems {
            ids: vec![5, 6],
            source: LikedSource::Seen,
        };

        assert!(build_profile(&matrix, &liked).is_none());
    }
}
