//! Similarity ranking with exclusion of already rated or seen items.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::models::{MovieId, RatingSignal, SeenSignal, UserId};

use super::combine::FeatureMatrix;

pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// A catalog row and its score against a profile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedItem {
    /// Row position in the feature matrix (catalog order)
    pub position: usize,
    pub movie_id: MovieId,
    pub score: f64,
}

/// Every movie the user has rated or marked as seen
pub fn exclusion_set(user_id: UserId, ratings: &[RatingSignal], seen: &[SeenSignal]) -> HashSet<MovieId> {
    ratings
        .iter()
        .filter(|rating| rating.user_id == user_id)
        .map(|rating| rating.movie_id)
        .chain(
            seen.iter()
                .filter(|entry| entry.user_id == user_id)
                .map(|entry| entry.movie_id),
        )
        .collect()
}

/// Scores every item against the profile and returns up to `count`
/// non-excluded items, best first.
///
/// Equal scores are ordered by raw quality descending, then by movie id
/// ascending, so the same snapshot always ranks identically.
pub fn rank(
    profile: &[f64],
    matrix: &FeatureMatrix,
    excluded: &HashSet<MovieId>,
    count: usize,
) -> Vec<RankedItem> {
    let mut scored: Vec<RankedItem> = (0..matrix.len())
        .map(|position| RankedItem {
            position,
            movie_id: matrix.movie_id(position),
            score: dot(profile, matrix.row(position)),
        })
        .collect();

    scored.sort_by(|a, b| compare_ranked(matrix, a, b));

    scored
        .into_iter()
        .filter(|item| !excluded.contains(&item.movie_id))
        .take(count)
        .collect()
}

fn compare_ranked(matrix: &FeatureMatrix, a: &RankedItem, b: &RankedItem) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| matrix.quality(b.position).total_cmp(&matrix.quality(a.position)))
        .then_with(|| a.movie_id.cmp(&b.movie_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CatalogItem;
    use crate::services::recommender::combine::FeatureWeights;

    fn catalog() -> Vec<CatalogItem> {
        vec![
            CatalogItem::new(1, "Heat").with_genres(["Crime", "Thriller"]).with_imdb_rating("8.3"),
            CatalogItem::new(2, "Ronin").with_genres(["Crime", "Thriller"]).with_imdb_rating("7.2"),
            CatalogItem::new(3, "Paddington").with_genres(["Family"]).with_imdb_rating("7.3"),
            CatalogItem::new(4, "Collateral").with_genres(["Crime"]).with_imdb_rating("7.5"),
        ]
    }

    #[test]
    fn test_dot() {
        assert_eq!(dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), 32.0);
        assert_eq!(dot(&[], &[]), 0.0);
    }

    #[test]
    fn test_exclusion_set_unions_rated_and_seen() {
        let ratings = vec![RatingSignal::new(1, 10, 2), RatingSignal::new(2, 11, 9)];
        let seen = vec![SeenSignal::new(1, 12), SeenSignal::new(1, 10)];

        let excluded = exclusion_set(1, &ratings, &seen);
        assert_eq!(excluded, HashSet::from([10, 12]));
    }

    #[test]
    fn test_rank_orders_by_similarity_and_skips_excluded() {
        let matrix = FeatureMatrix::build(&catalog(), &FeatureWeights::default());
        let profile = matrix.vector(1).unwrap().to_vec();
        let excluded = HashSet::from([1]);

        let ranked = rank(&profile, &matrix, &excluded, 10);
        let ids: Vec<MovieId> = ranked.iter().map(|item| item.movie_id).collect();

        assert_eq!(ids.len(), 3);
        assert!(!ids.contains(&1));
        // Ronin shares both genres with Heat, Paddington shares none
        assert_eq!(ids[0], 2);
        assert_eq!(ids[2], 3);
        assert!(ranked.windows(2).all(|pair| pair[0].score >= pair[1].score));
    }

    #[test]
    fn test_rank_truncates_to_count() {
        let matrix = FeatureMatrix::build(&catalog(), &FeatureWeights::default());
        let profile = matrix.vector(1).unwrap().to_vec();

        let ranked = rank(&profile, &matrix, &HashSet::new(), 2);
        assert_eq!(ranked.len(), 2);
        // An item is always most similar to itself
        assert_eq!(ranked[0].movie_id, 1);

        assert!(rank(&profile, &matrix, &HashSet::new(), 0).is_empty());
    }

    #[test]
    fn test_ties_break_on_quality_then_id() {
        let items = vec![
            CatalogItem::new(5, "Twin B").with_imdb_rating("6.0"),
            CatalogItem::new(3, "Twin A").with_imdb_rating("6.0"),
            CatalogItem::new(9, "Better").with_imdb_rating("9.0"),
        ];
        let weights = FeatureWeights {
            description: 0.0,
            genre: 0.0,
            imdb: 1.0,
            stats: 0.0,
        };
        let matrix = FeatureMatrix::build(&items, &weights);
        let profile = matrix.vector(5).unwrap().to_vec();

        let ranked = rank(&profile, &matrix, &HashSet::new(), 3);
        let ids: Vec<MovieId> = ranked.iter().map(|item| item.movie_id).collect();
        assert_eq!(ids, vec![9, 3, 5]);
    }

    #[test]
    fn test_rank_empty_matrix() {
        let matrix = FeatureMatrix::build(&[], &FeatureWeights::default());
        assert!(rank(&[0.0; 5], &matrix, &HashSet::new(), 4).is_empty());
    }
}
