use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MovieId, UserId};

/// Lowest score a user can give a movie
pub const MIN_SCORE: i32 = 1;
/// Highest score a user can give a movie
pub const MAX_SCORE: i32 = 10;

/// A user's score for a movie. At most one exists per (user, movie) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingSignal {
    pub user_id: UserId,
    pub movie_id: MovieId,
    /// Integer score in `MIN_SCORE..=MAX_SCORE`
    pub score: i32,
}

impl RatingSignal {
    pub fn new(user_id: UserId, movie_id: MovieId, score: i32) -> Self {
        Self {
            user_id,
            movie_id,
            score,
        }
    }
}

/// Records that a user has watched a movie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeenSignal {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub added_at: DateTime<Utc>,
}

impl SeenSignal {
    pub fn new(user_id: UserId, movie_id: MovieId) -> Self {
        Self {
            user_id,
            movie_id,
            added_at: Utc::now(),
        }
    }
}
