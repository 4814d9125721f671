pub mod movie;
pub mod recommendation;
pub mod signals;

pub use movie::{CatalogItem, ContentRating, MovieId, UserId};
pub use recommendation::{
    FallbackReason, RecommendationResponse, RecommendedMovie, ScoredMovie, Strategy,
};
pub use signals::{RatingSignal, SeenSignal, MAX_SCORE, MIN_SCORE};
