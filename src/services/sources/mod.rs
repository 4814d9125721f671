/// Movie data source abstraction
///
/// The recommender reads three read-only collaborators: the catalog, a user's
/// ratings and a user's seen list. Each source also offers a random catalog
/// sample, which callers serve when no personalized list is available.
use crate::{
    error::AppResult,
    models::{CatalogItem, RatingSignal, SeenSignal, UserId},
};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryMovieSource;
pub use postgres::PgMovieSource;

/// Trait for catalog and user-signal readers
///
/// Every call reflects the source's state at the moment it is made; callers
/// take their snapshot by calling each method once per request.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieSource: Send + Sync {
    /// All catalog items with their attributes
    async fn list_catalog_items(&self) -> AppResult<Vec<CatalogItem>>;

    /// The user's ratings, optionally only those scoring at least `min_score`
    async fn list_user_ratings(
        &self,
        user_id: UserId,
        min_score: Option<i32>,
    ) -> AppResult<Vec<RatingSignal>>;

    /// The user's seen list in insertion order, optionally truncated to `limit`
    async fn list_user_seen(
        &self,
        user_id: UserId,
        limit: Option<usize>,
    ) -> AppResult<Vec<SeenSignal>>;

    /// Up to `count` catalog items chosen uniformly at random
    async fn sample_catalog_items(&self, count: usize) -> AppResult<Vec<CatalogItem>>;

    /// Source name for logging
    fn name(&self) -> &'static str;
}
