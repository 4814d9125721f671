pub mod recommendations;
pub mod recommender;
pub mod sources;

pub use recommendations::RecommendationService;
