pub mod recommendations;
pub mod scorer;

pub use recommendations::RecommendationService;
