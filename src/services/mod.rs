pub mod recommendations;
pub mod reviews;

pub use recommendations::RecommendationEngine;
pub use reviews::{HttpReviewClient, ReviewClient};
