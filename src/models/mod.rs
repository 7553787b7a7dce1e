pub mod film;
pub mod pagination;
pub mod review;

pub use film::{CandidateFilm, Film, Recommendation, RecommendationResponse};
pub use pagination::{Pagination, PaginationParams};
pub use review::{average_rating, FilmReviews, Review};
