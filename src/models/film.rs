use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

use super::Pagination;

/// A full film row as stored by the repository
///
/// Only id, release date and genre drive the recommendation pipeline;
/// the remaining columns document the row shape read by `find_by_id`.
#[derive(Debug, Clone, FromRow)]
pub struct Film {
    pub id: i64,
    pub title: String,
    pub release_date: NaiveDate,
    pub genre_id: i64,
    pub tagline: String,
    pub revenue: i64,
    pub budget: i64,
    pub runtime: i64,
    pub original_language: String,
    pub status: String,
}

/// A film projected for candidate selection, with the genre name joined in
///
/// Transient: constructed per request and discarded after the response.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct CandidateFilm {
    pub id: i64,
    pub title: String,
    pub release_date: NaiveDate,
    pub genre: String,
}

/// A candidate that passed the review-volume and review-quality thresholds
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: i64,
    pub title: String,
    pub release_date: NaiveDate,
    pub genre: String,
    pub average_rating: f64,
    pub reviews: usize,
}

impl Recommendation {
    /// Merges a candidate with its computed review statistics
    pub fn from_candidate(candidate: &CandidateFilm, average_rating: f64, reviews: usize) -> Self {
        Self {
            id: candidate.id,
            title: candidate.title.clone(),
            release_date: candidate.release_date,
            genre: candidate.genre.clone(),
            average_rating,
            reviews,
        }
    }
}

/// Response envelope for the recommendations endpoint
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<Recommendation>,
    pub meta: Pagination,
}
