use std::{sync::Arc, time::Duration};

use chrono::Months;

use crate::{
    db::FilmRepository,
    error::{AppError, AppResult},
    models::{average_rating, Pagination, Recommendation, RecommendationResponse},
    services::ReviewClient,
};

/// Release-date proximity on each side of the target film, in years
const WINDOW_YEARS: u32 = 15;
/// A candidate needs at least this many reviews to qualify
const MIN_REVIEWS: usize = 5;
/// A candidate needs at least this average rating to qualify
const MIN_AVERAGE_RATING: f64 = 4.0;

/// Computes film recommendations ranked by externally-sourced review quality
///
/// Candidates share the target film's genre and fall within ±15 years of
/// its release date. They qualify as recommendations when the review
/// aggregation service reports at least 5 reviews averaging 4.0 or better.
/// Output order is the candidate-query order; there is no rating sort.
pub struct RecommendationEngine {
    repository: Arc<dyn FilmRepository>,
    review_client: Arc<dyn ReviewClient>,
    review_timeout: Duration,
}

impl RecommendationEngine {
    pub fn new(
        repository: Arc<dyn FilmRepository>,
        review_client: Arc<dyn ReviewClient>,
        review_timeout: Duration,
    ) -> Self {
        Self {
            repository,
            review_client,
            review_timeout,
        }
    }

    /// Runs the full recommendation pipeline for one film
    pub async fn get_recommendations(
        &self,
        film_id: i64,
        pagination: Pagination,
    ) -> AppResult<RecommendationResponse> {
        let target = self
            .repository
            .find_by_id(film_id)
            .await?
            .ok_or(AppError::FilmNotFound)?;

        // Calendar arithmetic via whole months keeps month/day intact;
        // Feb 29 clamps to Feb 28 in non-leap years.
        let months = Months::new(WINDOW_YEARS * 12);
        let min_date = target
            .release_date
            .checked_sub_months(months)
            .ok_or_else(|| AppError::Internal("release date out of range".to_string()))?;
        let max_date = target
            .release_date
            .checked_add_months(months)
            .ok_or_else(|| AppError::Internal("release date out of range".to_string()))?;

        let candidates = self
            .repository
            .find_by_genre_and_date_range(target.genre_id, min_date, max_date, target.id)
            .await?;

        // The query already excludes the target, but repository semantics
        // are opaque; a film must never recommend itself.
        let candidates: Vec<_> = candidates
            .into_iter()
            .filter(|candidate| candidate.id != target.id)
            .collect();

        if candidates.is_empty() {
            tracing::info!(film_id, "No candidates in genre/date window");
            return Ok(RecommendationResponse {
                recommendations: Vec::new(),
                meta: pagination,
            });
        }

        let film_ids: Vec<i64> = candidates.iter().map(|c| c.id).collect();

        let reviews_by_film = tokio::time::timeout(
            self.review_timeout,
            self.review_client.get_reviews(&film_ids),
        )
        .await
        .map_err(|_| AppError::ReviewServiceTimeout(self.review_timeout.as_secs()))??;

        // Candidate-query order is preserved end-to-end; a candidate with
        // no review data is excluded, absence is not a zero rating.
        let qualifying: Vec<Recommendation> = candidates
            .iter()
            .filter_map(|candidate| {
                let reviews = reviews_by_film.get(&candidate.id)?;
                if reviews.len() < MIN_REVIEWS {
                    return None;
                }
                let average = average_rating(reviews)?;
                if average < MIN_AVERAGE_RATING {
                    return None;
                }
                Some(Recommendation::from_candidate(candidate, average, reviews.len()))
            })
            .collect();

        tracing::info!(
            film_id,
            candidate_count = film_ids.len(),
            recommendation_count = qualifying.len(),
            "Recommendations computed"
        );

        // The window slices the fully filtered list, not the raw candidates.
        let recommendations = qualifying
            .into_iter()
            .skip(pagination.offset as usize)
            .take(pagination.limit as usize)
            .collect();

        Ok(RecommendationResponse {
            recommendations,
            meta: pagination,
        })
    }
}
