use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::{FilmReviews, Review},
};

/// Batch access to externally aggregated film reviews
///
/// One call covers the whole candidate id set; per-film lookups are not
/// part of the contract, so external round-trips stay bounded per request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewClient: Send + Sync {
    /// Fetches review collections for the given film ids, keyed by film id
    ///
    /// Films the service knows nothing about are simply absent from the map.
    async fn get_reviews(&self, film_ids: &[i64]) -> AppResult<HashMap<i64, Vec<Review>>>;
}

/// HTTP client for the review aggregation API
///
/// The API takes a comma-joined id list (`?films=1,2,3`) and responds
/// with a JSON array of `{film_id, reviews}` objects.
#[derive(Clone)]
pub struct HttpReviewClient {
    http_client: HttpClient,
    base_url: String,
}

impl HttpReviewClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url,
        }
    }

    async fn send(&self, films_param: &str) -> Result<reqwest::Response, reqwest::Error> {
        self.http_client
            .get(&self.base_url)
            .query(&[("films", films_param)])
            .send()
            .await
    }
}

#[async_trait]
impl ReviewClient for HttpReviewClient {
    async fn get_reviews(&self, film_ids: &[i64]) -> AppResult<HashMap<i64, Vec<Review>>> {
        let films_param = film_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");

        tracing::debug!(film_count = film_ids.len(), "Fetching review batch");

        // One retry on transport failure only; HTTP error statuses and
        // malformed bodies are application-level and fail immediately.
        let response = match self.send(&films_param).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Review request failed, retrying once");
                self.send(&films_param)
                    .await
                    .map_err(|e| AppError::ReviewService(e.to_string()))?
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!(status = %status, "Review API request failed");
            return Err(AppError::ReviewService(format!(
                "review API returned status {}",
                status
            )));
        }

        let payload: Vec<FilmReviews> = response
            .json()
            .await
            .map_err(|e| AppError::ReviewService(format!("malformed review payload: {}", e)))?;

        tracing::debug!(film_count = payload.len(), "Review batch fetched");

        Ok(payload
            .into_iter()
            .map(|entry| (entry.film_id, entry.reviews))
            .collect())
    }
}
