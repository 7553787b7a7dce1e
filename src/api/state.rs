use std::{sync::Arc, time::Duration};

use sqlx::SqlitePool;

use crate::{
    config::Config,
    db::{FilmRepository, SqliteFilmRepository},
    services::{HttpReviewClient, RecommendationEngine, ReviewClient},
};

/// Shared application state
///
/// Cloned per request; all fields are reference-counted and no request
/// ever takes a lock, so requests in flight never serialize each other.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RecommendationEngine>,
}

impl AppState {
    /// Wires the engine to the SQLite repository and the HTTP review client
    pub fn new(pool: SqlitePool, config: &Config) -> Self {
        let repository: Arc<dyn FilmRepository> = Arc::new(SqliteFilmRepository::new(pool));
        let review_client: Arc<dyn ReviewClient> =
            Arc::new(HttpReviewClient::new(config.review_api_url.clone()));

        Self::with_components(
            repository,
            review_client,
            Duration::from_secs(config.review_timeout_secs),
        )
    }

    /// Builds state from explicit collaborators
    ///
    /// Lets tests run the full HTTP surface against in-memory fakes.
    pub fn with_components(
        repository: Arc<dyn FilmRepository>,
        review_client: Arc<dyn ReviewClient>,
        review_timeout: Duration,
    ) -> Self {
        Self {
            engine: Arc::new(RecommendationEngine::new(
                repository,
                review_client,
                review_timeout,
            )),
        }
    }
}
