use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::{
    error::AppResult,
    models::{CandidateFilm, Film},
};

/// Read-only access to the film catalog
///
/// The engine consumes this trait only; it never declares schema
/// relationships itself. The genre name in the range query is an
/// explicit join projection requested by the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FilmRepository: Send + Sync {
    /// Looks up a single film by id
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Film>>;

    /// Films sharing a genre with a release date inside `[min_date, max_date]`,
    /// excluding `exclude_id`, in stable id order
    async fn find_by_genre_and_date_range(
        &self,
        genre_id: i64,
        min_date: NaiveDate,
        max_date: NaiveDate,
        exclude_id: i64,
    ) -> AppResult<Vec<CandidateFilm>>;
}

/// SQLite-backed film repository
#[derive(Clone)]
pub struct SqliteFilmRepository {
    pool: SqlitePool,
}

impl SqliteFilmRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FilmRepository for SqliteFilmRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Film>> {
        let film = sqlx::query_as::<_, Film>(
            "SELECT id, title, release_date, genre_id, tagline, revenue, \
             budget, runtime, original_language, status \
             FROM films WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(film)
    }

    async fn find_by_genre_and_date_range(
        &self,
        genre_id: i64,
        min_date: NaiveDate,
        max_date: NaiveDate,
        exclude_id: i64,
    ) -> AppResult<Vec<CandidateFilm>> {
        let candidates = sqlx::query_as::<_, CandidateFilm>(
            "SELECT f.id, f.title, f.release_date, g.name AS genre \
             FROM films f \
             JOIN genres g ON g.id = f.genre_id \
             WHERE f.genre_id = ? \
               AND f.id != ? \
               AND f.release_date BETWEEN ? AND ? \
             ORDER BY f.id",
        )
        .bind(genre_id)
        .bind(exclude_id)
        .bind(min_date)
        .bind(max_date)
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(
            genre_id,
            candidate_count = candidates.len(),
            "Candidate query completed"
        );

        Ok(candidates)
    }
}
