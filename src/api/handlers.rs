use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{PaginationParams, RecommendationResponse},
};

use super::AppState;

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Handler for the film recommendations endpoint
///
/// The film id comes in as a path string; anything that is not a valid
/// film id resolves to no film, which is the same 422 as an unknown id.
/// Pagination parsing is permissive and never rejects the request.
pub async fn get_recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(film_id): Path<String>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<RecommendationResponse>> {
    let pagination = params.resolve();

    tracing::info!(
        request_id = %request_id,
        film_id = %film_id,
        limit = pagination.limit,
        offset = pagination.offset,
        "Processing recommendations request"
    );

    let film_id: i64 = film_id.parse().map_err(|_| AppError::FilmNotFound)?;

    let response = state.engine.get_recommendations(film_id, pagination).await?;

    tracing::info!(
        request_id = %request_id,
        film_id,
        recommendation_count = response.recommendations.len(),
        "Recommendations request completed"
    );

    Ok(Json(response))
}
