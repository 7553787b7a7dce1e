use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("film doesn't exist")]
    FilmNotFound,

    #[error("Database error: {0}")]
    Repository(#[from] sqlx::Error),

    #[error("Review service error: {0}")]
    ReviewService(String),

    #[error("Review service timed out after {0}s")]
    ReviewServiceTimeout(u64),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::FilmNotFound => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            AppError::Repository(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::ReviewService(_) => (StatusCode::BAD_GATEWAY, self.to_string()),
            AppError::ReviewServiceTimeout(_) => (StatusCode::GATEWAY_TIMEOUT, self.to_string()),
        };

        let body = Json(json!({
            "message": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
