use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};

/// Body of every non-success response.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing required fields: workout_id, value, or label")]
    MissingFields,

    #[error("Unknown workout: {0}")]
    UnknownWorkout(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Workout not found: {0}")]
    NotFound(String),

    // Raw store message is passed through to the caller as-is
    #[error("{0}")]
    Database(#[from] sqlx::Error),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingFields | ApiError::UnknownWorkout(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Database(e) => tracing::error!("Store error: {}", e),
            other => tracing::warn!("Rejected request: {}", other),
        }
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}
