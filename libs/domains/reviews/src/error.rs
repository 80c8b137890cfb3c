use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use media::MediaError;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("Review not found: {0}")]
    NotFound(Uuid),

    #[error("Client not found: {0}")]
    ClientNotFound(Uuid),

    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    /// Rule violation with a user-facing message
    #[error("{0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationErrors),

    #[error("Media error: {0}")]
    Media(#[from] MediaError),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ReviewResult<T> = Result<T, ReviewError>;

impl From<ReviewError> for AppError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::NotFound(_) => AppError::NotFound("Review not found".to_string()),
            ReviewError::ClientNotFound(_) => AppError::NotFound("Client not found".to_string()),
            ReviewError::ProductNotFound(_) => {
                AppError::NotFound("Product not found".to_string())
            }
            ReviewError::Validation(msg) => AppError::BadRequest(msg),
            ReviewError::InvalidInput(errors) => AppError::ValidationError(errors),
            ReviewError::Media(e) => AppError::InternalServerError(e.to_string()),
            ReviewError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ReviewError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ReviewError {
    fn from(err: mongodb::error::Error) -> Self {
        ReviewError::Database(err.to_string())
    }
}
