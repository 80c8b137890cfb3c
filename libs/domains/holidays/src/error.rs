use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum HolidayError {
    #[error("Holiday not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Database error: {0}")]
    Database(String),
}

pub type HolidayResult<T> = Result<T, HolidayError>;

impl From<HolidayError> for AppError {
    fn from(err: HolidayError) -> Self {
        match err {
            HolidayError::NotFound(_) => AppError::NotFound("Holiday not found".to_string()),
            HolidayError::Validation(errors) => AppError::ValidationError(errors),
            HolidayError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for HolidayError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for HolidayError {
    fn from(err: mongodb::error::Error) -> Self {
        HolidayError::Database(err.to_string())
    }
}
