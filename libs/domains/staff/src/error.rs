use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum StaffError {
    #[error("Employee not found: {0}")]
    EmployeeNotFound(Uuid),

    #[error("Vet not found: {0}")]
    VetNotFound(Uuid),

    /// A unique vet field (`email` or `taxId`) is already taken
    #[error("A vet with {field} '{value}' already exists")]
    DuplicateVet { field: &'static str, value: String },

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Database error: {0}")]
    Database(String),
}

pub type StaffResult<T> = Result<T, StaffError>;

impl From<StaffError> for AppError {
    fn from(err: StaffError) -> Self {
        match err {
            StaffError::EmployeeNotFound(_) => AppError::NotFound("Employee not found".to_string()),
            StaffError::VetNotFound(_) => AppError::NotFound("Vet not found".to_string()),
            err @ StaffError::DuplicateVet { .. } => AppError::Conflict(err.to_string()),
            StaffError::Validation(errors) => AppError::ValidationError(errors),
            StaffError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for StaffError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for StaffError {
    fn from(err: mongodb::error::Error) -> Self {
        StaffError::Database(err.to_string())
    }
}
