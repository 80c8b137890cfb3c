use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Client not found: {0}")]
    NotFound(Uuid),

    #[error("A client with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NotFound(_) => AppError::NotFound("Client not found".to_string()),
            ClientError::DuplicateEmail(email) => {
                AppError::Conflict(format!("A client with email '{}' already exists", email))
            }
            ClientError::Validation(errors) => AppError::ValidationError(errors),
            ClientError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ClientError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ClientError {
    fn from(err: mongodb::error::Error) -> Self {
        ClientError::Database(err.to_string())
    }
}
