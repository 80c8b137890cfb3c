use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Upload of '{file}' failed: {reason}")]
    Upload { file: String, reason: String },

    #[error("Delete of '{public_id}' failed: {reason}")]
    Delete { public_id: String, reason: String },

    #[error("Media provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    #[error("Media request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Media configuration error: {0}")]
    Config(String),
}

pub type MediaResult<T> = Result<T, MediaError>;
