//! Custom extractors for Axum handlers.
//!
//! Reusable extractors that reduce boilerplate and render rejections as
//! [`crate::ErrorResponse`] bodies.

pub mod multipart_form;
pub mod uuid_path;
pub mod validated_json;

pub use multipart_form::{DEFAULT_MAX_FILE_SIZE, MultipartForm, UploadedFile};
pub use uuid_path::{UuidPath, UuidPathPair};
pub use validated_json::ValidatedJson;
