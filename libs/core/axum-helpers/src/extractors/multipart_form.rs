//! Buffered `multipart/form-data` extractor.
//!
//! Collects text fields by name and file parts grouped by field name, with a
//! per-file size limit. Routes using it should also raise axum's
//! `DefaultBodyLimit` to fit the files they accept.

use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Multipart, Request, multipart::MultipartError},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bytes::{Bytes, BytesMut};
use std::collections::HashMap;

/// Per-file limit applied by the `FromRequest` impl (5 MB)
pub const DEFAULT_MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// One file part of a multipart request
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub field_name: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Parsed multipart body
#[derive(Debug, Default, Clone)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: Vec<UploadedFile>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read every part of `multipart`, rejecting files over `max_file_size` bytes.
    pub async fn parse(mut multipart: Multipart, max_file_size: usize) -> Result<Self, AppError> {
        let mut form = Self::new();

        while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();

                    let mut buffer = BytesMut::new();
                    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
                        if buffer.len() + chunk.len() > max_file_size {
                            return Err(AppError::PayloadTooLarge(format!(
                                "File '{}' exceeds the {} byte limit",
                                file_name, max_file_size
                            )));
                        }
                        buffer.extend_from_slice(&chunk);
                    }

                    form.files.push(UploadedFile {
                        field_name: name,
                        file_name,
                        content_type,
                        bytes: buffer.freeze(),
                    });
                }
                None => {
                    let value = field.text().await.map_err(multipart_error)?;
                    form.fields.insert(name, value);
                }
            }
        }

        Ok(form)
    }

    pub fn insert_text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn push_file(mut self, file: UploadedFile) -> Self {
        self.files.push(file);
        self
    }

    /// Text value of `name`, `None` when absent or blank
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Files sent under `name`, in request order
    pub fn files(&self, name: &str) -> Vec<UploadedFile> {
        self.files
            .iter()
            .filter(|f| f.field_name == name)
            .cloned()
            .collect()
    }

    pub fn file_count(&self, name: &str) -> usize {
        self.files.iter().filter(|f| f.field_name == name).count()
    }
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::InvalidMultipart(err.body_text())
    }
}

impl<S> FromRequest<S> for MultipartForm
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::InvalidMultipart(e.body_text()).into_response())?;

        Self::parse(multipart, DEFAULT_MAX_FILE_SIZE)
            .await
            .map_err(IntoResponse::into_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        extract::DefaultBodyLimit,
        http::{Request, header},
        routing::post,
    };
    use tower::ServiceExt;

    const BOUNDARY: &str = "XBOUNDARYX";

    fn body(parts: &[(&str, Option<&str>, Vec<u8>)]) -> Vec<u8> {
        let mut out = Vec::new();
        for (name, file_name, data) in parts {
            out.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match file_name {
                Some(file) => out.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file}\"\r\nContent-Type: image/png\r\n\r\n"
                    )
                    .as_bytes(),
                ),
                None => out.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                ),
            }
            out.extend_from_slice(data);
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        out
    }

    async fn send(payload: Vec<u8>) -> Response {
        let app = Router::new()
            .route(
                "/",
                post(|form: MultipartForm| async move {
                    format!(
                        "{}|{}|{}",
                        form.text("name").unwrap_or("-"),
                        form.file_count("designImages"),
                        form.files("image").len()
                    )
                }),
            )
            .layer(DefaultBodyLimit::max(16 * 1024 * 1024));

        app.oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(payload))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_groups_text_and_files() {
        let payload = body(&[
            ("name", None, "Collar navideño".as_bytes().to_vec()),
            ("image", Some("front.png"), vec![1, 2, 3]),
            ("designImages", Some("a.png"), vec![4]),
            ("designImages", Some("b.png"), vec![5]),
        ]);

        let response = send(payload).await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = http_body_util::BodyExt::collect(response.into_body())
            .await
            .unwrap()
            .to_bytes();
        assert_eq!(&bytes[..], "Collar navideño|2|1".as_bytes());
    }

    #[tokio::test]
    async fn test_file_over_limit_is_rejected() {
        let payload = body(&[("image", Some("huge.png"), vec![0u8; DEFAULT_MAX_FILE_SIZE + 1])]);
        let response = send(payload).await;
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_non_multipart_request_is_bad_request() {
        let app = Router::new().route("/", post(|_: MultipartForm| async { "ok" }));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_blank_text_reads_as_absent() {
        let form = MultipartForm::new()
            .insert_text("holiday", "   ")
            .insert_text("name", " Arnés ");
        assert_eq!(form.text("holiday"), None);
        assert_eq!(form.text("name"), Some("Arnés"));
    }
}
