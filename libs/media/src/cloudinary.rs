//! Cloudinary media store
//!
//! Uses the signed upload and destroy endpoints of the Cloudinary REST API.
//! Signatures are SHA-256, so the account must have its signature algorithm
//! set to SHA-256.

use crate::config::CloudinaryConfig;
use crate::error::{MediaError, MediaResult};
use crate::store::{MediaFile, MediaStore, StoredMedia};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{debug, error, instrument};

const CLOUDINARY_API_URL: &str = "https://api.cloudinary.com";

pub struct CloudinaryStore {
    cloud_name: String,
    api_key: String,
    api_secret: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorMessage,
}

#[derive(Debug, Deserialize)]
struct ErrorMessage {
    message: String,
}

impl CloudinaryStore {
    pub fn new(config: &CloudinaryConfig) -> Self {
        Self {
            cloud_name: config.cloud_name.clone(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            base_url: CLOUDINARY_API_URL.to_string(),
            client: Client::new(),
        }
    }

    /// Point the store at another API host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/v1_1/{}/image/{}", self.base_url, self.cloud_name, action)
    }

    /// Signed form fields for `params` (api_key, timestamp, signature and the params themselves)
    fn signed_form(&self, mut params: Vec<(&'static str, String)>) -> Form {
        params.push(("timestamp", chrono::Utc::now().timestamp().to_string()));
        let signature = sign(&params, &self.api_secret);

        params
            .into_iter()
            .fold(Form::new(), |form, (key, value)| form.text(key, value))
            .text("api_key", self.api_key.clone())
            .text("signature", signature)
    }

    async fn provider_error(response: reqwest::Response) -> MediaError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error.message)
            .unwrap_or(body);

        error!(status, %message, "Cloudinary API error");
        MediaError::Provider { status, message }
    }
}

/// Cloudinary request signature: params sorted by key, joined as
/// `k=v&k=v`, secret appended, SHA-256, lowercase hex.
pub(crate) fn sign(params: &[(&str, String)], api_secret: &str) -> String {
    let mut sorted: Vec<_> = params.iter().filter(|(_, v)| !v.is_empty()).collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let digest = Sha256::digest(format!("{}{}", to_sign, api_secret).as_bytes());
    const_hex::encode(digest)
}

#[async_trait]
impl MediaStore for CloudinaryStore {
    #[instrument(skip(self, file), fields(file = %file.file_name, size = file.bytes.len()))]
    async fn upload(&self, file: &MediaFile, folder: &str) -> MediaResult<StoredMedia> {
        let part = Part::bytes(file.bytes.to_vec())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)?;

        let form = self
            .signed_form(vec![("folder", folder.to_string())])
            .part("file", part);

        let response = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let err = Self::provider_error(response).await;
            return Err(MediaError::Upload {
                file: file.file_name.clone(),
                reason: err.to_string(),
            });
        }

        let body: UploadResponse = response.json().await?;
        debug!(public_id = %body.public_id, "Uploaded to Cloudinary");

        Ok(StoredMedia {
            url: body.secure_url,
            public_id: body.public_id,
        })
    }

    #[instrument(skip(self))]
    async fn delete(&self, public_id: &str) -> MediaResult<()> {
        let form = self.signed_form(vec![("public_id", public_id.to_string())]);

        let response = self
            .client
            .post(self.endpoint("destroy"))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let err = Self::provider_error(response).await;
            return Err(MediaError::Delete {
                public_id: public_id.to_string(),
                reason: err.to_string(),
            });
        }

        let body: DestroyResponse = response.json().await?;
        match body.result.as_str() {
            "ok" | "not found" => Ok(()),
            other => Err(MediaError::Delete {
                public_id: public_id.to_string(),
                reason: other.to_string(),
            }),
        }
    }

    fn name(&self) -> &'static str {
        "cloudinary"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Path, http::StatusCode, routing::post, Json, Router};
    use serde_json::json;

    fn config() -> CloudinaryConfig {
        CloudinaryConfig {
            cloud_name: "demo".to_string(),
            api_key: "123456".to_string(),
            api_secret: "abcd".to_string(),
        }
    }

    #[test]
    fn test_signature_sorts_params_and_appends_secret() {
        let params = vec![
            ("timestamp", "1315060510".to_string()),
            ("folder", "bandoggie/products".to_string()),
        ];
        assert_eq!(
            sign(&params, "abcd"),
            "1bc8f3a023c960e5ab55b19913bc6bdf5a1d4fa2d1cb5b26cbb4de8394484c9c"
        );
    }

    #[test]
    fn test_signature_skips_empty_params() {
        let with_empty = vec![
            ("public_id", "bandoggie/products/abc".to_string()),
            ("folder", String::new()),
            ("timestamp", "1315060510".to_string()),
        ];
        assert_eq!(
            sign(&with_empty, "abcd"),
            "a9803ba56ed65a91f8f060fd6d76dc79524d219f75ab3c507a0c862db8e5ec2b"
        );
    }

    /// Serves a fake Cloudinary API on an ephemeral port.
    async fn fake_cloudinary(upload_status: StatusCode) -> String {
        let app = Router::new()
            .route(
                "/v1_1/{cloud}/image/upload",
                post(move |Path(cloud): Path<String>| async move {
                    if upload_status.is_success() {
                        (
                            upload_status,
                            Json(json!({
                                "public_id": "bandoggie/products/front",
                                "secure_url": format!("https://res.cloudinary.com/{cloud}/image/upload/front.png"),
                            })),
                        )
                    } else {
                        (
                            upload_status,
                            Json(json!({"error": {"message": "Invalid Signature"}})),
                        )
                    }
                }),
            )
            .route(
                "/v1_1/{cloud}/image/destroy",
                post(|| async { Json(json!({"result": "ok"})) }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn png() -> MediaFile {
        MediaFile::new("front.png", "image/png", vec![1, 2, 3])
    }

    #[tokio::test]
    async fn test_upload_returns_secure_url() {
        let base = fake_cloudinary(StatusCode::OK).await;
        let store = CloudinaryStore::new(&config()).with_base_url(base);

        let stored = store.upload(&png(), "bandoggie/products").await.unwrap();
        assert_eq!(stored.public_id, "bandoggie/products/front");
        assert_eq!(
            stored.url,
            "https://res.cloudinary.com/demo/image/upload/front.png"
        );
    }

    #[tokio::test]
    async fn test_upload_surfaces_provider_message() {
        let base = fake_cloudinary(StatusCode::UNAUTHORIZED).await;
        let store = CloudinaryStore::new(&config()).with_base_url(base);

        let err = store.upload(&png(), "bandoggie/products").await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("front.png"));
        assert!(message.contains("Invalid Signature"));
    }

    #[tokio::test]
    async fn test_delete_accepts_ok() {
        let base = fake_cloudinary(StatusCode::OK).await;
        let store = CloudinaryStore::new(&config()).with_base_url(base);
        assert!(store.delete("bandoggie/products/front").await.is_ok());
    }
}
