use crate::error::MediaResult;
use async_trait::async_trait;
use bytes::Bytes;

/// A file waiting to be uploaded
#[derive(Debug, Clone, PartialEq)]
pub struct MediaFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl MediaFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }
}

/// Where an uploaded file ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    /// Public HTTPS URL stored on the product or review
    pub url: String,
    /// Provider handle used to delete the file
    pub public_id: String,
}

/// External image host
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store `file` under `folder`
    async fn upload(&self, file: &MediaFile, folder: &str) -> MediaResult<StoredMedia>;

    /// Remove a previously stored file
    async fn delete(&self, public_id: &str) -> MediaResult<()>;

    fn name(&self) -> &'static str;
}
