//! In-memory media store for tests and local development

use crate::error::{MediaError, MediaResult};
use crate::store::{MediaFile, MediaStore, StoredMedia};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
struct State {
    stored: BTreeMap<String, MediaFile>,
    uploads: usize,
    deleted: Vec<String>,
}

/// Keeps uploaded files in a map keyed by public id.
///
/// URLs look like `memory://<folder>/<uuid>-<file name>`.
#[derive(Clone, Default)]
pub struct InMemoryMediaStore {
    state: Arc<Mutex<State>>,
    fail_after: Option<usize>,
    fail_deletes: bool,
}

impl InMemoryMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `successes` uploads, then reject every later one
    pub fn failing_after(successes: usize) -> Self {
        Self {
            fail_after: Some(successes),
            ..Self::default()
        }
    }

    /// Reject every delete call
    pub fn with_failing_deletes(mut self) -> Self {
        self.fail_deletes = true;
        self
    }

    /// Public ids currently stored
    pub async fn stored_ids(&self) -> Vec<String> {
        self.state.lock().await.stored.keys().cloned().collect()
    }

    pub async fn stored_count(&self) -> usize {
        self.state.lock().await.stored.len()
    }

    /// Public ids passed to `delete`, in call order
    pub async fn deleted_ids(&self) -> Vec<String> {
        self.state.lock().await.deleted.clone()
    }
}

#[async_trait]
impl MediaStore for InMemoryMediaStore {
    async fn upload(&self, file: &MediaFile, folder: &str) -> MediaResult<StoredMedia> {
        let mut state = self.state.lock().await;

        if self.fail_after.is_some_and(|limit| state.uploads >= limit) {
            return Err(MediaError::Upload {
                file: file.file_name.clone(),
                reason: "simulated upload failure".to_string(),
            });
        }
        state.uploads += 1;

        let public_id = format!("{}/{}-{}", folder, Uuid::now_v7(), file.file_name);
        state.stored.insert(public_id.clone(), file.clone());

        Ok(StoredMedia {
            url: format!("memory://{}", public_id),
            public_id,
        })
    }

    async fn delete(&self, public_id: &str) -> MediaResult<()> {
        let mut state = self.state.lock().await;
        state.deleted.push(public_id.to_string());

        if self.fail_deletes {
            return Err(MediaError::Delete {
                public_id: public_id.to_string(),
                reason: "simulated delete failure".to_string(),
            });
        }

        state.stored.remove(public_id);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(name: &str) -> MediaFile {
        MediaFile::new(name, "image/png", vec![0x89, 0x50, 0x4e, 0x47])
    }

    #[tokio::test]
    async fn test_upload_then_delete() {
        let store = InMemoryMediaStore::new();

        let stored = store.upload(&png("front.png"), "bandoggie/products").await.unwrap();
        assert!(stored.url.starts_with("memory://bandoggie/products/"));
        assert!(stored.public_id.ends_with("front.png"));
        assert_eq!(store.stored_count().await, 1);

        store.delete(&stored.public_id).await.unwrap();
        assert_eq!(store.stored_count().await, 0);
        assert_eq!(store.deleted_ids().await, vec![stored.public_id]);
    }

    #[tokio::test]
    async fn test_failing_after_limit() {
        let store = InMemoryMediaStore::failing_after(1);

        assert!(store.upload(&png("a.png"), "f").await.is_ok());
        let err = store.upload(&png("b.png"), "f").await.unwrap_err();
        assert!(err.to_string().contains("b.png"));
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let store = InMemoryMediaStore::new();
        let clone = store.clone();
        clone.upload(&png("a.png"), "f").await.unwrap();
        assert_eq!(store.stored_count().await, 1);
    }
}
