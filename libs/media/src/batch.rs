//! Batch uploads with compensating cleanup

use crate::error::MediaResult;
use crate::store::{MediaFile, MediaStore, StoredMedia};
use futures::stream::{self, StreamExt};
use tracing::{debug, instrument, warn};

const ROLLBACK_CONCURRENCY: usize = 4;

/// Upload `files` to `folder`, at most `concurrency` at a time.
///
/// Results keep the order of `files`. If any upload fails, every file of the
/// batch that did get stored is deleted again and the first error is returned.
/// Each upload is awaited to completion so no stored file goes unseen.
#[instrument(skip(store, files), fields(store = store.name(), files = files.len()))]
pub async fn upload_batch(
    store: &dyn MediaStore,
    files: &[MediaFile],
    folder: &str,
    concurrency: usize,
) -> MediaResult<Vec<StoredMedia>> {
    if files.is_empty() {
        return Ok(Vec::new());
    }

    let results: Vec<MediaResult<StoredMedia>> = stream::iter(files)
        .map(|file| store.upload(file, folder))
        .buffered(concurrency.max(1))
        .boxed()
        .collect()
        .await;

    let mut stored = Vec::with_capacity(results.len());
    let mut first_error = None;

    for result in results {
        match result {
            Ok(media) => stored.push(media),
            Err(e) if first_error.is_none() => first_error = Some(e),
            Err(e) => warn!(error = %e, "Additional upload failure in batch"),
        }
    }

    match first_error {
        None => {
            debug!(uploaded = stored.len(), "Batch uploaded");
            Ok(stored)
        }
        Some(err) => {
            warn!(error = %err, stored = stored.len(), "Batch upload failed, removing stored files");
            rollback(store, &stored).await;
            Err(err)
        }
    }
}

/// Best-effort delete of `uploaded`; failures are logged, not returned.
///
/// Also used when the database write that follows a successful batch fails.
pub async fn rollback(store: &dyn MediaStore, uploaded: &[StoredMedia]) {
    if uploaded.is_empty() {
        return;
    }

    let failures: Vec<_> = stream::iter(uploaded)
        .map(|media| async move { (media, store.delete(&media.public_id).await) })
        .buffer_unordered(ROLLBACK_CONCURRENCY)
        .filter_map(|(media, result)| async move { result.err().map(|e| (media, e)) })
        .boxed()
        .collect()
        .await;

    for (media, error) in &failures {
        warn!(public_id = %media.public_id, %error, "Orphaned media after rollback");
    }
}
