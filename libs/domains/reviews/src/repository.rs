use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ReviewResult;
use crate::models::{RatingBucket, Review, ReviewFilter};

/// Repository trait for Review persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn create(&self, review: Review) -> ReviewResult<Review>;

    async fn get_by_id(&self, id: Uuid) -> ReviewResult<Option<Review>>;

    /// Reviews matching `filter`, in storage order
    async fn list(&self, filter: ReviewFilter) -> ReviewResult<Vec<Review>>;

    /// Replace a stored review; `NotFound` if it no longer exists
    async fn update(&self, review: Review) -> ReviewResult<Review>;

    async fn delete(&self, id: Uuid) -> ReviewResult<()>;

    /// Review count per qualification for one product
    async fn rating_buckets(&self, product: Uuid) -> ReviewResult<Vec<RatingBucket>>;
}
