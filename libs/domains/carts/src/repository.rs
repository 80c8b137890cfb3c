use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CartResult;
use crate::models::{Cart, CartFilter, StatusBucket};

/// Repository trait for Cart persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn create(&self, cart: Cart) -> CartResult<Cart>;

    async fn get_by_id(&self, id: Uuid) -> CartResult<Option<Cart>>;

    async fn list(&self, filter: CartFilter) -> CartResult<Vec<Cart>>;

    /// Replace a stored cart; `NotFound` if it no longer exists
    async fn update(&self, cart: Cart) -> CartResult<Cart>;

    async fn delete(&self, id: Uuid) -> CartResult<()>;

    /// Count, total and units per status
    async fn status_buckets(&self) -> CartResult<Vec<StatusBucket>>;
}
