use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CategoryResult;
use crate::models::{Category, CreateCategory, UpdateCategory};

/// Data access interface for categories
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, input: CreateCategory) -> CategoryResult<Category>;

    async fn get_by_id(&self, id: Uuid) -> CategoryResult<Option<Category>>;

    /// All categories in storage order
    async fn list(&self) -> CategoryResult<Vec<Category>>;

    /// Partially update a category; `NotFound` if absent
    async fn update(&self, id: Uuid, input: UpdateCategory) -> CategoryResult<Category>;

    /// Delete a category; `NotFound` if absent
    async fn delete(&self, id: Uuid) -> CategoryResult<()>;
}
