use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{Product, ProductFilter};

/// Repository trait for Product persistence
///
/// Products are built by the service (after their images are uploaded), so
/// the repository stores whole entities rather than DTOs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new product
    async fn create(&self, product: Product) -> ProductResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Products matching `filter`, in storage order
    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>>;

    /// Replace a stored product; `NotFound` if it no longer exists
    async fn update(&self, product: Product) -> ProductResult<Product>;

    /// Delete a product by ID; `NotFound` if absent
    async fn delete(&self, id: Uuid) -> ProductResult<()>;
}
