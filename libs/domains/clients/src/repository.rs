use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ClientResult;
use crate::models::{Client, CreateClient, UpdateClient};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Insert a client; `DuplicateEmail` on a unique index violation
    async fn create(&self, input: CreateClient) -> ClientResult<Client>;

    async fn get_by_id(&self, id: Uuid) -> ClientResult<Option<Client>>;

    async fn list(&self) -> ClientResult<Vec<Client>>;

    async fn update(&self, id: Uuid, input: UpdateClient) -> ClientResult<Client>;

    async fn delete(&self, id: Uuid) -> ClientResult<()>;

    /// Whether any client uses `email` (already normalized)
    async fn exists_by_email(&self, email: &str) -> ClientResult<bool>;
}
