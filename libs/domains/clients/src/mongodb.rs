//! MongoDB implementation of ClientRepository

use async_trait::async_trait;
use database::mongodb::is_duplicate_key;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, Database, IndexModel};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ClientError, ClientResult};
use crate::models::{Client, CreateClient, UpdateClient};
use crate::repository::ClientRepository;

pub const COLLECTION: &str = "clients";

pub struct MongoClientRepository {
    collection: Collection<Client>,
}

impl MongoClientRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Client>(COLLECTION),
        }
    }

    /// Unique index on `email`
    pub async fn init_indexes(&self) -> ClientResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("email_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(index).await?;
        tracing::info!("Client indexes initialized");
        Ok(())
    }

    fn map_write_error(err: mongodb::error::Error, email: &str) -> ClientError {
        if is_duplicate_key(&err) {
            ClientError::DuplicateEmail(email.to_string())
        } else {
            err.into()
        }
    }
}

#[async_trait]
impl ClientRepository for MongoClientRepository {
    #[instrument(skip(self, input))]
    async fn create(&self, input: CreateClient) -> ClientResult<Client> {
        let client = Client::new(input);
        self.collection
            .insert_one(&client)
            .await
            .map_err(|e| Self::map_write_error(e, &client.email))?;

        tracing::info!(client_id = %client.id, "Client created");
        Ok(client)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ClientResult<Option<Client>> {
        Ok(self
            .collection
            .find_one(doc! { "_id": id.to_string() })
            .await?)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> ClientResult<Vec<Client>> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: UpdateClient) -> ClientResult<Client> {
        let filter = doc! { "_id": id.to_string() };
        let mut client = self
            .collection
            .find_one(filter.clone())
            .await?
            .ok_or(ClientError::NotFound(id))?;

        client.apply_update(input);
        let result = self
            .collection
            .replace_one(filter, &client)
            .await
            .map_err(|e| Self::map_write_error(e, &client.email))?;

        if result.matched_count == 0 {
            return Err(ClientError::NotFound(id));
        }

        tracing::info!(client_id = %id, "Client updated");
        Ok(client)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ClientResult<()> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id.to_string() })
            .await?;

        if result.deleted_count == 0 {
            return Err(ClientError::NotFound(id));
        }

        tracing::info!(client_id = %id, "Client deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn exists_by_email(&self, email: &str) -> ClientResult<bool> {
        let count = self
            .collection
            .count_documents(doc! { "email": email })
            .await?;
        Ok(count > 0)
    }
}
