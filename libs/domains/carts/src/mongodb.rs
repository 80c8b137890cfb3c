//! MongoDB implementation of CartRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, from_document, Document},
    Collection, Database, IndexModel,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{CartError, CartResult};
use crate::models::{Cart, CartFilter, StatusBucket};
use crate::repository::CartRepository;

pub const COLLECTION: &str = "carts";

pub struct MongoCartRepository {
    collection: Collection<Cart>,
}

impl MongoCartRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Cart>(COLLECTION),
        }
    }

    pub async fn init_indexes(&self) -> CartResult<()> {
        let index = IndexModel::builder().keys(doc! { "client": 1 }).build();

        self.collection.create_index(index).await?;
        tracing::info!("Cart indexes initialized");
        Ok(())
    }

    fn build_filter(filter: &CartFilter) -> Document {
        match filter.client {
            Some(client) => doc! { "client": client.to_string() },
            None => doc! {},
        }
    }

    fn stats_pipeline() -> Vec<Document> {
        vec![doc! {
            "$group": {
                "_id": "$status",
                "count": { "$sum": 1 },
                "total": { "$sum": "$total" },
                "items": { "$sum": { "$sum": "$items.quantity" } },
            }
        }]
    }
}

#[async_trait]
impl CartRepository for MongoCartRepository {
    #[instrument(skip(self, cart), fields(cart_id = %cart.id, client_id = %cart.client))]
    async fn create(&self, cart: Cart) -> CartResult<Cart> {
        self.collection.insert_one(&cart).await?;

        tracing::info!("Cart created successfully");
        Ok(cart)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> CartResult<Option<Cart>> {
        Ok(self
            .collection
            .find_one(doc! { "_id": id.to_string() })
            .await?)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: CartFilter) -> CartResult<Vec<Cart>> {
        let cursor = self.collection.find(Self::build_filter(&filter)).await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, cart), fields(cart_id = %cart.id, total = cart.total))]
    async fn update(&self, cart: Cart) -> CartResult<Cart> {
        let result = self
            .collection
            .replace_one(doc! { "_id": cart.id.to_string() }, &cart)
            .await?;

        if result.matched_count == 0 {
            return Err(CartError::NotFound(cart.id));
        }

        Ok(cart)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> CartResult<()> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id.to_string() })
            .await?;

        if result.deleted_count == 0 {
            return Err(CartError::NotFound(id));
        }

        tracing::info!(cart_id = %id, "Cart deleted successfully");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn status_buckets(&self) -> CartResult<Vec<StatusBucket>> {
        let rows: Vec<Document> = self
            .collection
            .aggregate(Self::stats_pipeline())
            .await?
            .try_collect()
            .await?;

        rows.into_iter()
            .map(|row| from_document(row).map_err(|e| CartError::Database(e.to_string())))
            .collect()
    }
}
