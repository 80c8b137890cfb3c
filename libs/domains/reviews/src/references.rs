//! Clients and products a review points at

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection, Database};
use serde::de::DeserializeOwned;
use tracing::instrument;
use uuid::Uuid;

use crate::error::ReviewResult;
use crate::models::{ClientRef, ProductRef};

/// Batch lookup of the records reviews reference. Unknown ids are absent
/// from the result.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewReferences: Send + Sync {
    async fn clients(&self, ids: Vec<Uuid>) -> ReviewResult<Vec<ClientRef>>;

    async fn products(&self, ids: Vec<Uuid>) -> ReviewResult<Vec<ProductRef>>;
}

pub struct MongoReviewReferences {
    clients: Collection<ClientRef>,
    products: Collection<ProductRef>,
}

impl MongoReviewReferences {
    pub fn new(db: &Database) -> Self {
        Self {
            clients: db.collection(domain_clients::mongodb::COLLECTION),
            products: db.collection(domain_products::mongodb::COLLECTION),
        }
    }
}

async fn find_by_ids<T>(
    collection: &Collection<T>,
    ids: Vec<Uuid>,
    projection: mongodb::bson::Document,
) -> ReviewResult<Vec<T>>
where
    T: DeserializeOwned + Unpin + Send + Sync,
{
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<String> = ids.iter().map(Uuid::to_string).collect();
    let cursor = collection
        .find(doc! { "_id": { "$in": ids } })
        .projection(projection)
        .await?;
    Ok(cursor.try_collect().await?)
}

#[async_trait]
impl ReviewReferences for MongoReviewReferences {
    #[instrument(skip(self), fields(count = ids.len()))]
    async fn clients(&self, ids: Vec<Uuid>) -> ReviewResult<Vec<ClientRef>> {
        find_by_ids(
            &self.clients,
            ids,
            doc! { "name": 1, "lastName": 1, "email": 1 },
        )
        .await
    }

    #[instrument(skip(self), fields(count = ids.len()))]
    async fn products(&self, ids: Vec<Uuid>) -> ReviewResult<Vec<ProductRef>> {
        find_by_ids(
            &self.products,
            ids,
            doc! { "name": 1, "price": 1, "image": 1 },
        )
        .await
    }
}
