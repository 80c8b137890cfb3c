//! Product prices and client existence, as seen from carts

use async_trait::async_trait;
use database::mongodb::uuid_as_string;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection, Database};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::instrument;
use uuid::Uuid;

use crate::error::CartResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartCatalog: Send + Sync {
    /// Current unit price of each known product; unknown ids are absent
    async fn product_prices(&self, ids: Vec<Uuid>) -> CartResult<HashMap<Uuid, f64>>;

    async fn client_exists(&self, id: Uuid) -> CartResult<bool>;
}

#[derive(Debug, Deserialize)]
struct PriceRow {
    #[serde(rename = "_id", with = "uuid_as_string")]
    id: Uuid,
    price: f64,
}

pub struct MongoCartCatalog {
    products: Collection<PriceRow>,
    clients: Collection<mongodb::bson::Document>,
}

impl MongoCartCatalog {
    pub fn new(db: &Database) -> Self {
        Self {
            products: db.collection(domain_products::mongodb::COLLECTION),
            clients: db.collection(domain_clients::mongodb::COLLECTION),
        }
    }
}

#[async_trait]
impl CartCatalog for MongoCartCatalog {
    #[instrument(skip(self), fields(count = ids.len()))]
    async fn product_prices(&self, ids: Vec<Uuid>) -> CartResult<HashMap<Uuid, f64>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let ids: Vec<String> = ids.iter().map(Uuid::to_string).collect();
        let rows: Vec<PriceRow> = self
            .products
            .find(doc! { "_id": { "$in": ids } })
            .projection(doc! { "price": 1 })
            .await?
            .try_collect()
            .await?;

        Ok(rows.into_iter().map(|row| (row.id, row.price)).collect())
    }

    #[instrument(skip(self))]
    async fn client_exists(&self, id: Uuid) -> CartResult<bool> {
        let count = self
            .clients
            .count_documents(doc! { "_id": id.to_string() })
            .limit(1)
            .await?;
        Ok(count > 0)
    }
}
