//! Display names for the holidays and categories products point at

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection, Database};
use tracing::instrument;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::Label;

/// Batch lookup of label entities by id. Unknown ids are simply absent
/// from the result.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LabelLookup: Send + Sync {
    async fn holidays(&self, ids: Vec<Uuid>) -> ProductResult<Vec<Label>>;

    async fn categories(&self, ids: Vec<Uuid>) -> ProductResult<Vec<Label>>;
}

/// Reads `{_id, name}` straight from the holidays and categories collections
pub struct MongoLabelLookup {
    holidays: Collection<Label>,
    categories: Collection<Label>,
}

impl MongoLabelLookup {
    pub fn new(db: &Database) -> Self {
        Self {
            holidays: db.collection::<Label>(domain_holidays::mongodb::COLLECTION),
            categories: db.collection::<Label>(domain_categories::mongodb::COLLECTION),
        }
    }

    async fn find(collection: &Collection<Label>, ids: Vec<Uuid>) -> ProductResult<Vec<Label>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = ids.iter().map(Uuid::to_string).collect();
        let cursor = collection
            .find(doc! { "_id": { "$in": ids } })
            .projection(doc! { "name": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }
}

#[async_trait]
impl LabelLookup for MongoLabelLookup {
    #[instrument(skip(self), fields(count = ids.len()))]
    async fn holidays(&self, ids: Vec<Uuid>) -> ProductResult<Vec<Label>> {
        Self::find(&self.holidays, ids).await
    }

    #[instrument(skip(self), fields(count = ids.len()))]
    async fn categories(&self, ids: Vec<Uuid>) -> ProductResult<Vec<Label>> {
        Self::find(&self.categories, ids).await
    }
}
