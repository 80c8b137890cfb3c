//! MongoDB implementation of ReviewRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, from_document, Document},
    Collection, Database, IndexModel,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ReviewError, ReviewResult};
use crate::models::{RatingBucket, Review, ReviewFilter};
use crate::repository::ReviewRepository;

pub const COLLECTION: &str = "reviews";

pub struct MongoReviewRepository {
    collection: Collection<Review>,
}

impl MongoReviewRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Review>(COLLECTION),
        }
    }

    pub async fn init_indexes(&self) -> ReviewResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "product": 1, "qualification": 1 })
                .build(),
            IndexModel::builder().keys(doc! { "client": 1 }).build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Review indexes initialized");
        Ok(())
    }

    fn build_filter(filter: &ReviewFilter) -> Document {
        let mut doc = doc! {};

        if let Some(product) = filter.product {
            doc.insert("product", product.to_string());
        }
        if let Some(client) = filter.client {
            doc.insert("client", client.to_string());
        }
        if let Some(qualification) = filter.qualification {
            doc.insert("qualification", i32::from(qualification));
        }

        doc
    }

    fn stats_pipeline(product: Uuid) -> Vec<Document> {
        vec![
            doc! { "$match": { "product": product.to_string() } },
            doc! { "$group": { "_id": "$qualification", "count": { "$sum": 1 } } },
        ]
    }
}

#[async_trait]
impl ReviewRepository for MongoReviewRepository {
    #[instrument(skip(self, review), fields(review_id = %review.id, product_id = %review.product))]
    async fn create(&self, review: Review) -> ReviewResult<Review> {
        self.collection.insert_one(&review).await?;

        tracing::info!("Review created successfully");
        Ok(review)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ReviewResult<Option<Review>> {
        Ok(self
            .collection
            .find_one(doc! { "_id": id.to_string() })
            .await?)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: ReviewFilter) -> ReviewResult<Vec<Review>> {
        let cursor = self.collection.find(Self::build_filter(&filter)).await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, review), fields(review_id = %review.id))]
    async fn update(&self, review: Review) -> ReviewResult<Review> {
        let result = self
            .collection
            .replace_one(doc! { "_id": review.id.to_string() }, &review)
            .await?;

        if result.matched_count == 0 {
            return Err(ReviewError::NotFound(review.id));
        }

        tracing::info!("Review updated successfully");
        Ok(review)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ReviewResult<()> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id.to_string() })
            .await?;

        if result.deleted_count == 0 {
            return Err(ReviewError::NotFound(id));
        }

        tracing::info!(review_id = %id, "Review deleted successfully");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn rating_buckets(&self, product: Uuid) -> ReviewResult<Vec<RatingBucket>> {
        let cursor = self
            .collection
            .aggregate(Self::stats_pipeline(product))
            .await?;
        let rows: Vec<Document> = cursor.try_collect().await?;

        rows.into_iter()
            .map(|row| from_document(row).map_err(|e| ReviewError::Database(e.to_string())))
            .collect()
    }
}
