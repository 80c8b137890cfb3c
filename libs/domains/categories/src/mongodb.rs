use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection, Database};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{CategoryError, CategoryResult};
use crate::models::{Category, CreateCategory, UpdateCategory};
use crate::repository::CategoryRepository;

pub const COLLECTION: &str = "categories";

pub struct MongoCategoryRepository {
    collection: Collection<Category>,
}

impl MongoCategoryRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Category>(COLLECTION),
        }
    }
}

#[async_trait]
impl CategoryRepository for MongoCategoryRepository {
    #[instrument(skip(self, input), fields(category_name = %input.name))]
    async fn create(&self, input: CreateCategory) -> CategoryResult<Category> {
        let category = Category::new(input);
        self.collection.insert_one(&category).await?;

        tracing::info!(category_id = %category.id, "Category created");
        Ok(category)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> CategoryResult<Option<Category>> {
        Ok(self
            .collection
            .find_one(doc! { "_id": id.to_string() })
            .await?)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> CategoryResult<Vec<Category>> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: UpdateCategory) -> CategoryResult<Category> {
        let filter = doc! { "_id": id.to_string() };
        let mut category = self
            .collection
            .find_one(filter.clone())
            .await?
            .ok_or(CategoryError::NotFound(id))?;

        category.apply_update(input);
        self.collection.replace_one(filter, &category).await?;

        tracing::info!(category_id = %id, "Category updated");
        Ok(category)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> CategoryResult<()> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id.to_string() })
            .await?;

        if result.deleted_count == 0 {
            return Err(CategoryError::NotFound(id));
        }

        tracing::info!(category_id = %id, "Category deleted");
        Ok(())
    }
}
