//! MongoDB implementation of HolidayRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection, Database};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{HolidayError, HolidayResult};
use crate::models::{CreateHoliday, Holiday, UpdateHoliday};
use crate::repository::HolidayRepository;

pub const COLLECTION: &str = "holidays";

pub struct MongoHolidayRepository {
    collection: Collection<Holiday>,
}

impl MongoHolidayRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Holiday>(COLLECTION),
        }
    }

    pub fn collection(&self) -> &Collection<Holiday> {
        &self.collection
    }
}

#[async_trait]
impl HolidayRepository for MongoHolidayRepository {
    #[instrument(skip(self, input), fields(holiday_name = %input.name))]
    async fn create(&self, input: CreateHoliday) -> HolidayResult<Holiday> {
        let holiday = Holiday::new(input);
        self.collection.insert_one(&holiday).await?;

        tracing::info!(holiday_id = %holiday.id, "Holiday created");
        Ok(holiday)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> HolidayResult<Option<Holiday>> {
        let holiday = self
            .collection
            .find_one(doc! { "_id": id.to_string() })
            .await?;
        Ok(holiday)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> HolidayResult<Vec<Holiday>> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: UpdateHoliday) -> HolidayResult<Holiday> {
        let filter = doc! { "_id": id.to_string() };
        let mut holiday = self
            .collection
            .find_one(filter.clone())
            .await?
            .ok_or(HolidayError::NotFound(id))?;

        holiday.apply_update(input);
        self.collection.replace_one(filter, &holiday).await?;

        tracing::info!(holiday_id = %id, "Holiday updated");
        Ok(holiday)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> HolidayResult<()> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id.to_string() })
            .await?;

        if result.deleted_count == 0 {
            return Err(HolidayError::NotFound(id));
        }

        tracing::info!(holiday_id = %id, "Holiday deleted");
        Ok(())
    }
}
