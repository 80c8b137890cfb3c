//! Holiday Service - validation in front of the repository

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{HolidayError, HolidayResult};
use crate::models::{CreateHoliday, Holiday, UpdateHoliday};
use crate::repository::HolidayRepository;

pub struct HolidayService<R: HolidayRepository> {
    repository: Arc<R>,
}

impl<R: HolidayRepository> HolidayService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_holidays(&self) -> HolidayResult<Vec<Holiday>> {
        self.repository.list().await
    }

    #[instrument(skip(self))]
    pub async fn get_holiday(&self, id: Uuid) -> HolidayResult<Holiday> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(HolidayError::NotFound(id))
    }

    #[instrument(skip(self, input), fields(holiday_name = %input.name))]
    pub async fn create_holiday(&self, input: CreateHoliday) -> HolidayResult<Holiday> {
        input.validate()?;
        self.repository.create(input).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_holiday(&self, id: Uuid, input: UpdateHoliday) -> HolidayResult<Holiday> {
        input.validate()?;
        self.repository.update(id, input).await
    }

    /// No check against products still referencing the holiday
    #[instrument(skip(self))]
    pub async fn delete_holiday(&self, id: Uuid) -> HolidayResult<()> {
        self.repository.delete(id).await
    }
}

impl<R: HolidayRepository> Clone for HolidayService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
