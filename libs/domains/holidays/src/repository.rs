use async_trait::async_trait;
use uuid::Uuid;

use crate::error::HolidayResult;
use crate::models::{CreateHoliday, Holiday, UpdateHoliday};

/// Data access interface for holidays
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HolidayRepository: Send + Sync {
    async fn create(&self, input: CreateHoliday) -> HolidayResult<Holiday>;

    async fn get_by_id(&self, id: Uuid) -> HolidayResult<Option<Holiday>>;

    /// All holidays in storage order
    async fn list(&self) -> HolidayResult<Vec<Holiday>>;

    /// Rename a holiday; `NotFound` if absent
    async fn update(&self, id: Uuid, input: UpdateHoliday) -> HolidayResult<Holiday>;

    /// Delete a holiday; `NotFound` if absent
    async fn delete(&self, id: Uuid) -> HolidayResult<()>;
}
