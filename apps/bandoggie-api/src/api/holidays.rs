//! Holidays API routes

use axum::Router;
use domain_holidays::{handlers, HolidayService, MongoHolidayRepository};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoHolidayRepository::new(&state.db);
    handlers::router(HolidayService::new(repository))
}
