//! Categories API routes

use axum::Router;
use domain_categories::{handlers, CategoryService, MongoCategoryRepository};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoCategoryRepository::new(&state.db);
    handlers::router(CategoryService::new(repository))
}
