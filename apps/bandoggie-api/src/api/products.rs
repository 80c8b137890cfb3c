//! Products API routes

use axum::Router;
use domain_products::{handlers, MongoLabelLookup, MongoProductRepository, ProductService};

use crate::state::AppState;

/// Create products router
pub fn router(state: &AppState) -> Router {
    let repository = MongoProductRepository::new(&state.db);
    let labels = MongoLabelLookup::new(&state.db);
    let service = ProductService::new(repository, labels, state.media.clone())
        .with_folder(state.config.media.folder_for("products"))
        .with_upload_concurrency(state.config.media.upload_concurrency);
    handlers::router(service)
}

/// Initialize products indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    let repository = MongoProductRepository::new(&state.db);
    repository.init_indexes().await?;
    Ok(())
}
