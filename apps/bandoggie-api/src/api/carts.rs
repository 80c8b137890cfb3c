//! Carts API routes

use axum::Router;
use domain_carts::{handlers, CartService, MongoCartCatalog, MongoCartRepository};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoCartRepository::new(&state.db);
    let catalog = MongoCartCatalog::new(&state.db);
    handlers::router(CartService::new(repository, catalog))
}

pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    MongoCartRepository::new(&state.db).init_indexes().await?;
    Ok(())
}
