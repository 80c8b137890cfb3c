//! API routes module

pub mod carts;
pub mod categories;
pub mod clients;
pub mod health;
pub mod holidays;
pub mod products;
pub mod reviews;
pub mod staff;

use axum::Router;

use crate::state::AppState;

/// Create all API routes, mounted under `/api` by the caller
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/products", products::router(state))
        .nest("/reviews", reviews::router(state))
        .nest("/holidays", holidays::router(state))
        .nest("/categories", categories::router(state))
        .nest("/carts", carts::router(state))
        .nest("/clients", clients::router(state))
        .nest("/employees", staff::employees_router(state))
        .nest("/vets", staff::vets_router(state))
}

/// Initialize database indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    products::init_indexes(state).await?;
    reviews::init_indexes(state).await?;
    carts::init_indexes(state).await?;
    clients::init_indexes(state).await?;
    staff::init_indexes(state).await
}
