//! Clients API routes

use axum::Router;
use domain_clients::{handlers, ClientService, MongoClientRepository};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoClientRepository::new(&state.db);
    handlers::router(ClientService::new(repository))
}

/// Unique email index
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    MongoClientRepository::new(&state.db).init_indexes().await?;
    Ok(())
}
