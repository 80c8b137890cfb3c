//! Employees and Vets API routes

use axum::Router;
use domain_staff::{
    handlers, EmployeeService, MongoEmployeeRepository, MongoVetRepository, VetService,
};

use crate::state::AppState;

pub fn employees_router(state: &AppState) -> Router {
    let repository = MongoEmployeeRepository::new(&state.db);
    handlers::employees_router(EmployeeService::new(repository))
}

pub fn vets_router(state: &AppState) -> Router {
    let repository = MongoVetRepository::new(&state.db);
    handlers::vets_router(VetService::new(repository))
}

/// Unique email and tax id indexes for vets
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    MongoVetRepository::new(&state.db).init_indexes().await?;
    Ok(())
}
