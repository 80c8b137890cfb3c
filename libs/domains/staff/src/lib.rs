//! Staff Domain
//!
//! Personnel records for the shop: employees and the vets who advise on
//! products. Both are plain CRUD resources; vets additionally carry a unique
//! email and a unique tax id.
//!
//! ```rust,no_run
//! use domain_staff::{handlers, EmployeeService, MongoEmployeeRepository, MongoVetRepository, VetService};
//!
//! # async fn example(db: mongodb::Database) {
//! let employees = handlers::employees_router(EmployeeService::new(MongoEmployeeRepository::new(&db)));
//! let vets = handlers::vets_router(VetService::new(MongoVetRepository::new(&db)));
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{StaffError, StaffResult};
pub use handlers::ApiDoc;
pub use models::{CreateEmployee, CreateVet, Employee, UpdateEmployee, UpdateVet, Vet};
pub use mongodb::{MongoEmployeeRepository, MongoVetRepository};
pub use repository::{EmployeeRepository, VetRepository};
pub use service::{EmployeeService, VetService};
