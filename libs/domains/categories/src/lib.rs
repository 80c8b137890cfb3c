//! Categories Domain
//!
//! Categories ("Collares", "Camas", ...) classify products, the same way
//! holidays do. Products keep the category id; reads resolve it to `{_id, name}`.

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{CategoryError, CategoryResult};
pub use handlers::ApiDoc;
pub use models::{Category, CreateCategory, UpdateCategory};
pub use mongodb::MongoCategoryRepository;
pub use repository::CategoryRepository;
pub use service::CategoryService;
