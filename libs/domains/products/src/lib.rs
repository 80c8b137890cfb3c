//! Products Domain
//!
//! The product catalog: products with a primary image and 3 to 10 design
//! images hosted on the media store, optionally classified under a holiday
//! and a category.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, multipart parsing
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌─────────────┐
//! │   Service   │ ──▶ │ MediaStore  │  ← image uploads with rollback
//! └──────┬──────┘     └─────────────┘
//!        │
//! ┌──────▼──────┐     ┌─────────────┐
//! │ Repository  │     │ LabelLookup │  ← holiday/category names for views
//! └──────┬──────┘     └─────────────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Product (stored), ProductView (resolved)
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{handlers, MongoLabelLookup, MongoProductRepository, ProductService};
//! use media::InMemoryMediaStore;
//! use std::sync::Arc;
//!
//! # async fn example(db: mongodb::Database) {
//! let service = ProductService::new(
//!     MongoProductRepository::new(&db),
//!     MongoLabelLookup::new(&db),
//!     Arc::new(InMemoryMediaStore::new()),
//! );
//! let router = handlers::router(service);
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod labels;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use labels::{LabelLookup, MongoLabelLookup};
pub use models::{
    CreateProduct, Label, Product, ProductFilter, ProductImages, ProductView, UpdateProduct,
};
pub use mongodb::MongoProductRepository;
pub use repository::ProductRepository;
pub use service::ProductService;
