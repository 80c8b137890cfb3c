//! Reviews Domain
//!
//! Client reviews of products: a 1 to 5 qualification, a comment and
//! optionally 3 to 5 photos hosted on the media store. Reads resolve the
//! client and product references and come newest first.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_reviews::{handlers, MongoReviewReferences, MongoReviewRepository, ReviewService};
//! use media::InMemoryMediaStore;
//! use std::sync::Arc;
//!
//! # async fn example(db: mongodb::Database) {
//! let service = ReviewService::new(
//!     MongoReviewRepository::new(&db),
//!     MongoReviewReferences::new(&db),
//!     Arc::new(InMemoryMediaStore::new()),
//! );
//! let router = handlers::router(service);
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod references;
pub mod repository;
pub mod service;

pub use error::{ReviewError, ReviewResult};
pub use handlers::ApiDoc;
pub use models::{
    ClientRef, CreateReview, ProductRef, RatingBucket, RatingDistribution, Review,
    ReviewFilter, ReviewStats, ReviewView, UpdateReview,
};
pub use mongodb::MongoReviewRepository;
pub use references::{MongoReviewReferences, ReviewReferences};
pub use repository::ReviewRepository;
pub use service::ReviewService;
