//! Holidays Domain
//!
//! Holidays are label entities ("Navidad", "Halloween", ...) that products
//! reference by id. Deleting a holiday leaves those references dangling;
//! product reads resolve them to `null`.
//!
//! ```rust,no_run
//! use domain_holidays::{handlers, MongoHolidayRepository, HolidayService};
//!
//! # async fn example(db: mongodb::Database) {
//! let service = HolidayService::new(MongoHolidayRepository::new(&db));
//! let router = handlers::router(service);
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{HolidayError, HolidayResult};
pub use handlers::ApiDoc;
pub use models::{CreateHoliday, Holiday, UpdateHoliday};
pub use mongodb::MongoHolidayRepository;
pub use repository::HolidayRepository;
pub use service::HolidayService;
