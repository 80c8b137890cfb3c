//! Carts Domain
//!
//! A client's shopping cart. Line items are priced from the product catalog
//! when they are written, and the cart total is recomputed from the line
//! subtotals on every change. Paid carts no longer accept item changes.

pub mod catalog;
pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use catalog::{CartCatalog, MongoCartCatalog};
pub use error::{CartError, CartResult};
pub use handlers::ApiDoc;
pub use models::{
    Cart, CartFilter, CartItem, CartStats, CartStatus, CreateCart, ItemInput, Size,
    StatusBucket, UpdateCart,
};
pub use mongodb::MongoCartRepository;
pub use repository::CartRepository;
pub use service::CartService;
