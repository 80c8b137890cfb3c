//! Clients Domain
//!
//! Shop customers. Reviews and carts reference a client by id; emails are
//! unique across clients (enforced by a unique index and checked up front).

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{ClientError, ClientResult};
pub use handlers::ApiDoc;
pub use models::{Client, CreateClient, UpdateClient};
pub use mongodb::MongoClientRepository;
pub use repository::ClientRepository;
pub use service::ClientService;
