//! MongoDB connection management and document helpers

mod config;
mod connector;
mod errors;
mod health;
pub mod serde_helpers;

pub use config::MongoConfig;
pub use connector::{connect_from_config, connect_from_config_with_retry};
pub use errors::{DUPLICATE_KEY_CODE, is_duplicate_key};
pub use health::{HealthStatus, check_health, check_health_detailed};
pub use serde_helpers::{option_uuid_as_string, uuid_as_string};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
