//! HTTP middleware and shared response bodies.
//!
//! ```ignore
//! use axum_helpers::http::{cors_layer_from_env, security_headers};
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(security_headers))
//!     .layer(cors_layer_from_env()?);
//! ```

pub mod cors;
pub mod security;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use cors::{cors_layer_from_env, create_cors_layer, parse_origins};
pub use security::security_headers;

/// `{ "message": ... }` body returned by delete endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
