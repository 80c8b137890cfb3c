//! # Axum Helpers
//!
//! Shared building blocks for the HTTP services in this workspace.
//!
//! - **[`server`]**: router assembly with API docs, health checks, graceful shutdown
//! - **[`http`]**: CORS, security headers, `MessageResponse`
//! - **[`errors`]**: `AppError` and the JSON error envelope
//! - **[`extractors`]**: `UuidPath`, `UuidPathPair`, `ValidatedJson`, `MultipartForm`
//! - **[`validation`]**: field validators for `validator` derives
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! let router = create_router::<ApiDoc>(Router::new())?;
//! create_production_app(router, &ServerConfig::default(), async {}).await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;
pub mod validation;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    create_router_with_cors, health_router, run_health_checks, shutdown_signal,
};

pub use http::{MessageResponse, cors_layer_from_env, create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{
    DEFAULT_MAX_FILE_SIZE, MultipartForm, UploadedFile, UuidPath, UuidPathPair, ValidatedJson,
};
