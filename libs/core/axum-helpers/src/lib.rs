//! # Axum Helpers
//!
//! Shared building blocks for the HTTP services in this workspace.
//!
//! - **[`server`]**: router assembly, health checks, graceful shutdown
//! - **[`http`]**: CORS and security header middleware
//! - **[`errors`]**: [`AppError`] and the structured [`ErrorResponse`] body
//! - **[`extractors`]**: integer id path and JSON body extractors

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks,
};

pub use http::{cors_layer, create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse, field_messages};

pub use extractors::{IdPath, JsonBody};
