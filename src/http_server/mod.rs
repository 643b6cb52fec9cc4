//! # HTTP Request Gate
//!
//! Exposes the validator at the request-handling boundary: every body is
//! checked against its named schema before anything else sees it.

mod config;
mod errors;
mod observability_routes;
mod server;
mod validate_routes;

pub use config::HttpServerConfig;
pub use errors::{ErrorResponse, HttpError, HttpResult, RejectedResponse};
pub use observability_routes::{health_routes, metrics_routes, HealthResponse};
pub use server::HttpServer;
pub use validate_routes::{validate_routes, DataResponse, GateState};
