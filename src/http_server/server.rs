//! # HTTP Server
//!
//! Combines the validation, health and metrics routers behind CORS.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::config::HttpServerConfig;
use super::observability_routes::{health_routes, metrics_routes};
use super::validate_routes::{validate_routes, GateState};
use crate::observability::{log_event_with_fields, Event, MetricsRegistry};
use crate::schema::SchemaLoader;

/// HTTP request gate
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over an already loaded schema registry
    pub fn with_config(config: HttpServerConfig, loader: SchemaLoader) -> Self {
        let metrics = Arc::new(MetricsRegistry::new());
        metrics.set_schemas_loaded(loader.len());

        let state = Arc::new(GateState {
            loader: Arc::new(loader),
            metrics: Arc::clone(&metrics),
            options: config.validate_options(),
        });

        let router = Self::build_router(&config, state, metrics);
        Self { config, router }
    }

    fn build_router(
        config: &HttpServerConfig,
        state: Arc<GateState>,
        metrics: Arc<MetricsRegistry>,
    ) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes())
            .merge(metrics_routes(metrics))
            .merge(validate_routes(state))
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process exits
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid socket address '{}': {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        log_event_with_fields(Event::ServerListening, &[("addr", &addr.to_string())]);
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn empty_loader() -> (TempDir, SchemaLoader) {
        let temp_dir = TempDir::new().unwrap();
        let loader = SchemaLoader::new(temp_dir.path());
        (temp_dir, loader)
    }

    #[test]
    fn test_server_with_custom_port() {
        let (_temp_dir, loader) = empty_loader();
        let server = HttpServer::with_config(HttpServerConfig::with_port(8080), loader);
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_router_builds_with_origins() {
        let (_temp_dir, loader) = empty_loader();
        let config = HttpServerConfig {
            cors_origins: vec!["http://localhost:5173".to_string()],
            ..Default::default()
        };
        let _router = HttpServer::with_config(config, loader).router();
    }
}
