//! # HTTP Server
//!
//! Combines the auth and product routers over shared state and serves
//! them on the configured address.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::inventory::InventoryResult;
use crate::observability::{Logger, Severity};

use super::auth_routes::auth_routes;
use super::config::HttpConfig;
use super::product_routes::product_routes;
use super::state::AppState;

/// HTTP server for the inventory web application
pub struct HttpServer {
    config: HttpConfig,
    router: Router,
}

impl HttpServer {
    /// Open the data directory and build the full router.
    pub fn new(config: HttpConfig) -> InventoryResult<Self> {
        let state = Arc::new(AppState::open(Path::new(&config.data_dir))?);
        let router = Self::build_router(state);
        Ok(Self { config, router })
    }

    /// Build a router over existing state (tests construct their own state).
    pub fn build_router(state: Arc<AppState>) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .merge(auth_routes(state.clone()))
            .merge(product_routes(state))
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

    /// Start serving (async, runs until the process exits)
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .expect("Invalid socket address");

        Logger::log(
            Severity::Info,
            "server_started",
            &[
                ("addr", addr.to_string().as_str()),
                ("data_dir", self.config.data_dir.as_str()),
            ],
        );

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_server_builds_over_temp_dir() {
        let dir = TempDir::new().unwrap();
        let config = HttpConfig {
            data_dir: dir.path().to_string_lossy().into_owned(),
            ..Default::default()
        };

        let server = HttpServer::new(config).unwrap();
        assert_eq!(server.socket_addr(), "127.0.0.1:5000");
        let _router = server.router();
    }
}
