//! # API Server
//!
//! Assembles the axum router (correlation layer, API key middleware, CORS)
//! and runs it with graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::middleware;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::correlation::correlation_layer;
use crate::errors::{ApiError, ApiResult};
use crate::observability::{Logger, Severity};
use crate::store::BookStore;

use super::auth::require_api_key;
use super::book_routes;
use super::config::ApiConfig;

/// State shared across handlers
pub struct AppState {
    pub store: Arc<dyn BookStore>,
    pub config: ApiConfig,
}

/// HTTP server for the book API
pub struct ApiServer {
    config: ApiConfig,
    router: Router,
}

impl ApiServer {
    /// Create a server over the given store
    pub fn new(config: ApiConfig, store: Arc<dyn BookStore>) -> Self {
        let router = Self::build_router(config.clone(), store);
        Self { config, router }
    }

    /// Build the router with all middleware attached.
    ///
    /// The correlation layer is outermost so auth failures already carry a
    /// request identity; the API key check guards every book route.
    fn build_router(config: ApiConfig, store: Arc<dyn BookStore>) -> Router {
        let state = Arc::new(AppState { store, config });

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .merge(book_routes::routes())
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                require_api_key,
            ))
            .with_state(state)
            .layer(cors)
            .layer(middleware::from_fn(correlation_layer))
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until ctrl-c.
    ///
    /// Bind failures are the server-start error; a serve-loop failure after
    /// a successful bind is the shutdown error.
    pub async fn start(self) -> ApiResult<()> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|_| ApiError::ServerStart)?;

        let listener = TcpListener::bind(addr).await.map_err(|err| {
            Logger::error("bind_failed", &[("addr", &addr.to_string()), ("detail", &err.to_string())]);
            ApiError::ServerStart
        })?;
        Logger::log(
            Severity::Info,
            "server_started",
            &[("addr", &addr.to_string())],
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|err| {
                Logger::error("serve_failed", &[("detail", &err.to_string())]);
                ApiError::ServerShutdown
            })?;

        Logger::log(Severity::Info, "server_stopped", &[]);
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        Logger::error("shutdown_signal_failed", &[("detail", &err.to_string())]);
    } else {
        Logger::log(Severity::Info, "shutdown_requested", &[]);
    }
}
