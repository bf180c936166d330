//! Main webserver implementation
//!
//! `WebServer` owns the history store handle, created once at startup, and
//! injects it into every handler through axum state.

use axum::{
    Router,
    routing::{get, post},
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use shared::logging;

use crate::SERVICE_NAME;
use crate::error::{WebServerError, WebServerResult};
use crate::traits::HistoryStore;
use crate::web::handlers::{api_info, calculate, get_calculation, health_check, history};

/// Per-request handler state
pub struct AppState<H> {
    pub store: Arc<H>,
}

impl<H> Clone for AppState<H> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

/// Math API server with an injected history store
pub struct WebServer<H>
where
    H: HistoryStore,
{
    store: Arc<H>,
}

impl<H> WebServer<H>
where
    H: HistoryStore + 'static,
{
    /// Create a new webserver around a store
    pub fn new(store: H) -> Self {
        Self::with_shared_store(Arc::new(store))
    }

    /// Create a webserver around a store handle the caller also keeps
    pub fn with_shared_store(store: Arc<H>) -> Self {
        Self { store }
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        let state = AppState {
            store: Arc::clone(&self.store),
        };

        Router::new()
            .route("/", get(api_info))
            .route("/health", get(health_check))
            // API routes
            .route("/api", get(api_info))
            .route("/api/math", post(calculate::<H>))
            .route("/api/history", get(history::<H>))
            .route("/api/calculation/:id", get(get_calculation::<H>))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(CorsLayer::permissive())
                    .into_inner(),
            )
            .with_state(state)
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> WebServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = self.build_router();
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| WebServerError::ServeFailed(e.to_string()))
    }

    /// Bind `address` and serve until Ctrl+C
    pub async fn run(&self, address: SocketAddr) -> WebServerResult<()> {
        let listener = TcpListener::bind(address).await.map_err(|e| {
            WebServerError::ServerStartupFailed {
                address: address.to_string(),
                message: e.to_string(),
            }
        })?;

        logging::log_success(SERVICE_NAME, &format!("Math API listening on http://{address}"));
        self.serve(listener, shutdown_signal()).await
    }
}

/// Resolves on Ctrl+C
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => logging::log_shutdown(SERVICE_NAME, "Received Ctrl+C signal"),
        Err(err) => {
            logging::log_error(SERVICE_NAME, "Signal handling", &err);
            // Without a signal handler keep serving until the process is killed
            std::future::pending::<()>().await;
        }
    }
}
