//! HTTP listener and routes
//!
//! - `POST /send`: bit-vector command, plain-text response
//! - `POST /calc`: opcode command, JSON response
//! - `GET /healthz`: liveness
//! - anything else: static assets from the public directory

use crate::config::Config;
use crate::control::{ApiError, CalcResponse, CommandHandler};
use crate::error::{BridgeError, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::handler::HandlerWithoutStateExt;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Serves the command endpoints and the static UI
pub struct ControlServer {
    /// `host:port` to bind
    listen_addr: String,
    /// Static asset root
    public_dir: PathBuf,
    /// Command handler
    handler: Arc<CommandHandler>,
}

impl ControlServer {
    /// Create a new control server
    pub fn new(listen_addr: String, public_dir: PathBuf, handler: Arc<CommandHandler>) -> Self {
        Self {
            listen_addr,
            public_dir,
            handler,
        }
    }

    /// Create a server and its devices from configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.listen_addr(),
            config.public_dir.clone(),
            Arc::new(CommandHandler::from_config(config)),
        )
    }

    /// Router with all routes attached
    pub fn router(&self) -> Router {
        create_router(self.handler.clone(), &self.public_dir)
    }

    /// Bind the listener
    pub async fn bind(&self) -> Result<TcpListener> {
        let listener = TcpListener::bind(&self.listen_addr).await.map_err(|e| {
            BridgeError::Config(format!("Failed to bind {}: {}", self.listen_addr, e))
        })?;
        info!("HTTP server listening on {}", listener.local_addr()?);
        Ok(listener)
    }

    /// Serve until `shutdown` resolves
    ///
    /// In-flight driver runs are not cancelled; they finish in the background.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;
        info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the router
pub fn create_router(handler: Arc<CommandHandler>, public_dir: &Path) -> Router {
    let static_files = ServeDir::new(public_dir).not_found_service(not_found.into_service());

    Router::new()
        .route("/send", post(send).fallback(not_found))
        .route("/calc", post(calc).fallback(not_found))
        .route("/healthz", get(healthz))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(handler)
}

/// Bit-vector command endpoint
async fn send(State(handler): State<Arc<CommandHandler>>, body: Bytes) -> Response {
    match handler.handle_send(&body).await {
        Ok(stdout) => (StatusCode::OK, stdout).into_response(),
        Err(e) => e.into_text_response(),
    }
}

/// Opcode command endpoint
async fn calc(State(handler): State<Arc<CommandHandler>>, body: Bytes) -> Response {
    match handler.handle_calc(&body).await {
        Ok(result) => (StatusCode::OK, Json(CalcResponse::success(result))).into_response(),
        Err(e) => ApiError::into_json_response(e),
    }
}

/// Health check endpoint
async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}
