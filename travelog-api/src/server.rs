use crate::handlers;
use axum::{
    Router,
    http::{HeaderValue, StatusCode, header},
    response::Json,
    routing::{delete, get, post, put},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use travelog_core::config::ServerConfig;
use travelog_store::EntryStore;

/// Shared state for the REST API.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<EntryStore>,
}

/// Build the axum router with all routes and the middleware stack.
///
/// CORS is applied separately in `ApiServer::start` because the allowed
/// origin comes from configuration; tests drive this router directly.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health::hello))
        .route("/health", get(handlers::health::health_check))
        // Log entries
        .route("/api/logs", get(handlers::entries::list_entries))
        .route("/api/logs", post(handlers::entries::create_entry))
        .route("/api/logs/{id}", get(handlers::entries::get_entry))
        .route("/api/logs/{id}", put(handlers::entries::update_entry))
        .route("/api/logs/{id}", delete(handlers::entries::delete_entry))
        .fallback(not_found)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS layer restricted to the configured origin.
/// No configured origin means any origin is allowed.
pub fn cors_layer(origin: Option<&str>) -> CorsLayer {
    match origin {
        Some(raw) => match raw.parse::<HeaderValue>() {
            Ok(value) => CorsLayer::new()
                .allow_origin(value)
                .allow_methods(Any)
                .allow_headers(Any),
            Err(_) => {
                warn!(origin = raw, "invalid CORS origin, falling back to permissive");
                CorsLayer::permissive()
            }
        },
        None => CorsLayer::permissive(),
    }
}

/// JSON 404 for unmatched paths.
async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" })))
}

/// Travelog REST API server.
pub struct ApiServer {
    config: ServerConfig,
    state: AppState,
}

impl ApiServer {
    pub fn new(config: ServerConfig, store: Arc<EntryStore>) -> Self {
        Self {
            config,
            state: AppState { store },
        }
    }

    /// Start the API server and run until shutdown is requested.
    pub async fn start(self) -> anyhow::Result<()> {
        let app = build_router(self.state.clone())
            .layer(cors_layer(self.config.cors_origin.as_deref()));

        info!(addr = %self.config.addr, "Starting Travelog API server");

        let listener = tokio::net::TcpListener::bind(&self.config.addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server shut down gracefully");
        Ok(())
    }
}

/// Listen for SIGTERM (pod termination) and SIGINT (Ctrl+C).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
