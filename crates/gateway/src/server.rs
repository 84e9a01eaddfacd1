//! Axum-based HTTP server for the gateway.

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use concierge_core::{
    traits::SubmissionStore,
    types::{ChatRequest, ModalSubmission, SubmissionRecord},
    Error, Result,
};

use crate::router::IntentRouter;

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
    /// Enable CORS.
    pub enable_cors: bool,
    /// Enable request tracing.
    pub enable_tracing: bool,
    /// Static asset directory served at `/`, if any.
    pub static_dir: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            enable_cors: true,
            enable_tracing: true,
            static_dir: None,
        }
    }
}

/// Shared application state.
pub struct AppState {
    /// Two-stage intent router.
    pub router: IntentRouter,
    /// Append-only submission log.
    pub store: Arc<dyn SubmissionStore>,
}

use metrics_exporter_prometheus::PrometheusHandle;

/// Gateway server.
pub struct GatewayServer {
    config: GatewayConfig,
    state: Arc<AppState>,
    metrics_handle: Option<PrometheusHandle>,
}

impl GatewayServer {
    /// Create a new gateway server.
    pub fn new(config: GatewayConfig, router: IntentRouter, store: Arc<dyn SubmissionStore>) -> Self {
        Self {
            config,
            state: Arc::new(AppState { router, store }),
            metrics_handle: None,
        }
    }

    /// Set metrics handle.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }

    /// Build the Axum router.
    pub fn build_router(&self) -> Router {
        let mut router = Router::new()
            .route("/health", get(health_handler))
            .route("/v1/chat", post(chat_handler))
            .route("/v1/submission", post(submission_handler))
            .with_state(self.state.clone());

        if let Some(handle) = &self.metrics_handle {
            let handle = handle.clone();
            router = router.route("/metrics", get(move || async move { handle.render() }));
        }

        if let Some(dir) = &self.config.static_dir {
            router = router.fallback_service(ServeDir::new(dir));
        }

        if self.config.enable_cors {
            router = router.layer(CorsLayer::new().allow_origin(Any).allow_methods(Any));
        }

        if self.config.enable_tracing {
            router = router.layer(TraceLayer::new_for_http());
        }

        router
    }

    /// Run the server.
    pub async fn run(self) -> Result<()> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| Error::gateway(format!("Failed to bind: {}", e)))?;

        tracing::info!(addr = %addr, "Gateway server starting");

        axum::serve(listener, self.build_router())
            .await
            .map_err(|e| Error::gateway(format!("Server error: {}", e)))?;

        Ok(())
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// Health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// Acknowledgment for a recorded submission. Always "ok".
#[derive(Debug, Serialize)]
pub struct SubmissionAck {
    pub status: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code.
    pub code: String,
    /// Error message.
    pub message: String,
    /// Trace ID.
    pub trace_id: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check handler.
async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Chat handler: one two-stage resolution per request.
async fn chat_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChatRequest>,
) -> Response {
    let trace_id = Uuid::new_v4().to_string();

    tracing::info!(
        trace_id = %trace_id,
        session_id = %payload.session_id,
        user = %payload.display_name(),
        has_event = payload.event.is_some(),
        "Processing chat request"
    );

    match state.router.resolve(&payload).await {
        Ok(response) => {
            let outcome = if response.used_fallback { "fallback" } else { "primary" };
            metrics::counter!("chat_requests_total", "outcome" => outcome).increment(1);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            metrics::counter!("chat_requests_total", "outcome" => "error").increment(1);
            let status = match &e {
                Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            tracing::error!(trace_id = %trace_id, error = %e, "Chat request failed");
            (
                status,
                Json(ErrorResponse {
                    code: if status == StatusCode::BAD_REQUEST {
                        "INVALID_REQUEST".to_string()
                    } else {
                        "RESOLVER_ERROR".to_string()
                    },
                    message: e.to_string(),
                    trace_id,
                }),
            )
                .into_response()
        }
    }
}

/// Submission handler: best-effort append, unconditional success.
///
/// A persistence failure is logged and swallowed; the caller never learns
/// about it. At-most-once, fire-and-forget.
async fn submission_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ModalSubmission>,
) -> impl IntoResponse {
    let record = SubmissionRecord::from(payload);

    if let Err(e) = state.store.append(&record).await {
        tracing::error!(error = %e, action = %record.action, "Error writing submission record");
    }

    Json(SubmissionAck {
        status: "ok".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
