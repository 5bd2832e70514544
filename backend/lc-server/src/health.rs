use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use lc_listener::ShutdownCoordinator;

use serde_json::json;

/// What the probe endpoints report about the running process
#[derive(Clone)]
pub struct HealthState {
    pub shutdown: ShutdownCoordinator,
    pub https_on: bool,
    /// Managed database service, if any
    pub database: Option<String>,
}

/// GET /health - Process status
pub async fn health_check(State(state): State<HealthState>) -> Response {
    let status = if state.shutdown.is_shutdown() {
        "draining"
    } else {
        "healthy"
    };

    let listener = if state.https_on { "https" } else { "http" };
    let database = state.database.as_deref().unwrap_or("unmanaged");

    let health = json!({
        "status": status,
        "version": env!("CARGO_PKG_VERSION"),
        "components": {
            "listener": listener,
            "database": database,
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(health)).into_response()
}

/// GET /live - Liveness probe (is the process alive?)
pub async fn liveness_check() -> Response {
    (StatusCode::OK, "OK").into_response()
}

/// GET /ready - Readiness probe. Refuses traffic once shutdown has begun.
pub async fn readiness_check(State(state): State<HealthState>) -> Response {
    if state.shutdown.is_shutdown() {
        return (StatusCode::SERVICE_UNAVAILABLE, "Shutting down").into_response();
    }

    (StatusCode::OK, "Ready").into_response()
}
