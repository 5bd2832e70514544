use crate::health::{HealthState, health_check, liveness_check, readiness_check};

use axum::{Router, routing::get};

pub fn build_router(state: HealthState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/live", get(liveness_check))
        .route("/ready", get(readiness_check))
        .with_state(state)
}
