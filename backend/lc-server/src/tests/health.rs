use crate::health::{HealthState, health_check, liveness_check, readiness_check};

use lc_listener::ShutdownCoordinator;

use axum::body::to_bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use googletest::assert_that;
use googletest::prelude::eq;
use serde_json::Value;

fn state(coordinator: &ShutdownCoordinator) -> HealthState {
    HealthState {
        shutdown: coordinator.clone(),
        https_on: true,
        database: Some("mongod".to_string()),
    }
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

#[tokio::test]
async fn given_running_process_when_health_checked_then_healthy_with_components() {
    // Given
    let coordinator = ShutdownCoordinator::new();

    // When
    let response = health_check(State(state(&coordinator))).await;

    // Then
    assert_that!(response.status(), eq(StatusCode::OK));
    let body = json_body(response).await;
    assert_that!(body["status"], eq("healthy"));
    assert_that!(body["components"]["listener"], eq("https"));
    assert_that!(body["components"]["database"], eq("mongod"));
}

#[tokio::test]
async fn given_shutdown_started_when_health_checked_then_draining() {
    let coordinator = ShutdownCoordinator::new();
    coordinator.shutdown();

    let body = json_body(health_check(State(state(&coordinator))).await).await;

    assert_that!(body["status"], eq("draining"));
}

#[tokio::test]
async fn given_running_process_when_ready_checked_then_ok() {
    let coordinator = ShutdownCoordinator::new();

    let response = readiness_check(State(state(&coordinator))).await;

    assert_that!(response.status(), eq(StatusCode::OK));
}

#[tokio::test]
async fn given_shutdown_started_when_ready_checked_then_unavailable() {
    let coordinator = ShutdownCoordinator::new();
    coordinator.shutdown();

    let response = readiness_check(State(state(&coordinator))).await;

    assert_that!(response.status(), eq(StatusCode::SERVICE_UNAVAILABLE));
}

#[tokio::test]
async fn given_any_state_when_live_checked_then_ok() {
    let response = liveness_check().await;

    assert_that!(response.status(), eq(StatusCode::OK));
}
