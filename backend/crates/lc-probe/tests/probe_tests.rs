use lc_probe::{ProbeError, ReachabilityProbe};

use std::net::TcpListener;
use std::time::Duration;

use googletest::assert_that;
use googletest::prelude::eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_probe(max_attempts: u32) -> ReachabilityProbe {
    ReachabilityProbe::new(None)
        .expect("probe")
        .with_max_attempts(max_attempts)
        .with_interval(Duration::from_millis(10))
        .with_request_timeout(Duration::from_secs(2))
}

#[tokio::test]
async fn given_healthy_endpoint_when_waiting_then_up_on_first_attempt() {
    // Given
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    // When
    let response = fast_probe(5)
        .wait_until_up(&format!("{}/health", server.uri()))
        .await
        .expect("up");

    // Then
    assert_that!(response.status, eq(200));
    assert_that!(response.attempts, eq(1));
}

#[tokio::test]
async fn given_endpoint_recovering_when_waiting_then_up_on_third_attempt() {
    // Given - two 503s, then healthy
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    // When
    let response = fast_probe(20)
        .wait_until_up(&format!("{}/health", server.uri()))
        .await
        .expect("up");

    // Then
    assert_that!(response.attempts, eq(3));
}

#[tokio::test]
async fn given_client_error_status_when_waiting_then_counts_as_up() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let response = fast_probe(3)
        .wait_until_up(&format!("{}/missing", server.uri()))
        .await
        .expect("a 404 still proves the server is listening");

    assert_that!(response.status, eq(404));
}

#[tokio::test]
async fn given_failing_endpoint_when_waiting_then_unreachable_after_exact_attempts() {
    // Given
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(4)
        .mount(&server)
        .await;

    // When
    let result = fast_probe(4).wait_until_up(&server.uri()).await;

    // Then
    let error = result.expect_err("never up");
    assert!(matches!(error, ProbeError::Unreachable { .. }));
    assert_that!(error.attempts(), eq(4));
}

#[tokio::test]
async fn given_closed_port_when_waiting_then_unreachable() {
    // Given - a port nothing listens on
    let port = {
        let socket = TcpListener::bind("127.0.0.1:0").expect("bind");
        socket.local_addr().expect("addr").port()
    };

    // When
    let result = fast_probe(3)
        .wait_until_up(&format!("http://127.0.0.1:{port}/"))
        .await;

    // Then
    let error = result.expect_err("nothing listening");
    assert_that!(error.attempts(), eq(3));
    assert!(error.to_string().contains("unreachable after 3 attempt(s)"));
}
