use super::{app, reporter};
use crate::{ListenRetry, ListenerError, ListenerKind, ListenerState, NetworkListener, TlsCredentials};

use googletest::assert_that;
use googletest::prelude::eq;

fn listener() -> NetworkListener {
    NetworkListener::new(app(), reporter())
}

#[test]
fn given_new_listener_then_idle_and_unbound() {
    let listener = listener();

    assert_that!(listener.state(), eq(ListenerState::Idle));
    assert_that!(listener.kind(), eq(None));
    assert_that!(listener.local_addr(), eq(None));
}

#[test]
fn given_plain_kind_with_credentials_when_configured_then_config_error() {
    let mut listener = listener();

    let result = listener.configure(
        ListenerKind::Plain,
        "http",
        Some(TlsCredentials::new("cert", "key")),
    );

    assert!(matches!(result, Err(ListenerError::Config { .. })));
}

#[test]
fn given_encrypted_kind_without_credentials_when_configured_then_config_error() {
    let mut listener = listener();

    let result = listener.configure(ListenerKind::Encrypted, "https", None);

    assert!(matches!(result, Err(ListenerError::Config { .. })));
}

#[test]
fn given_encrypted_kind_with_empty_key_when_configured_then_config_error() {
    let mut listener = listener();

    let result = listener.configure(
        ListenerKind::Encrypted,
        "https",
        Some(TlsCredentials::new("cert", "")),
    );

    assert!(matches!(result, Err(ListenerError::Config { .. })));
}

#[test]
fn given_blank_name_when_configured_then_config_error() {
    let mut listener = listener();

    let result = listener.configure(ListenerKind::Plain, "  ", None);

    assert!(matches!(result, Err(ListenerError::Config { .. })));
}

#[test]
fn given_valid_settings_when_configured_then_still_idle() {
    let mut listener = listener();

    listener
        .configure(ListenerKind::Plain, "http", None)
        .expect("configure");

    assert_that!(listener.state(), eq(ListenerState::Idle));
    assert_that!(listener.kind(), eq(Some(ListenerKind::Plain)));
    assert_that!(listener.name(), eq("http"));
}

#[tokio::test]
async fn given_unconfigured_listener_when_listen_then_invalid_state() {
    let mut listener = listener();

    let result = listener.listen("127.0.0.1", 0, &ListenRetry::none()).await;

    assert!(matches!(result, Err(ListenerError::InvalidState { .. })));
    assert_that!(listener.state(), eq(ListenerState::Idle));
}

#[tokio::test]
async fn given_idle_listener_when_stopped_then_noop() {
    let mut listener = listener();
    listener
        .configure(ListenerKind::Plain, "http", None)
        .expect("configure");

    listener.stop().await;

    assert_that!(listener.state(), eq(ListenerState::Idle));
}

#[tokio::test]
async fn given_listening_listener_when_configured_again_then_invalid_state() {
    // Given
    let mut listener = listener();
    listener
        .configure(ListenerKind::Plain, "http", None)
        .expect("configure");
    listener
        .listen("127.0.0.1", 0, &ListenRetry::none())
        .await
        .expect("listen");

    // When
    let result = listener.configure(ListenerKind::Plain, "other", None);

    // Then
    assert!(matches!(result, Err(ListenerError::InvalidState { .. })));
    assert_that!(listener.name(), eq("http"));

    listener.stop().await;
}

#[tokio::test]
async fn given_port_zero_when_listening_then_os_assigns_port() {
    let mut listener = listener();
    listener
        .configure(ListenerKind::Plain, "http", None)
        .expect("configure");

    let addr = listener
        .listen("127.0.0.1", 0, &ListenRetry::none())
        .await
        .expect("listen");

    assert!(addr.port() != 0);
    assert_that!(listener.port(), eq(Some(addr.port())));
    assert_that!(listener.state(), eq(ListenerState::Listening));

    listener.stop().await;
    assert_that!(listener.state(), eq(ListenerState::Stopped));
    assert_that!(listener.local_addr(), eq(None));
}

#[tokio::test]
async fn given_malformed_pem_when_listen_then_failed_without_binding() {
    // Given
    let mut listener = listener();
    listener
        .configure(
            ListenerKind::Encrypted,
            "https",
            Some(TlsCredentials::new("garbage", "garbage")),
        )
        .expect("configure accepts non-empty buffers");

    // When
    let result = listener.listen("127.0.0.1", 0, &ListenRetry::default()).await;

    // Then
    let error = result.expect_err("bad PEM");
    assert!(matches!(error, ListenerError::Config { .. }));
    assert_that!(error.attempts(), eq(0));
    assert_that!(listener.state(), eq(ListenerState::Failed));
    assert_that!(listener.local_addr(), eq(None));
}
