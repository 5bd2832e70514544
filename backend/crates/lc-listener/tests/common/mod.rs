#![allow(dead_code)]

use lc_core::ErrorReporter;
use lc_listener::{ListenRetry, TlsCredentials};

use std::net::TcpListener as StdTcpListener;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;

pub const LOCALHOST: &str = "127.0.0.1";
pub const BODY: &str = "hello from lc";

pub fn reporter() -> Arc<ErrorReporter> {
    Arc::new(ErrorReporter::new("lc-listener-it"))
}

pub fn app() -> Router {
    Router::new().route("/", get(|| async { BODY }))
}

/// Short retry budget so bind failures resolve quickly
pub fn fast_retry(max_retries: u32) -> ListenRetry {
    ListenRetry::new(max_retries, Duration::from_millis(20))
}

/// Reserve and release an ephemeral port
pub fn free_port() -> u16 {
    let socket = StdTcpListener::bind((LOCALHOST, 0)).expect("bind ephemeral port");
    socket.local_addr().expect("local addr").port()
}

/// Self-signed certificate for `localhost` and its key, as PEM
pub fn self_signed() -> (TlsCredentials, Vec<u8>) {
    let certified = rcgen::generate_simple_self_signed(vec!["localhost".to_string()])
        .expect("generate certificate");
    let cert_pem = certified.cert.pem();
    let key_pem = certified.key_pair.serialize_pem();

    (
        TlsCredentials::new(cert_pem.clone(), key_pem),
        cert_pem.into_bytes(),
    )
}
