mod network_listener;

use lc_core::ErrorReporter;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;

pub(crate) fn reporter() -> Arc<ErrorReporter> {
    Arc::new(ErrorReporter::new("lc-listener-test"))
}

pub(crate) fn app() -> Router {
    Router::new().route("/", get(|| async { "ok" }))
}
