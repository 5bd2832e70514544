use axum::Router;
use axum::http::{HeaderMap, StatusCode, Uri, header};
use axum::response::{IntoResponse, Redirect, Response};

const DEFAULT_HTTPS_PORT: u16 = 443;

/// Router that answers every plaintext request with a permanent redirect
/// to the same host and path on the TLS port.
pub fn redirect_router(https_port: u16) -> Router {
    Router::new().fallback(move |headers: HeaderMap, uri: Uri| async move {
        redirect_to_https(&headers, &uri, https_port)
    })
}

fn redirect_to_https(headers: &HeaderMap, uri: &Uri, https_port: u16) -> Response {
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .or_else(|| uri.host());

    match https_location(host, uri, https_port) {
        Some(location) => Redirect::permanent(&location).into_response(),
        None => (StatusCode::BAD_REQUEST, "Missing Host header").into_response(),
    }
}

/// Build `https://<host>[:port]<path?query>` from a plaintext request.
///
/// Any port in `host` is replaced; the port is omitted when it is 443.
pub fn https_location(host: Option<&str>, uri: &Uri, https_port: u16) -> Option<String> {
    let hostname = strip_port(host?.trim());
    if hostname.is_empty() {
        return None;
    }

    let path = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

    if https_port == DEFAULT_HTTPS_PORT {
        Some(format!("https://{hostname}{path}"))
    } else {
        Some(format!("https://{hostname}:{https_port}{path}"))
    }
}

fn strip_port(host: &str) -> &str {
    // [::1]:8080
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }

    match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    }
}
