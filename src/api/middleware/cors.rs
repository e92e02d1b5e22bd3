//! Cross-origin access for the site frontend.

use axum::http::{HeaderValue, Method, header};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

/// Preflight responses are cached by browsers for one day.
const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(86_400);

/// Creates the CORS layer for the read-only API.
///
/// Only `GET` and `OPTIONS` are allowed. An origin of `*` allows any
/// origin; otherwise only the configured origin is echoed back. An
/// unparseable origin is logged and allows none.
pub fn layer(origin: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(PREFLIGHT_MAX_AGE);

    if origin == "*" {
        return cors.allow_origin(Any);
    }

    match origin.parse::<HeaderValue>() {
        Ok(value) => cors.allow_origin(value),
        Err(_) => {
            warn!(origin = %origin, "ignoring unparseable CORS origin");
            cors
        }
    }
}
