//! Shared-cache headers for public responses.

use axum::http::{HeaderValue, header};
use tower_http::set_header::SetResponseHeaderLayer;

/// Seconds a CDN may serve a stale response while revalidating.
pub const STALE_WHILE_REVALIDATE: u64 = 30;

/// Sets `Cache-Control: public, s-maxage={ttl}, stale-while-revalidate=30`.
///
/// Responses that already carry a `Cache-Control` header, such as error
/// responses, keep their own value.
pub fn layer(ttl_seconds: u64) -> SetResponseHeaderLayer<HeaderValue> {
    let value = HeaderValue::from_str(&format!(
        "public, s-maxage={}, stale-while-revalidate={}",
        ttl_seconds, STALE_WHILE_REVALIDATE
    ))
    .unwrap_or_else(|_| HeaderValue::from_static("public, s-maxage=60"));

    SetResponseHeaderLayer::if_not_present(header::CACHE_CONTROL, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, routing::get};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_sets_header_when_absent() {
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(layer(60));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(
            response.headers()[header::CACHE_CONTROL],
            "public, s-maxage=60, stale-while-revalidate=30"
        );
    }

    #[tokio::test]
    async fn test_keeps_existing_header() {
        let app = Router::new()
            .route(
                "/",
                get(|| async { ([(header::CACHE_CONTROL, "no-store")], "err") }),
            )
            .layer(layer(60));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
    }
}
