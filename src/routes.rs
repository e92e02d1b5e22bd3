//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `GET  /health`      - Health check: database, cache (public)
//! - `GET  /sitemap.xml` - XML sitemap (public)
//! - `/api/*`            - Read-only REST API (public)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **CORS** - Single configured origin, `GET`/`OPTIONS` only
//! - **Cache-Control** - Shared-cache lifetime on API and sitemap responses
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{cache_control, cors, rate_limit, tracing};
use crate::state::AppState;
use crate::web;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// HTTP-level options taken from the configuration.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    /// When `true`, rate limiting reads client IP from `X-Forwarded-For` /
    /// `X-Real-IP` headers instead of the peer socket address; enable only
    /// when the service runs behind a trusted reverse proxy.
    pub behind_proxy: bool,
    /// Origin allowed by CORS, or `*`.
    pub cors_origin: String,
    /// Disables rate limiting. Used when no peer address is available.
    pub rate_limit: bool,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            behind_proxy: false,
            cors_origin: "http://localhost:3000".to_string(),
            rate_limit: true,
        }
    }
}

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `options` - proxy, CORS and rate limit settings
pub fn app_router(state: AppState, options: &HttpOptions) -> NormalizePath<Router> {
    let ttl = state.cache_ttl_seconds;

    let mut public_router = Router::new()
        .nest("/api", api::routes::routes())
        .merge(web::routes::public_routes())
        .layer(cache_control::layer(ttl))
        .layer(cors::layer(&options.cors_origin));

    if options.rate_limit {
        public_router = if options.behind_proxy {
            public_router.layer(rate_limit::proxy_layer())
        } else {
            public_router.layer(rate_limit::layer())
        };
    }

    let router = Router::new()
        .route("/health", get(health_handler))
        .merge(public_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
