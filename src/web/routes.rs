//! Crawler-facing route configuration.

use crate::state::AppState;
use crate::web::handlers::sitemap_handler;
use axum::{Router, routing::get};

/// Public documents for search engines.
///
/// # Endpoints
///
/// - `GET /sitemap.xml` - Sitemap of every public page
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/sitemap.xml", get(sitemap_handler))
}
