//! XML sitemap handler.

use askama::Template;
use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::application::services::SitemapUrl;
use crate::error::AppError;
use crate::state::AppState;

/// Template for the sitemap document.
///
/// Renders `templates/sitemap.xml`; values are XML-escaped.
#[derive(Template)]
#[template(path = "sitemap.xml", escape = "html")]
pub struct SitemapTemplate {
    pub urls: Vec<SitemapUrl>,
}

/// Renders the sitemap of every public page.
///
/// # Endpoint
///
/// `GET /sitemap.xml`
///
/// # Errors
///
/// Returns 503 when the store is unreachable and 500 when rendering fails.
pub async fn sitemap_handler(State(state): State<AppState>) -> Result<Response, AppError> {
    let urls = state.directory_service.sitemap(Utc::now()).await?;
    let count = urls.len();

    let body = SitemapTemplate { urls }.render().map_err(|e| {
        tracing::error!("Failed to render sitemap: {}", e);
        AppError::internal("Internal Server Error", serde_json::json!({}))
    })?;

    tracing::debug!("Rendered sitemap with {} urls", count);

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        body,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::ChangeFrequency;
    use chrono::TimeZone;

    #[test]
    fn test_template_escapes_locations() {
        let template = SitemapTemplate {
            urls: vec![SitemapUrl {
                loc: "https://topdoctorlist.com/hospitals/A&B".to_string(),
                last_modified: Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
                change_frequency: ChangeFrequency::Weekly,
                priority: "0.7",
            }],
        };

        let xml = template.render().unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<loc>https://topdoctorlist.com/hospitals/A&amp;B</loc>"));
        assert!(xml.contains("<lastmod>2025-01-02T03:04:05Z</lastmod>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
        assert!(xml.contains("<priority>0.7</priority>"));
    }

    #[test]
    fn test_empty_sitemap_is_valid() {
        let xml = SitemapTemplate { urls: vec![] }.render().unwrap();
        assert!(xml.contains("<urlset"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }
}
