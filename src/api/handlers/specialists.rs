//! Handler for specialty pages.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;

use crate::api::dto::directory::SpecialtyPageResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the doctors of one specialty in one location, best rated first.
///
/// # Endpoint
///
/// `GET /api/specialists/{location}/{specialty_slug}`
///
/// # Response
///
/// Doctors ordered by rating then experience, plus up to five other
/// specialties of the location ranked by doctor count. A known specialty with
/// no doctors in the location returns an empty `doctors` list.
///
/// # Errors
///
/// Returns 404 Not Found if no doctor has the specialty slug.
pub async fn specialty_handler(
    Path((location, specialty_slug)): Path<(String, String)>,
    State(state): State<AppState>,
) -> Result<Json<SpecialtyPageResponse>, AppError> {
    let listing = state
        .directory_service
        .specialty_listing(&location, &specialty_slug)
        .await?
        .ok_or_else(|| {
            AppError::not_found(
                "Specialty not found",
                json!({ "location": location, "specialitySlug": specialty_slug }),
            )
        })?;

    Ok(Json(listing.into()))
}
