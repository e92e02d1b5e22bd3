//! Handler for a single doctor profile.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;

use crate::api::dto::directory::DoctorProfileResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns a doctor with page metadata and structured data.
///
/// # Endpoint
///
/// `GET /api/doctors/{slug}`
///
/// # Errors
///
/// Returns 404 Not Found if no doctor has the slug.
pub async fn doctor_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DoctorProfileResponse>, AppError> {
    let profile = state
        .directory_service
        .doctor_profile(&slug)
        .await?
        .ok_or_else(|| AppError::not_found("Doctor not found", json!({ "slug": slug })))?;

    Ok(Json(profile.into()))
}
