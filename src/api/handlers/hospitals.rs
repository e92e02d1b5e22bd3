//! Handlers for hospital pages.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;

use crate::api::dto::directory::{HospitalPageResponse, HospitalsInLocationResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Lists the hospitals of a location with their doctor counts.
///
/// # Endpoint
///
/// `GET /api/hospitals/{location}`
///
/// An unknown location yields an empty list.
pub async fn hospitals_in_location_handler(
    Path(location): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<HospitalsInLocationResponse>, AppError> {
    let hospitals = state
        .directory_service
        .hospitals_in_location(&location)
        .await?;

    Ok(Json(HospitalsInLocationResponse {
        location,
        hospitals: hospitals.into_iter().map(Into::into).collect(),
    }))
}

/// Lists the doctors of one hospital and the other hospitals nearby.
///
/// # Endpoint
///
/// `GET /api/hospitals/{location}/{hospital_slug}`
///
/// The hospital is matched by its persisted slug.
///
/// # Errors
///
/// Returns 404 Not Found if the hospital has no doctors in the location.
pub async fn hospital_handler(
    Path((location, hospital_slug)): Path<(String, String)>,
    State(state): State<AppState>,
) -> Result<Json<HospitalPageResponse>, AppError> {
    let listing = state
        .directory_service
        .hospital_listing(&location, &hospital_slug)
        .await?
        .ok_or_else(|| {
            AppError::not_found(
                "Hospital not found",
                json!({ "location": location, "hospitalSlug": hospital_slug }),
            )
        })?;

    Ok(Json(listing.into()))
}
