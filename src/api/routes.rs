//! API route configuration.
//!
//! Every API endpoint is public and read-only.

use crate::api::handlers::{
    doctor_handler, hospital_handler, hospitals_in_location_handler, listings_handler,
    specialty_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// All API routes.
///
/// # Endpoints
///
/// - `GET /listings`                                - Filtered doctor pages and navigation aggregates
/// - `GET /doctors/{slug}`                          - Doctor profile with page metadata
/// - `GET /specialists/{location}/{specialty_slug}` - Doctors of one specialty in a location
/// - `GET /hospitals/{location}`                    - Hospitals of a location with doctor counts
/// - `GET /hospitals/{location}/{hospital_slug}`    - Doctors of one hospital
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/listings", get(listings_handler))
        .route("/doctors/{slug}", get(doctor_handler))
        .route(
            "/specialists/{location}/{specialty_slug}",
            get(specialty_handler),
        )
        .route("/hospitals/{location}", get(hospitals_in_location_handler))
        .route(
            "/hospitals/{location}/{hospital_slug}",
            get(hospital_handler),
        )
}
