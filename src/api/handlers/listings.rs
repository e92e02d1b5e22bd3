//! Handler for the listing endpoint.

use axum::{
    extract::{Query, State, rejection::QueryRejection},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::api::dto::listings::{
    HospitalPairItem, HospitalsResponse, ListingsParams, ListingsRequest, ListingsResponse,
    LocationsResponse, PairsResponse, PopularSpecialtiesResponse, SpecialtiesResponse,
    SpecialtyPairItem,
};
use crate::error::AppError;
use crate::state::AppState;

/// Lists doctors or one of the navigation aggregates.
///
/// # Endpoint
///
/// `GET /api/listings`
///
/// # Query Parameters
///
/// - `name`, `speciality` (alias `specialty`), `location`, `hospital`:
///   case-insensitive substring filters
/// - `specialitySlug` (alias `specialtySlug`): exact specialty slug; together
///   with `location` the location must match as a whole and doctors are
///   ordered by rating, then experience
/// - `exclude`: slug of a doctor to leave out
/// - `sortBy`: `name` (default), `rating` or `experience`
/// - `page` (default 1), `pageSize` (alias `limit`, default 24, max 100)
///
/// Repeated keys keep their first value. Aggregate flags replace the doctor
/// list when given any non-empty value other than `false` or `0`:
/// `locations`, `specialties`, `hospitals`, `uniqueLocationSpecialtyPairs`,
/// `uniqueLocationHospitalPairs`, `popularSpecialties` (needs `location`).
///
/// # Cache Strategy
///
/// The serialized body is cached under the normalized request:
/// - **Cache hit**: body returned as stored
/// - **Cache miss**: query the store, spawn async cache write
/// - **Cache error**: treated as a miss
///
/// # Errors
///
/// Returns 400 Bad Request for `popularSpecialties` without a location.
/// Returns 503 Service Unavailable when the store cannot be reached.
pub async fn listings_handler(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(pairs) = query.map_err(|e| {
        AppError::bad_request("Invalid query string", json!({ "reason": e.body_text() }))
    })?;
    let request = ListingsParams::from_pairs(pairs)?.into_request(state.default_page_size)?;
    let cache_key = request.cache_key();

    match state.cache.get(&cache_key).await {
        Ok(Some(body)) => {
            debug!("Cache HIT for {}", cache_key);
            metrics::counter!("listings_cache_hits_total").increment(1);
            return Ok(json_body(body));
        }
        Ok(None) => {
            debug!("Cache MISS for {}", cache_key);
            metrics::counter!("listings_cache_misses_total").increment(1);
        }
        Err(e) => {
            warn!("Cache error: {}", e);
            metrics::counter!("listings_cache_misses_total").increment(1);
        }
    }

    let body = execute(&state, request).await?;

    let cache = state.cache.clone();
    let cached_body = body.clone();
    let ttl = state.cache_ttl_seconds;
    tokio::spawn(async move {
        if let Err(e) = cache.set(&cache_key, &cached_body, Some(ttl)).await {
            warn!("Failed to cache listing: {}", e);
        }
    });

    Ok(json_body(body))
}

async fn execute(state: &AppState, request: ListingsRequest) -> Result<String, AppError> {
    let service = &state.listing_service;

    match request {
        ListingsRequest::Doctors(criteria) => {
            let page = service.list(&criteria).await?;
            to_json(&ListingsResponse::from(page))
        }
        ListingsRequest::Locations => to_json(&LocationsResponse {
            locations: service.locations().await?,
        }),
        ListingsRequest::Specialties { location } => to_json(&SpecialtiesResponse {
            specialties: service.specialties(location).await?,
        }),
        ListingsRequest::Hospitals { location } => to_json(&HospitalsResponse {
            hospitals: service.hospitals(location).await?,
        }),
        ListingsRequest::LocationSpecialtyPairs => {
            let pairs = service.location_specialty_pairs().await?;
            to_json(&PairsResponse {
                pairs: pairs
                    .into_iter()
                    .map(SpecialtyPairItem::from)
                    .collect::<Vec<_>>(),
            })
        }
        ListingsRequest::LocationHospitalPairs => {
            let pairs = service.location_hospital_pairs().await?;
            to_json(&PairsResponse {
                pairs: pairs
                    .into_iter()
                    .map(HospitalPairItem::from)
                    .collect::<Vec<_>>(),
            })
        }
        ListingsRequest::PopularSpecialties { location } => {
            let specialties = service.popular_specialties(&location).await?;
            to_json(&PopularSpecialtiesResponse {
                location,
                specialties: specialties.into_iter().map(Into::into).collect(),
            })
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string(value).map_err(|e| {
        tracing::error!("Failed to serialize listing response: {}", e);
        AppError::internal("Internal Server Error", json!({}))
    })
}

fn json_body(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}
