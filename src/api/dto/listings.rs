//! Query parameters and responses of the listing endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use serde_with::{NoneAsEmptyString, serde_as};

use crate::domain::entities::{AggregatePair, DoctorRecord, SpecialtyCount};
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::query::{FilterCriteria, SortKey};
use crate::error::AppError;

/// Raw query string of `GET /api/listings`.
///
/// Every value is kept as text and normalized afterwards, so malformed
/// numbers or sort keys fall back to defaults instead of rejecting the
/// request. Empty values count as absent. Build it with
/// [`ListingsParams::from_pairs`] so that repeated keys never reject a request.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingsParams {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub name: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default, alias = "specialty")]
    pub speciality: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default, alias = "specialtySlug")]
    pub speciality_slug: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub location: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub hospital: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub exclude: Option<String>,

    #[serde(default)]
    pub sort_by: Option<String>,

    #[serde(default)]
    pub page: Option<String>,

    #[serde(default, alias = "limit")]
    pub page_size: Option<String>,

    #[serde(default)]
    pub locations: Option<String>,

    #[serde(default, alias = "specialities")]
    pub specialties: Option<String>,

    #[serde(default)]
    pub hospitals: Option<String>,

    #[serde(default, alias = "uniqueLocationSpecialityPairs")]
    pub unique_location_specialty_pairs: Option<String>,

    #[serde(default)]
    pub unique_location_hospital_pairs: Option<String>,

    #[serde(default)]
    pub popular_specialties: Option<String>,
}

/// Accepted spellings of each parameter, keyed by its canonical name.
const ALIASES: &[(&str, &str)] = &[
    ("specialty", "speciality"),
    ("specialtySlug", "specialitySlug"),
    ("limit", "pageSize"),
    ("specialities", "specialties"),
    ("uniqueLocationSpecialityPairs", "uniqueLocationSpecialtyPairs"),
];

fn canonical_key(key: &str) -> &str {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map_or(key, |(_, canonical)| canonical)
}

/// A flag is set by any non-empty value other than `false` or `0`.
fn flag(value: &Option<String>) -> bool {
    value.as_deref().map(str::trim).is_some_and(|v| {
        !v.is_empty() && v != "0" && !v.eq_ignore_ascii_case("false")
    })
}

/// What a listing request asks for, after normalization.
///
/// Its JSON form is the cache key of the response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListingsRequest {
    Doctors(FilterCriteria),
    Locations,
    Specialties { location: Option<String> },
    Hospitals { location: Option<String> },
    LocationSpecialtyPairs,
    LocationHospitalPairs,
    PopularSpecialties { location: String },
}

impl ListingsRequest {
    pub fn cache_key(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{:?}", self))
    }
}

impl ListingsParams {
    /// Folds decoded query pairs into parameters.
    ///
    /// Aliases map onto their canonical name and the first value of a
    /// repeated key wins. Unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the pairs cannot be read as
    /// parameters.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Result<Self, AppError> {
        let mut fields = serde_json::Map::new();
        for (key, value) in pairs {
            fields
                .entry(canonical_key(&key).to_string())
                .or_insert(Value::String(value));
        }

        serde_json::from_value(Value::Object(fields)).map_err(|e| {
            AppError::bad_request("Invalid query string", json!({ "reason": e.to_string() }))
        })
    }

    /// Resolves the parameters into a single request.
    ///
    /// Aggregate flags are checked in this order: `locations`, `specialties`,
    /// `hospitals`, `uniqueLocationSpecialtyPairs`, `uniqueLocationHospitalPairs`,
    /// `popularSpecialties`. Without any flag the request is a doctor listing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when `popularSpecialties` is set
    /// without a `location`.
    pub fn into_request(self, default_page_size: u32) -> Result<ListingsRequest, AppError> {
        if flag(&self.locations) {
            return Ok(ListingsRequest::Locations);
        }
        if flag(&self.specialties) {
            return Ok(ListingsRequest::Specialties {
                location: self.location,
            });
        }
        if flag(&self.hospitals) {
            return Ok(ListingsRequest::Hospitals {
                location: self.location,
            });
        }
        if flag(&self.unique_location_specialty_pairs) {
            return Ok(ListingsRequest::LocationSpecialtyPairs);
        }
        if flag(&self.unique_location_hospital_pairs) {
            return Ok(ListingsRequest::LocationHospitalPairs);
        }
        if flag(&self.popular_specialties) {
            let location = self.location.ok_or_else(|| {
                AppError::bad_request(
                    "location is required with popularSpecialties",
                    json!({ "field": "location" }),
                )
            })?;
            return Ok(ListingsRequest::PopularSpecialties { location });
        }

        let page = PageRequest::from_raw(
            self.page.as_deref(),
            self.page_size.as_deref(),
            default_page_size,
        );

        Ok(ListingsRequest::Doctors(FilterCriteria {
            name: self.name,
            specialty: self.speciality,
            specialty_slug: self.speciality_slug,
            location: self.location,
            hospital: self.hospital,
            exclude: self.exclude,
            sort_key: SortKey::parse_lenient(self.sort_by.as_deref()),
            page,
        }))
    }
}

/// One page of doctors.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingsResponse {
    pub items: Vec<DoctorRecord>,
    pub total_count: u64,
    pub total_pages: u64,
    pub current_page: u32,
    pub page_size: u32,
}

impl From<Page<DoctorRecord>> for ListingsResponse {
    fn from(page: Page<DoctorRecord>) -> Self {
        Self {
            items: page.items,
            total_count: page.total_count,
            total_pages: page.total_pages,
            current_page: page.current_page,
            page_size: page.page_size,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LocationsResponse {
    pub locations: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SpecialtiesResponse {
    pub specialties: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct HospitalsResponse {
    pub hospitals: Vec<String>,
}

/// A (location, specialty) pair with its doctor count.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialtyPairItem {
    pub location: String,
    pub speciality: String,
    pub slugified_speciality: Option<String>,
    pub count: u64,
}

impl From<AggregatePair> for SpecialtyPairItem {
    fn from(pair: AggregatePair) -> Self {
        Self {
            location: pair.location,
            speciality: pair.value,
            slugified_speciality: pair.slug,
            count: pair.count,
        }
    }
}

/// A (location, hospital) pair with its doctor count.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalPairItem {
    pub location: String,
    pub hospital: String,
    pub hospital_slug: Option<String>,
    pub count: u64,
}

impl From<AggregatePair> for HospitalPairItem {
    fn from(pair: AggregatePair) -> Self {
        Self {
            location: pair.location,
            hospital: pair.value,
            hospital_slug: pair.slug,
            count: pair.count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PairsResponse<T> {
    pub pairs: Vec<T>,
}

/// A ranked specialty in navigation blocks.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialtyCountItem {
    pub speciality: String,
    pub speciality_slug: Option<String>,
    pub count: u64,
}

impl From<SpecialtyCount> for SpecialtyCountItem {
    fn from(specialty: SpecialtyCount) -> Self {
        Self {
            speciality: specialty.name,
            speciality_slug: specialty.slug,
            count: specialty.count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PopularSpecialtiesResponse {
    pub location: String,
    pub specialties: Vec<SpecialtyCountItem>,
}
