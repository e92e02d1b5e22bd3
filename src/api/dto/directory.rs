//! Responses of the doctor, specialist and hospital page endpoints.

use serde::Serialize;
use serde_json::Value;

use crate::api::dto::listings::SpecialtyCountItem;
use crate::application::seo::{Breadcrumb, PageMetadata};
use crate::application::services::{DoctorProfile, HospitalListing, SpecialtyListing};
use crate::domain::entities::{AggregatePair, DoctorRecord};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorProfileResponse {
    pub doctor: DoctorRecord,
    pub metadata: PageMetadata,
    pub breadcrumbs: Vec<Breadcrumb>,
    /// schema.org `Physician` JSON-LD.
    pub structured_data: Value,
}

impl From<DoctorProfile> for DoctorProfileResponse {
    fn from(profile: DoctorProfile) -> Self {
        Self {
            doctor: profile.doctor,
            metadata: profile.metadata,
            breadcrumbs: profile.breadcrumbs,
            structured_data: profile.structured_data,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialtyPageResponse {
    pub location: String,
    pub speciality: String,
    pub speciality_slug: String,
    pub doctors: Vec<DoctorRecord>,
    pub related_specialities: Vec<SpecialtyCountItem>,
}

impl From<SpecialtyListing> for SpecialtyPageResponse {
    fn from(listing: SpecialtyListing) -> Self {
        Self {
            location: listing.location,
            speciality: listing.specialty,
            speciality_slug: listing.specialty_slug,
            doctors: listing.doctors,
            related_specialities: listing.related.into_iter().map(Into::into).collect(),
        }
    }
}

/// A hospital with the number of doctors listed there.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalCountItem {
    pub hospital: String,
    pub hospital_slug: Option<String>,
    pub count: u64,
}

impl From<AggregatePair> for HospitalCountItem {
    fn from(pair: AggregatePair) -> Self {
        Self {
            hospital: pair.value,
            hospital_slug: pair.slug,
            count: pair.count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HospitalsInLocationResponse {
    pub location: String,
    pub hospitals: Vec<HospitalCountItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalPageResponse {
    pub location: String,
    pub hospital: String,
    pub hospital_slug: String,
    pub doctors: Vec<DoctorRecord>,
    pub other_hospitals: Vec<HospitalCountItem>,
}

impl From<HospitalListing> for HospitalPageResponse {
    fn from(listing: HospitalListing) -> Self {
        Self {
            location: listing.location,
            hospital: listing.hospital,
            hospital_slug: listing.hospital_slug,
            doctors: listing.doctors,
            other_hospitals: listing.other_hospitals.into_iter().map(Into::into).collect(),
        }
    }
}
