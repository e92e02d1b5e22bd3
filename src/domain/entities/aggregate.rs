//! Grouped counts derived from doctor records.

use serde::Serialize;

use super::doctor::DoctorField;

/// The pair of fields a navigation aggregate groups by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKey {
    LocationSpecialty,
    LocationHospital,
}

impl GroupKey {
    /// Field holding the value grouped alongside the location.
    pub fn value_field(self) -> DoctorField {
        match self {
            Self::LocationSpecialty => DoctorField::Specialty,
            Self::LocationHospital => DoctorField::Hospital,
        }
    }

    /// Field holding the persisted slug of [`Self::value_field`].
    pub fn slug_field(self) -> DoctorField {
        match self {
            Self::LocationSpecialty => DoctorField::SpecialtySlug,
            Self::LocationHospital => DoctorField::HospitalSlug,
        }
    }
}

/// Number of doctors sharing a (location, specialty-or-hospital) pair.
///
/// `slug` is the persisted slug of the first record seen in the group; records
/// sharing a specialty or hospital are expected to share one slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatePair {
    pub location: String,
    pub value: String,
    pub slug: Option<String>,
    pub count: u64,
}

impl AggregatePair {
    pub fn new(
        location: impl Into<String>,
        value: impl Into<String>,
        slug: Option<String>,
        count: u64,
    ) -> Self {
        Self {
            location: location.into(),
            value: value.into(),
            slug,
            count,
        }
    }
}

/// A specialty with its slug and doctor count, used for ranked navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecialtyCount {
    pub name: String,
    pub slug: Option<String>,
    pub location: String,
    pub count: u64,
}

impl From<AggregatePair> for SpecialtyCount {
    fn from(pair: AggregatePair) -> Self {
        Self {
            name: pair.value,
            slug: pair.slug,
            location: pair.location,
            count: pair.count,
        }
    }
}
