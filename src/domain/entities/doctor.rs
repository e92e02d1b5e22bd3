//! Doctor entity, the single record type of the directory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A doctor listing as stored in the record store.
///
/// `slug` is the permanent external identifier. It is assigned at ingestion
/// time and never recomputed by this service. `specialty_slug` and
/// `hospital_slug` are persisted the same way and are the canonical path
/// segments for specialty and hospital pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DoctorRecord {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub specialty_slug: Option<String>,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub workplace: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub hospital: Option<String>,
    #[serde(default)]
    pub hospital_slug: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub visiting_hours: Option<String>,
    #[serde(default)]
    pub appointment_number: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub experience_years: Option<i32>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl DoctorRecord {
    /// Creates a record with only the identifying fields set.
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            photo_url: None,
            degree: None,
            specialty: None,
            specialty_slug: None,
            designation: None,
            workplace: None,
            about: None,
            hospital: None,
            hospital_slug: None,
            address: None,
            location: None,
            visiting_hours: None,
            appointment_number: None,
            rating: None,
            experience_years: None,
            updated_at: None,
        }
    }

    /// Sets the specialty and its persisted slug.
    pub fn with_specialty(mut self, specialty: impl Into<String>, slug: impl Into<String>) -> Self {
        self.specialty = Some(specialty.into());
        self.specialty_slug = Some(slug.into());
        self
    }

    /// Sets the hospital and its persisted slug.
    pub fn with_hospital(mut self, hospital: impl Into<String>, slug: impl Into<String>) -> Self {
        self.hospital = Some(hospital.into());
        self.hospital_slug = Some(slug.into());
        self
    }

    /// Sets the location (city or region).
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets rating and years of experience.
    pub fn with_ranking(mut self, rating: Option<f64>, experience_years: Option<i32>) -> Self {
        self.rating = rating;
        self.experience_years = experience_years;
        self
    }

    /// Returns the value of a text field used for filtering and grouping.
    pub fn field(&self, field: DoctorField) -> Option<&str> {
        match field {
            DoctorField::Slug => Some(self.slug.as_str()),
            DoctorField::Name => Some(self.name.as_str()),
            DoctorField::Specialty => self.specialty.as_deref(),
            DoctorField::SpecialtySlug => self.specialty_slug.as_deref(),
            DoctorField::Hospital => self.hospital.as_deref(),
            DoctorField::HospitalSlug => self.hospital_slug.as_deref(),
            DoctorField::Location => self.location.as_deref(),
        }
    }
}

/// Text fields of [`DoctorRecord`] that queries can constrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoctorField {
    Slug,
    Name,
    Specialty,
    SpecialtySlug,
    Hospital,
    HospitalSlug,
    Location,
}

impl DoctorField {
    /// Column name in the `doctors` table.
    pub fn column(self) -> &'static str {
        match self {
            Self::Slug => "slug",
            Self::Name => "name",
            Self::Specialty => "specialty",
            Self::SpecialtySlug => "specialty_slug",
            Self::Hospital => "hospital",
            Self::HospitalSlug => "hospital_slug",
            Self::Location => "location",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_grouping_fields() {
        let doctor = DoctorRecord::new("dr-a", "Dr. A")
            .with_location("Dhaka")
            .with_specialty("Cardiology", "cardiology")
            .with_hospital("Square Hospital", "square-hospital");

        assert_eq!(doctor.field(DoctorField::Location), Some("Dhaka"));
        assert_eq!(doctor.field(DoctorField::SpecialtySlug), Some("cardiology"));
        assert_eq!(doctor.field(DoctorField::HospitalSlug), Some("square-hospital"));
        assert_eq!(doctor.field(DoctorField::Name), Some("Dr. A"));
    }

    #[test]
    fn test_missing_fields_are_none() {
        let doctor = DoctorRecord::new("dr-b", "Dr. B");
        assert_eq!(doctor.field(DoctorField::Location), None);
        assert_eq!(doctor.field(DoctorField::Specialty), None);
    }

    #[test]
    fn test_deserialize_partial_json() {
        let json = r#"{"slug":"dr-c","name":"Dr. C","location":"Sylhet","rating":4.5}"#;
        let doctor: DoctorRecord = serde_json::from_str(json).unwrap();
        assert_eq!(doctor.location.as_deref(), Some("Sylhet"));
        assert_eq!(doctor.rating, Some(4.5));
        assert!(doctor.specialty.is_none());
    }

    #[test]
    fn test_serializes_camel_case() {
        let doctor = DoctorRecord::new("dr-d", "Dr. D").with_specialty("ENT", "ent");
        let json = serde_json::to_value(&doctor).unwrap();
        assert_eq!(json["specialtySlug"], "ent");
        assert!(json.get("specialty_slug").is_none());
    }
}
