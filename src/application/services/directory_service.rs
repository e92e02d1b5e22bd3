//! Doctor profiles, specialty and hospital pages, and the sitemap.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;

use crate::application::seo::{self, Breadcrumb, PageMetadata, page_url};
use crate::config::SiteSettings;
use crate::domain::aggregation::{self, RELATED_SPECIALTIES_LIMIT};
use crate::domain::entities::{AggregatePair, DoctorRecord, GroupKey, SpecialtyCount};
use crate::domain::query::{FilterCriteria, ListingQuery, build_query};
use crate::domain::repositories::DoctorRepository;
use crate::error::AppError;

/// A doctor with everything its profile page needs.
#[derive(Debug, Clone)]
pub struct DoctorProfile {
    pub doctor: DoctorRecord,
    pub metadata: PageMetadata,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub structured_data: Value,
}

/// Doctors of one specialty in one location.
#[derive(Debug, Clone)]
pub struct SpecialtyListing {
    pub location: String,
    pub specialty: String,
    pub specialty_slug: String,
    pub doctors: Vec<DoctorRecord>,
    pub related: Vec<SpecialtyCount>,
}

/// Doctors of one hospital, with the other hospitals of its location.
#[derive(Debug, Clone)]
pub struct HospitalListing {
    pub location: String,
    pub hospital: String,
    pub hospital_slug: String,
    pub doctors: Vec<DoctorRecord>,
    pub other_hospitals: Vec<AggregatePair>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl ChangeFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

/// One `<url>` entry of the sitemap.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapUrl {
    pub loc: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: ChangeFrequency,
    pub priority: &'static str,
}

impl SitemapUrl {
    /// `lastmod` in W3C datetime form.
    pub fn lastmod(&self) -> String {
        self.last_modified.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

const STATIC_PAGES: [(&str, ChangeFrequency, &str); 5] = [
    ("", ChangeFrequency::Daily, "1.0"),
    ("about", ChangeFrequency::Monthly, "0.5"),
    ("contact", ChangeFrequency::Monthly, "0.5"),
    ("privacy-policy", ChangeFrequency::Yearly, "0.3"),
    ("terms", ChangeFrequency::Yearly, "0.3"),
];

/// Service behind the detail pages and the sitemap.
pub struct DirectoryService<R: DoctorRepository + ?Sized> {
    repository: Arc<R>,
    site: SiteSettings,
}

impl<R: DoctorRepository + ?Sized> DirectoryService<R> {
    pub fn new(repository: Arc<R>, site: SiteSettings) -> Self {
        Self { repository, site }
    }

    pub fn site(&self) -> &SiteSettings {
        &self.site
    }

    /// Looks up a doctor by slug and builds its page metadata.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(profile))` if the slug exists
    /// - `Ok(None)` otherwise
    pub async fn doctor_profile(&self, slug: &str) -> Result<Option<DoctorProfile>, AppError> {
        let Some(doctor) = self.repository.find_by_slug(slug).await? else {
            return Ok(None);
        };

        Ok(Some(DoctorProfile {
            metadata: seo::page_metadata(&doctor, &self.site),
            breadcrumbs: seo::breadcrumbs(&doctor, &self.site),
            structured_data: seo::physician_schema(&doctor, &self.site),
            doctor,
        }))
    }

    /// Doctors of a specialty in a location, best rated first.
    ///
    /// Returns `None` when no record carries the specialty slug at all. A
    /// known specialty without doctors in the location yields an empty list.
    pub async fn specialty_listing(
        &self,
        location: &str,
        specialty_slug: &str,
    ) -> Result<Option<SpecialtyListing>, AppError> {
        let Some(specialty) = self.repository.find_specialty_name(specialty_slug).await? else {
            return Ok(None);
        };

        let query = build_query(&FilterCriteria {
            location: Some(location.to_string()),
            specialty_slug: Some(specialty_slug.to_string()),
            ..FilterCriteria::default()
        });

        let (doctors, pairs) = tokio::try_join!(
            self.repository.find_all(&query),
            self.repository.aggregate_pairs(GroupKey::LocationSpecialty)
        )?;

        Ok(Some(SpecialtyListing {
            location: location.to_string(),
            specialty,
            specialty_slug: specialty_slug.to_string(),
            doctors,
            related: aggregation::related_specialties(
                pairs,
                location,
                specialty_slug,
                RELATED_SPECIALTIES_LIMIT,
            ),
        }))
    }

    /// Hospitals of a location with their doctor counts, alphabetically.
    pub async fn hospitals_in_location(
        &self,
        location: &str,
    ) -> Result<Vec<AggregatePair>, AppError> {
        let pairs = self
            .repository
            .aggregate_pairs(GroupKey::LocationHospital)
            .await?;
        Ok(aggregation::hospitals_in_location(pairs, location, None))
    }

    /// Doctors of the hospital with the given persisted slug in a location.
    ///
    /// Returns `None` when the hospital has no doctors there.
    pub async fn hospital_listing(
        &self,
        location: &str,
        hospital_slug: &str,
    ) -> Result<Option<HospitalListing>, AppError> {
        let query = ListingQuery::for_hospital(location, hospital_slug);

        let (doctors, pairs) = tokio::try_join!(
            self.repository.find_all(&query),
            self.repository.aggregate_pairs(GroupKey::LocationHospital)
        )?;

        let Some(hospital) = doctors.iter().find_map(|d| d.hospital.clone()) else {
            return Ok(None);
        };

        Ok(Some(HospitalListing {
            location: location.to_string(),
            hospital,
            hospital_slug: hospital_slug.to_string(),
            doctors,
            other_hospitals: aggregation::hospitals_in_location(
                pairs,
                location,
                Some(hospital_slug),
            ),
        }))
    }

    /// Every public page of the site, for `sitemap.xml`.
    ///
    /// Pages without a natural modification time use `now`. Duplicate
    /// locations are dropped, keeping the first occurrence.
    pub async fn sitemap(&self, now: DateTime<Utc>) -> Result<Vec<SitemapUrl>, AppError> {
        let (doctors, specialty_pairs, hospital_pairs) = tokio::try_join!(
            self.repository.sitemap_entries(),
            self.repository.aggregate_pairs(GroupKey::LocationSpecialty),
            self.repository.aggregate_pairs(GroupKey::LocationHospital)
        )?;

        let base = &self.site.base_url;
        let mut seen = HashSet::new();
        let mut urls = Vec::new();
        let mut push = |loc: String, last_modified, change_frequency, priority| {
            if seen.insert(loc.clone()) {
                urls.push(SitemapUrl {
                    loc,
                    last_modified,
                    change_frequency,
                    priority,
                });
            }
        };

        for (path, frequency, priority) in STATIC_PAGES {
            let url = if path.is_empty() {
                page_url(base, &[])
            } else {
                page_url(base, &[path])
            };
            push(url.to_string(), now, frequency, priority);
        }

        for entry in doctors {
            push(
                page_url(base, &[&entry.slug]).to_string(),
                entry.updated_at.unwrap_or(now),
                ChangeFrequency::Weekly,
                "0.8",
            );
        }

        for pair in &specialty_pairs {
            if let Some(slug) = pair.slug.as_deref() {
                push(
                    page_url(base, &["specialists", &pair.location, slug]).to_string(),
                    now,
                    ChangeFrequency::Weekly,
                    "0.7",
                );
            }
        }

        for pair in &hospital_pairs {
            push(
                page_url(base, &["hospitals", &pair.location]).to_string(),
                now,
                ChangeFrequency::Weekly,
                "0.7",
            );
        }

        for pair in &hospital_pairs {
            if let Some(slug) = pair.slug.as_deref() {
                push(
                    page_url(base, &["hospitals", &pair.location, slug]).to_string(),
                    now,
                    ChangeFrequency::Weekly,
                    "0.7",
                );
            }
        }

        Ok(urls)
    }
}
