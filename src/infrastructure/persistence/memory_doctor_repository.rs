//! In-process doctor repository backed by a vector of records.

use async_trait::async_trait;
use std::collections::BTreeSet;
use std::path::Path;

use crate::domain::aggregation;
use crate::domain::entities::{AggregatePair, DoctorField, DoctorRecord, GroupKey};
use crate::domain::pagination::{PageRequest, paginate};
use crate::domain::query::{ListingQuery, Predicate};
use crate::domain::repositories::{DoctorRepository, DoctorSitemapEntry};
use crate::error::AppError;

/// Repository evaluating [`ListingQuery`] in memory.
///
/// Records keep the order they were loaded in, which stands in for insertion
/// order when aggregating. Used by `STORE=memory` and by the handler tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryDoctorRepository {
    records: Vec<DoctorRecord>,
}

impl MemoryDoctorRepository {
    pub fn new(records: Vec<DoctorRecord>) -> Self {
        Self { records }
    }

    /// Loads records from a JSON file holding an array of doctors.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if two
    /// records share a slug.
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let records: Vec<DoctorRecord> = serde_json::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;

        let mut seen = BTreeSet::new();
        if let Some(duplicate) = records.iter().find(|r| !seen.insert(r.slug.as_str())) {
            anyhow::bail!("Duplicate doctor slug '{}' in {}", duplicate.slug, path.display());
        }

        Ok(Self::new(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl DoctorRepository for MemoryDoctorRepository {
    async fn find(
        &self,
        query: &ListingQuery,
        page: PageRequest,
    ) -> Result<Vec<DoctorRecord>, AppError> {
        Ok(paginate(query.apply(&self.records), page).items)
    }

    async fn find_all(&self, query: &ListingQuery) -> Result<Vec<DoctorRecord>, AppError> {
        Ok(query.apply(&self.records))
    }

    async fn count(&self, query: &ListingQuery) -> Result<u64, AppError> {
        Ok(self.records.iter().filter(|r| query.matches(r)).count() as u64)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<DoctorRecord>, AppError> {
        Ok(self.records.iter().find(|r| r.slug == slug).cloned())
    }

    async fn distinct_values(
        &self,
        field: DoctorField,
        location: Option<String>,
    ) -> Result<Vec<String>, AppError> {
        let in_location = location.map(|value| Predicate::EqualsIgnoreCase {
            field: DoctorField::Location,
            value,
        });

        let values: BTreeSet<&str> = self
            .records
            .iter()
            .filter(|r| in_location.as_ref().is_none_or(|p| p.matches(r)))
            .filter_map(|r| r.field(field))
            .collect();

        Ok(values.into_iter().map(str::to_string).collect())
    }

    async fn aggregate_pairs(&self, key: GroupKey) -> Result<Vec<AggregatePair>, AppError> {
        Ok(aggregation::aggregate_pairs(&self.records, key))
    }

    async fn find_specialty_name(&self, specialty_slug: &str) -> Result<Option<String>, AppError> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.specialty_slug.as_deref() == Some(specialty_slug))
            .find_map(|r| r.specialty.clone()))
    }

    async fn sitemap_entries(&self) -> Result<Vec<DoctorSitemapEntry>, AppError> {
        let mut entries: Vec<DoctorSitemapEntry> = self
            .records
            .iter()
            .map(|r| DoctorSitemapEntry {
                slug: r.slug.clone(),
                updated_at: r.updated_at,
            })
            .collect();
        entries.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(entries)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
