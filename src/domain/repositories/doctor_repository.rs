//! Repository trait for the doctor record store.

use crate::domain::entities::{AggregatePair, DoctorField, DoctorRecord, GroupKey};
use crate::domain::pagination::PageRequest;
use crate::domain::query::ListingQuery;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Slug and modification time of a doctor page, for sitemap generation.
#[derive(Debug, Clone, PartialEq)]
pub struct DoctorSitemapEntry {
    pub slug: String,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Read-only access to the collection of doctor records.
///
/// The service never writes; records are maintained by a separate ingestion
/// process.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgDoctorRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryDoctorRepository`] - In-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DoctorRepository: Send + Sync {
    /// Returns one page of records matching the query, in query order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] if the store cannot be reached.
    /// Returns [`AppError::Internal`] on other database errors.
    async fn find(
        &self,
        query: &ListingQuery,
        page: PageRequest,
    ) -> Result<Vec<DoctorRecord>, AppError>;

    /// Returns every record matching the query, in query order.
    async fn find_all(&self, query: &ListingQuery) -> Result<Vec<DoctorRecord>, AppError>;

    /// Counts records matching the query.
    async fn count(&self, query: &ListingQuery) -> Result<u64, AppError>;

    /// Looks up a record by its permanent slug.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))` if a record has this slug
    /// - `Ok(None)` otherwise
    async fn find_by_slug(&self, slug: &str) -> Result<Option<DoctorRecord>, AppError>;

    /// Distinct non-null values of a field, sorted ascending.
    ///
    /// When `location` is given only records in that location (compared
    /// without regard to case) are considered.
    async fn distinct_values(
        &self,
        field: DoctorField,
        location: Option<String>,
    ) -> Result<Vec<String>, AppError>;

    /// Doctor counts per (location, specialty) or (location, hospital) pair.
    async fn aggregate_pairs(&self, key: GroupKey) -> Result<Vec<AggregatePair>, AppError>;

    /// Display name of the specialty with the given persisted slug.
    async fn find_specialty_name(&self, specialty_slug: &str) -> Result<Option<String>, AppError>;

    /// Slugs and modification times of every doctor.
    async fn sitemap_entries(&self) -> Result<Vec<DoctorSitemapEntry>, AppError>;

    /// Verifies the store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
