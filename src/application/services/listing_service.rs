//! Browse, filter and aggregate doctor listings.

use std::sync::Arc;

use crate::domain::aggregation::{self, POPULAR_SPECIALTIES_LIMIT};
use crate::domain::entities::{AggregatePair, DoctorField, DoctorRecord, GroupKey, SpecialtyCount};
use crate::domain::pagination::Page;
use crate::domain::query::{FilterCriteria, build_query};
use crate::domain::repositories::DoctorRepository;
use crate::error::AppError;

/// Service behind the listing endpoint.
///
/// Turns [`FilterCriteria`] into a query, runs the page and count queries
/// concurrently and exposes the distinct-value and grouped-count views used
/// for navigation.
pub struct ListingService<R: DoctorRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: DoctorRepository + ?Sized> ListingService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns one page of doctors matching the criteria.
    ///
    /// A page beyond the last one has no items but still reports the totals.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] or [`AppError::Internal`] when the
    /// store fails.
    pub async fn list(&self, criteria: &FilterCriteria) -> Result<Page<DoctorRecord>, AppError> {
        let query = build_query(criteria);
        let request = criteria.page;

        let (items, total_count) = tokio::try_join!(
            self.repository.find(&query, request),
            self.repository.count(&query)
        )?;

        Ok(Page::from_parts(items, total_count, request))
    }

    /// All distinct locations, sorted.
    pub async fn locations(&self) -> Result<Vec<String>, AppError> {
        self.repository
            .distinct_values(DoctorField::Location, None)
            .await
    }

    /// Distinct specialties, optionally within one location.
    pub async fn specialties(&self, location: Option<String>) -> Result<Vec<String>, AppError> {
        self.repository
            .distinct_values(DoctorField::Specialty, location)
            .await
    }

    /// Distinct hospitals, optionally within one location.
    pub async fn hospitals(&self, location: Option<String>) -> Result<Vec<String>, AppError> {
        self.repository
            .distinct_values(DoctorField::Hospital, location)
            .await
    }

    pub async fn location_specialty_pairs(&self) -> Result<Vec<AggregatePair>, AppError> {
        self.repository
            .aggregate_pairs(GroupKey::LocationSpecialty)
            .await
    }

    pub async fn location_hospital_pairs(&self) -> Result<Vec<AggregatePair>, AppError> {
        self.repository
            .aggregate_pairs(GroupKey::LocationHospital)
            .await
    }

    /// The most common specialties of a location, by doctor count.
    pub async fn popular_specialties(&self, location: &str) -> Result<Vec<SpecialtyCount>, AppError> {
        let pairs = self.location_specialty_pairs().await?;
        Ok(aggregation::popular_specialties(
            pairs,
            location,
            POPULAR_SPECIALTIES_LIMIT,
        ))
    }

    /// Verifies the record store is reachable.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pagination::PageRequest;
    use crate::domain::repositories::MockDoctorRepository;
    use crate::domain::query::Predicate;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_list_assembles_page() {
        let mut mock_repo = MockDoctorRepository::new();

        mock_repo
            .expect_find()
            .withf(|query, page| query.predicates.len() == 1 && page.page == 2)
            .times(1)
            .returning(|_, _| Ok(vec![DoctorRecord::new("dr-k", "Dr. K")]));
        mock_repo
            .expect_count()
            .times(1)
            .returning(|_| Ok(11));

        let service = ListingService::new(Arc::new(mock_repo));
        let criteria = FilterCriteria {
            location: Some("Dhaka".into()),
            page: PageRequest::new(2, 10),
            ..FilterCriteria::default()
        };

        let page = service.list(&criteria).await.unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_count, 11);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.current_page, 2);
    }

    #[tokio::test]
    async fn test_list_passes_exclusion_to_store() {
        let mut mock_repo = MockDoctorRepository::new();

        mock_repo
            .expect_find()
            .withf(|query, _| {
                query.predicates.iter().any(|p| {
                    matches!(p, Predicate::NotEquals { value, .. } if value == "dr-self")
                })
            })
            .times(1)
            .returning(|_, _| Ok(vec![]));
        mock_repo.expect_count().times(1).returning(|_| Ok(0));

        let service = ListingService::new(Arc::new(mock_repo));
        let criteria = FilterCriteria {
            specialty: Some("ENT".into()),
            exclude: Some("dr-self".into()),
            ..FilterCriteria::default()
        };

        let page = service.list(&criteria).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[tokio::test]
    async fn test_list_propagates_store_failure() {
        let mut mock_repo = MockDoctorRepository::new();

        mock_repo
            .expect_find()
            .returning(|_, _| Err(AppError::unavailable("Service temporarily unavailable")));
        mock_repo.expect_count().returning(|_| Ok(3));

        let service = ListingService::new(Arc::new(mock_repo));
        let result = service.list(&FilterCriteria::default()).await;

        assert!(matches!(result, Err(AppError::Unavailable { .. })));
    }

    #[tokio::test]
    async fn test_specialties_scoped_to_location() {
        let mut mock_repo = MockDoctorRepository::new();

        mock_repo
            .expect_distinct_values()
            .with(eq(DoctorField::Specialty), eq(Some("Dhaka".to_string())))
            .times(1)
            .returning(|_, _| Ok(vec!["Cardiology".to_string()]));

        let service = ListingService::new(Arc::new(mock_repo));
        let specialties = service.specialties(Some("Dhaka".into())).await.unwrap();

        assert_eq!(specialties, vec!["Cardiology"]);
    }

    #[tokio::test]
    async fn test_popular_specialties_top_ten() {
        let mut mock_repo = MockDoctorRepository::new();

        mock_repo
            .expect_aggregate_pairs()
            .with(eq(GroupKey::LocationSpecialty))
            .times(1)
            .returning(|_| {
                Ok((1..=15)
                    .map(|n| AggregatePair::new("Dhaka", format!("S{n:02}"), None, n))
                    .collect())
            });

        let service = ListingService::new(Arc::new(mock_repo));
        let popular = service.popular_specialties("Dhaka").await.unwrap();

        assert_eq!(popular.len(), 10);
        assert_eq!(popular[0].name, "S15");
        assert_eq!(popular[0].count, 15);
    }
}
