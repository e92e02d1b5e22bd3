#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use doctor_directory::api;
use doctor_directory::api::handlers::health_handler;
use doctor_directory::api::middleware::cache_control;
use doctor_directory::config::SiteSettings;
use doctor_directory::domain::entities::{AggregatePair, DoctorField, DoctorRecord, GroupKey};
use doctor_directory::domain::pagination::PageRequest;
use doctor_directory::domain::query::ListingQuery;
use doctor_directory::domain::repositories::{DoctorRepository, DoctorSitemapEntry};
use doctor_directory::error::AppError;
use doctor_directory::infrastructure::cache::{CacheResult, CacheService, NullCache};
use doctor_directory::infrastructure::persistence::MemoryDoctorRepository;
use doctor_directory::state::AppState;
use doctor_directory::web;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Doctors spread over three locations, plus one without a location.
pub fn sample_doctors() -> Vec<DoctorRecord> {
    vec![
        DoctorRecord::new("dr-rahim-uddin", "Dr. Rahim Uddin")
            .with_location("Dhaka")
            .with_specialty("Cardiology", "cardiology")
            .with_hospital("Square Hospital", "square-hospital")
            .with_ranking(Some(4.8), Some(20)),
        DoctorRecord::new("dr-karim-hasan", "Dr. Karim Hasan")
            .with_location("Dhaka")
            .with_specialty("Cardiology", "cardiology")
            .with_hospital("United Hospital", "united-hospital")
            .with_ranking(Some(4.5), Some(25)),
        DoctorRecord::new("dr-nusrat-jahan", "Dr. Nusrat Jahan")
            .with_location("Dhaka")
            .with_specialty("ENT", "ent")
            .with_hospital("Square Hospital", "square-hospital")
            .with_ranking(Some(4.9), Some(10)),
        DoctorRecord::new("dr-farhana-akter", "Dr. Farhana Akter")
            .with_location("Chittagong")
            .with_specialty("Cardiology", "cardiology")
            .with_hospital("Chevron Clinic", "chevron-clinic")
            .with_ranking(Some(4.2), Some(12)),
        DoctorRecord::new("dr-ayesha-siddiqua", "Dr. Ayesha Siddiqua")
            .with_location("Cox's Bazar")
            .with_specialty("Dermatology", "dermatology")
            .with_hospital("Sea View Hospital", "sea-view-hospital"),
        DoctorRecord::new("dr-anwar-hossain", "Dr. Anwar Hossain")
            .with_specialty("Neurology", "neurology"),
    ]
}

pub fn create_test_state(records: Vec<DoctorRecord>) -> AppState {
    create_test_state_with_cache(records, Arc::new(NullCache::new()))
}

pub fn create_test_state_with_cache(
    records: Vec<DoctorRecord>,
    cache: Arc<dyn CacheService>,
) -> AppState {
    let repository = Arc::new(MemoryDoctorRepository::new(records));
    AppState::new(repository, cache, SiteSettings::default())
}

/// Repository whose store is never reachable.
pub struct UnavailableRepository;

fn store_down<T>() -> Result<T, AppError> {
    Err(AppError::unavailable("Service temporarily unavailable"))
}

#[async_trait]
impl DoctorRepository for UnavailableRepository {
    async fn find(
        &self,
        _query: &ListingQuery,
        _page: PageRequest,
    ) -> Result<Vec<DoctorRecord>, AppError> {
        store_down()
    }

    async fn find_all(&self, _query: &ListingQuery) -> Result<Vec<DoctorRecord>, AppError> {
        store_down()
    }

    async fn count(&self, _query: &ListingQuery) -> Result<u64, AppError> {
        store_down()
    }

    async fn find_by_slug(&self, _slug: &str) -> Result<Option<DoctorRecord>, AppError> {
        store_down()
    }

    async fn distinct_values(
        &self,
        _field: DoctorField,
        _location: Option<String>,
    ) -> Result<Vec<String>, AppError> {
        store_down()
    }

    async fn aggregate_pairs(&self, _key: GroupKey) -> Result<Vec<AggregatePair>, AppError> {
        store_down()
    }

    async fn find_specialty_name(&self, _specialty_slug: &str) -> Result<Option<String>, AppError> {
        store_down()
    }

    async fn sitemap_entries(&self) -> Result<Vec<DoctorSitemapEntry>, AppError> {
        store_down()
    }

    async fn ping(&self) -> Result<(), AppError> {
        store_down()
    }
}

pub fn create_unavailable_state(cache: Arc<dyn CacheService>) -> AppState {
    AppState::new(Arc::new(UnavailableRepository), cache, SiteSettings::default())
}

/// Public routes as mounted in production, without rate limiting.
pub fn create_test_app(state: AppState) -> Router {
    let ttl = state.cache_ttl_seconds;

    Router::new()
        .route("/health", axum::routing::get(health_handler))
        .nest("/api", api::routes::routes())
        .merge(web::routes::public_routes())
        .layer(cache_control::layer(ttl))
        .with_state(state)
}

/// In-process cache that records every write.
#[derive(Default)]
pub struct RecordingCache {
    pub entries: Mutex<HashMap<String, String>>,
}

impl RecordingCache {
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn insert(&self, key: &str, body: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), body.to_string());
    }
}

#[async_trait]
impl CacheService for RecordingCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, body: &str, _ttl_seconds: Option<u64>) -> CacheResult<()> {
        self.insert(key, body);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

/// Cache whose backend never answers.
pub struct UnreachableCache;

#[async_trait]
impl CacheService for UnreachableCache {
    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Err(doctor_directory::infrastructure::cache::CacheError::ConnectionError(
            "connection refused".to_string(),
        ))
    }

    async fn set(&self, _key: &str, _body: &str, _ttl_seconds: Option<u64>) -> CacheResult<()> {
        Err(doctor_directory::infrastructure::cache::CacheError::ConnectionError(
            "connection refused".to_string(),
        ))
    }

    async fn health_check(&self) -> bool {
        false
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}

/// Inserts a record in insertion order, so `id` follows the slice order.
pub async fn insert_doctors(pool: &sqlx::PgPool, records: &[DoctorRecord]) {
    for record in records {
        sqlx::query(
            r#"
            INSERT INTO doctors
                (slug, name, specialty, specialty_slug, hospital, hospital_slug,
                 location, rating, experience_years, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(&record.slug)
        .bind(&record.name)
        .bind(&record.specialty)
        .bind(&record.specialty_slug)
        .bind(&record.hospital)
        .bind(&record.hospital_slug)
        .bind(&record.location)
        .bind(record.rating)
        .bind(record.experience_years)
        .bind(record.updated_at)
        .execute(pool)
        .await
        .unwrap();
    }
}
