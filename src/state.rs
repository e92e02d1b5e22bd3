//! Shared application state passed to every handler.

use std::sync::Arc;

use crate::application::services::{DirectoryService, ListingService};
use crate::config::SiteSettings;
use crate::domain::pagination::DEFAULT_PAGE_SIZE;
use crate::domain::repositories::DoctorRepository;
use crate::infrastructure::cache::CacheService;

/// Services and settings shared by all requests.
///
/// Cloning is cheap: services and the cache are behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub listing_service: Arc<ListingService<dyn DoctorRepository>>,
    pub directory_service: Arc<DirectoryService<dyn DoctorRepository>>,
    pub cache: Arc<dyn CacheService>,
    /// Page size applied when a listing request gives none.
    pub default_page_size: u32,
    /// Lifetime of cached listing responses, also sent as `s-maxage`.
    pub cache_ttl_seconds: u64,
}

impl AppState {
    /// Builds the services around one repository.
    pub fn new(
        repository: Arc<dyn DoctorRepository>,
        cache: Arc<dyn CacheService>,
        site: SiteSettings,
    ) -> Self {
        Self {
            listing_service: Arc::new(ListingService::new(repository.clone())),
            directory_service: Arc::new(DirectoryService::new(repository, site)),
            cache,
            default_page_size: DEFAULT_PAGE_SIZE,
            cache_ttl_seconds: 60,
        }
    }

    pub fn with_default_page_size(mut self, page_size: u32) -> Self {
        self.default_page_size = page_size;
        self
    }

    pub fn with_cache_ttl(mut self, seconds: u64) -> Self {
        self.cache_ttl_seconds = seconds;
        self
    }
}
