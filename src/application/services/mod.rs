//! Business logic services for the application layer.

pub mod directory_service;
pub mod listing_service;

pub use directory_service::{
    ChangeFrequency, DirectoryService, DoctorProfile, HospitalListing, SitemapUrl,
    SpecialtyListing,
};
pub use listing_service::ListingService;
