//! Application layer services implementing the directory's use cases.
//!
//! Services consume the [`DoctorRepository`] trait and combine the pure domain
//! functions (query building, aggregation, pagination) into the operations the
//! HTTP handlers expose.
//!
//! # Available Services
//!
//! - [`services::listing_service::ListingService`] - Filtered listings, distinct values, grouped counts
//! - [`services::directory_service::DirectoryService`] - Doctor profiles, specialty and hospital pages, sitemap
//!
//! [`seo`] builds page metadata and schema.org documents for doctor profiles.
//!
//! [`DoctorRepository`]: crate::domain::repositories::DoctorRepository

pub mod seo;
pub mod services;
