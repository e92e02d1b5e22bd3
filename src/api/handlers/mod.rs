//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod doctors;
pub mod health;
pub mod hospitals;
pub mod listings;
pub mod specialists;

pub use doctors::doctor_handler;
pub use health::health_handler;
pub use hospitals::{hospital_handler, hospitals_in_location_handler};
pub use listings::listings_handler;
pub use specialists::specialty_handler;
