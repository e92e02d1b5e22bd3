//! Utility functions shared across layers.
//!
//! - [`slugify`] - URL slug generation for names and specialties

pub mod slugify;
