//! Data Transfer Objects for API requests and responses.
//!
//! Request DTOs keep raw query-string values and normalize them; response
//! DTOs use camelCase field names.

pub mod directory;
pub mod health;
pub mod listings;
