//! Domain layer containing the directory's data model and listing rules.
//!
//! Everything here is independent of HTTP and of the record store:
//!
//! - [`entities`] - Doctor records and derived aggregates
//! - [`query`] - Translation of browse filters into a structured query
//! - [`aggregation`] - Grouped counts and rankings for navigation
//! - [`pagination`] - Page/page-size normalization and slicing
//! - [`repositories`] - The record store contract
//!
//! Slugs are produced by [`crate::utils::slugify`].

pub mod aggregation;
pub mod entities;
pub mod pagination;
pub mod query;
pub mod repositories;
