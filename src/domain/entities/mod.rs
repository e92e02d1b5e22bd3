//! Core domain entities.
//!
//! - [`DoctorRecord`] - A doctor listing, the only stored record type
//! - [`AggregatePair`] - A derived (location, specialty-or-hospital) count
//! - [`SpecialtyCount`] - A ranked specialty for navigation blocks

pub mod aggregate;
pub mod doctor;

pub use aggregate::{AggregatePair, GroupKey, SpecialtyCount};
pub use doctor::{DoctorField, DoctorRecord};
