//! Repository trait definitions for the domain layer.
//!
//! The service reads from a single collection of doctor records. The trait
//! here is the only way the application layer touches the store; concrete
//! implementations live in `crate::infrastructure::persistence`.
//!
//! Mock implementations are generated via `mockall` for unit tests. See
//! `tests/repository_doctor.rs` for the PostgreSQL implementation in use.

pub mod doctor_repository;

pub use doctor_repository::{DoctorRepository, DoctorSitemapEntry};

#[cfg(test)]
pub use doctor_repository::MockDoctorRepository;
