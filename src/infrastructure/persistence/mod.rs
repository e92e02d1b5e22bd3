//! Doctor repository implementations.
//!
//! Concrete implementations of the domain [`DoctorRepository`] trait.
//!
//! # Repositories
//!
//! - [`PgDoctorRepository`] - PostgreSQL storage through SQLx query builders
//! - [`MemoryDoctorRepository`] - Records held in memory, loaded from a JSON seed file
//!
//! [`DoctorRepository`]: crate::domain::repositories::DoctorRepository

pub mod memory_doctor_repository;
pub mod pg_doctor_repository;

pub use memory_doctor_repository::MemoryDoctorRepository;
pub use pg_doctor_repository::PgDoctorRepository;
