//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories are thin translators between Diesel rows (`models.rs`,
//! `schema.rs`, both private) and domain types. Connections come from a
//! `bb8` pool through `diesel-async`; every Diesel or pool failure is mapped
//! to the owning port's error type.
//!
//! # Example
//!
//! ```ignore
//! use tripadapt::outbound::persistence::{DbPool, DieselTripRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/tripadapt")).await?;
//! let trips = DieselTripRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_record_repositories;
mod diesel_trip_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_record_repositories::{DieselFeedbackRepository, DieselSurveyRepository};
pub use diesel_trip_repository::DieselTripRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
