//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories implement the driven ports in `domain::ports` on top of
//! `diesel-async` connections checked out from a `bb8` pool.
//!
//! - **Thin adapters**: repositories translate between Diesel rows and
//!   domain types. Matching rules live in the domain services.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Storage-enforced invariants**: interest and match uniqueness come from
//!   primary keys and unique constraints declared in `backend/migrations`.
//!
//! # Example
//!
//! ```ignore
//! use matchwork::outbound::persistence::{DbPool, DieselMatchRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/matchwork")).await?;
//! let matches = DieselMatchRepository::new(pool);
//! ```

mod diesel_completion_repository;
mod diesel_interest_repository;
mod diesel_job_directory;
mod diesel_match_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_completion_repository::DieselCompletionRepository;
pub use diesel_interest_repository::DieselInterestRepository;
pub use diesel_job_directory::DieselJobDirectory;
pub use diesel_match_repository::DieselMatchRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
