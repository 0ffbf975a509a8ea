//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresProfileRepository` - profile storage backed by the `profiles` table

mod profile_repository;

pub use profile_repository::PostgresProfileRepository;
