//! # fame-db
//!
//! Database layer implementing the `fame-core` repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! - Connection pool management and startup migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations
//!
//! Storage constraints back the domain invariants: one pending application per user
//! (partial unique index), processing fields present iff terminal (CHECK), and atomic
//! member ids (identity column).
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fame_db::{create_pool, run_migrations, DatabaseConfig, PgUserRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::new("postgres://localhost/fame_list")).await?;
//!     run_migrations(&pool).await?;
//!     let user_repo = PgUserRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{PgApplicationRepository, PgMemberRepository, PgUserRepository};
