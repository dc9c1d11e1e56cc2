//! Schema migrations
//!
//! SQL files live in `crates/fame-db/migrations` and are applied in filename order.
//! They are loaded at runtime, so the build does not need a database.

use std::path::Path;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::PgPool;
use tracing::info;

const MIGRATIONS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/migrations");

/// Apply all pending migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    let migrator = Migrator::new(Path::new(MIGRATIONS_DIR)).await?;
    info!(count = migrator.iter().count(), "Applying database migrations");
    migrator.run(pool).await
}
