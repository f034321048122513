//! Schema migrations
//!
//! Migration files live in this crate's `migrations/` directory and are read
//! at runtime, so they can be shipped next to the binary and pointed at with
//! `MIGRATIONS_DIR`.

use std::path::{Path, PathBuf};

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::PgPool;
use tracing::info;

/// Directory holding the migration files
///
/// `MIGRATIONS_DIR` wins when set; otherwise the directory in this crate's source tree.
pub fn migrations_dir() -> PathBuf {
    std::env::var_os("MIGRATIONS_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("migrations"))
}

/// Apply all pending migrations from [`migrations_dir`]
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    run_migrations_from(pool, &migrations_dir()).await
}

/// Apply all pending migrations from `dir`
pub async fn run_migrations_from(pool: &PgPool, dir: &Path) -> Result<(), MigrateError> {
    let migrator = Migrator::new(dir).await?;
    info!(dir = %dir.display(), count = migrator.iter().count(), "Running database migrations");
    migrator.run(pool).await
}
