//! Database connection pool management

mod migrate;
mod postgres;

pub use migrate::{migrations_dir, run_migrations, run_migrations_from};
pub use postgres::{create_lazy_pool, create_pool, create_pool_from_env, health_check, DatabaseConfig};

// Re-export PgPool for convenience
pub use sqlx::postgres::PgPool;
