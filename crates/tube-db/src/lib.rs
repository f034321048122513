//! # tube-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `tube-core`. It handles:
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations, with every ledger mutation in one transaction
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tube_db::pool::{create_pool, run_migrations, DatabaseConfig};
//! use tube_db::repositories::PgReactionRepository;
//! use tube_core::traits::ReactionRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     run_migrations(&pool).await?;
//!     let reactions = PgReactionRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{
    create_lazy_pool, create_pool, create_pool_from_env, health_check, run_migrations,
    DatabaseConfig, PgPool,
};
pub use repositories::{
    PgCommentRepository, PgReactionRepository, PgSubscriptionRepository, PgUserRepository,
    PgVideoRepository,
};
