//! Review Store Infrastructure
//!
//! This crate provides the PostgreSQL persistence layer for field-level
//! reviews, implementing the `review_core::ReviewStore` port using SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern: `ReviewRepository` owns the
//! SQL, `PostgresReviewStore` adapts it to the domain port and hides row
//! types from callers.
//!
//! # Schema
//!
//! One table, `form_reviews`, holds every review. Owners are addressed by
//! a `(reviewable_type, reviewable_id)` pair so any host entity type can
//! attach reviews without schema changes. Rows are tombstoned via
//! `deleted_at`, never hard-deleted.
//!
//! # Example
//!
//! ```rust,ignore
//! use review_store::{create_pool_from_url, run_migrations, PostgresReviewStore};
//!
//! let pool = create_pool_from_url("postgres://localhost/app").await?;
//! run_migrations(&pool).await?;
//! let store = PostgresReviewStore::new(pool);
//! ```

pub mod adapter;
pub mod error;
pub mod pool;
pub mod repository;

pub use adapter::PostgresReviewStore;
pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, DatabaseConfig, DatabasePool};
pub use repository::{ReviewRepository, ReviewRow};

use tracing::info;

/// Embedded schema migrations
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Applies any pending schema migrations
///
/// # Arguments
///
/// * `pool` - The PostgreSQL connection pool
///
/// # Errors
///
/// Returns `DatabaseError::MigrationFailed` if a migration cannot be applied
pub async fn run_migrations(pool: &DatabasePool) -> Result<(), DatabaseError> {
    info!("Applying form_reviews migrations");
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))
}
