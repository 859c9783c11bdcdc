//! PostgreSQL review store adapter
//!
//! This module provides the database adapter for the review domain,
//! implementing the `ReviewStore` port on top of the `ReviewRepository`.
//! It translates between row and domain types and between database and
//! domain errors.
//!
//! # Example
//!
//! ```rust,ignore
//! use review_core::{ReviewStore, Reviewable};
//! use review_store::{create_pool_from_url, PostgresReviewStore};
//! use std::sync::Arc;
//!
//! let pool = create_pool_from_url("postgres://localhost/app").await?;
//! let store: Arc<dyn ReviewStore> = Arc::new(PostgresReviewStore::new(pool));
//!
//! let pending = document.reviews(store.as_ref()).pending().await?;
//! ```

use async_trait::async_trait;
use sqlx::PgPool;

use review_core::{
    NewReview, OwnerFilter, OwnerRef, ReviewError, ReviewQuery, ReviewRecord, ReviewsConfig,
    ReviewStore, ReviewUpdate,
};

use crate::error::DatabaseError;
use crate::repository::{ReviewRepository, ReviewRow};

/// PostgreSQL-backed implementation of the `ReviewStore` port
///
/// Carries the package configuration so that reviews created without a
/// status receive the configured default.
#[derive(Debug, Clone)]
pub struct PostgresReviewStore {
    repository: ReviewRepository,
    config: ReviewsConfig,
}

impl PostgresReviewStore {
    /// Creates a new adapter with the default configuration
    ///
    /// # Arguments
    ///
    /// * `pool` - The PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self::with_config(pool, ReviewsConfig::default())
    }

    /// Creates a new adapter with the given configuration
    ///
    /// # Arguments
    ///
    /// * `pool` - The PostgreSQL connection pool
    /// * `config` - The package configuration
    pub fn with_config(pool: PgPool, config: ReviewsConfig) -> Self {
        Self {
            repository: ReviewRepository::new(pool),
            config,
        }
    }

    /// Returns a reference to the underlying repository
    ///
    /// Useful for operations not exposed through the port, such as direct
    /// row access.
    pub fn repository(&self) -> &ReviewRepository {
        &self.repository
    }

    /// Returns the active configuration
    pub fn config(&self) -> &ReviewsConfig {
        &self.config
    }
}

#[async_trait]
impl ReviewStore for PostgresReviewStore {
    async fn create_review(
        &self,
        owner: &OwnerRef,
        review: NewReview,
    ) -> Result<ReviewRecord, ReviewError> {
        owner.validate()?;
        let status = review.status.unwrap_or(self.config.default_status);
        let row = self
            .repository
            .insert(owner, review, status)
            .await
            .map_err(translate)?;
        row_to_record(row)
    }

    async fn get_review(&self, id: i64) -> Result<ReviewRecord, ReviewError> {
        let row = self.repository.fetch(id).await.map_err(translate)?;
        row_to_record(row)
    }

    async fn find_reviews(&self, query: ReviewQuery) -> Result<Vec<ReviewRecord>, ReviewError> {
        let rows = self.repository.search(&query).await.map_err(translate)?;
        rows.into_iter().map(row_to_record).collect()
    }

    async fn count_reviews(&self, query: ReviewQuery) -> Result<u64, ReviewError> {
        let count = self.repository.count(&query).await.map_err(translate)?;
        Ok(count as u64)
    }

    async fn latest_review(&self, owner: &OwnerRef) -> Result<Option<ReviewRecord>, ReviewError> {
        let row = self.repository.latest_for(owner).await.map_err(translate)?;
        row.map(row_to_record).transpose()
    }

    async fn update_review(
        &self,
        id: i64,
        update: ReviewUpdate,
    ) -> Result<ReviewRecord, ReviewError> {
        let row = self.repository.update(id, &update).await.map_err(translate)?;
        row_to_record(row)
    }

    async fn delete_review(&self, id: i64) -> Result<(), ReviewError> {
        self.repository.soft_delete(id).await.map_err(translate)
    }

    async fn restore_review(&self, id: i64) -> Result<(), ReviewError> {
        self.repository.restore(id).await.map_err(translate)
    }

    async fn owners_matching(&self, filter: OwnerFilter) -> Result<Vec<i64>, ReviewError> {
        self.repository
            .owners_matching(&filter)
            .await
            .map_err(translate)
    }
}

/// Converts a database row to the domain record
///
/// A stored status outside the closed value set fails here, at the
/// deserialization boundary, rather than propagating an invalid record.
fn row_to_record(row: ReviewRow) -> Result<ReviewRecord, ReviewError> {
    Ok(ReviewRecord {
        id: row.id,
        owner: OwnerRef::new(row.reviewable_type, row.reviewable_id),
        field_key: row.field_key,
        field_old_value: row.field_old_value,
        field_new_value: row.field_new_value,
        reviewer_id: row.reviewer_id,
        form_submitter_id: row.form_submitter_id,
        reviewed_at: row.reviewed_at,
        metadata: row.metadata,
        status: row.status.parse()?,
        reviewer_notes: row.reviewer_notes,
        created_at: row.created_at,
        updated_at: row.updated_at,
        deleted_at: row.deleted_at,
    })
}

/// Translates database errors to domain errors
///
/// Database failures pass through unchanged in message form; they are
/// never retried or reinterpreted here.
fn translate(error: DatabaseError) -> ReviewError {
    match error {
        DatabaseError::NotFound(message) => ReviewError::NotFound(message),
        other => ReviewError::Store(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn row_with_status(status: &str) -> ReviewRow {
        let now = Utc::now();
        ReviewRow {
            id: 1,
            reviewable_type: "documents".to_string(),
            reviewable_id: 5,
            field_key: Some("email".to_string()),
            field_old_value: None,
            field_new_value: None,
            reviewer_id: None,
            form_submitter_id: None,
            reviewed_at: None,
            metadata: None,
            status: status.to_string(),
            reviewer_notes: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn test_row_conversion_parses_status() {
        let record = row_to_record(row_with_status("approved")).unwrap();
        assert_eq!(record.status, review_core::Status::Approved);
        assert_eq!(record.owner, OwnerRef::new("documents", 5));
    }

    #[test]
    fn test_row_conversion_fails_fast_on_invalid_status() {
        let err = row_to_record(row_with_status("archived")).unwrap_err();
        assert!(matches!(err, ReviewError::InvalidStatus(_)));
    }

    #[test]
    fn test_not_found_translation_preserves_the_variant() {
        let err = translate(DatabaseError::not_found("Review", 9));
        assert!(err.is_not_found());
    }
}
