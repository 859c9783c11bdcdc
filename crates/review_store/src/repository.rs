//! Review repository implementation
//!
//! This module provides database access for field-level reviews: creation,
//! filtered lookups, partial updates, tombstoning, and the collection-level
//! owner scopes.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, instrument};

use review_core::{
    NewReview, OwnerCriterion, OwnerFilter, OwnerRef, ReviewQuery, ReviewRecord, ReviewUpdate,
    Status, StatusDispatch,
};

use crate::error::DatabaseError;

/// Columns selected for every review row, in [`ReviewRow`] field order
const COLUMNS: &str = "id, reviewable_type, reviewable_id, field_key, field_old_value, \
                       field_new_value, reviewer_id, form_submitter_id, reviewed_at, metadata, \
                       status, reviewer_notes, created_at, updated_at, deleted_at";

/// Repository for managing review data
///
/// The ReviewRepository handles all database operations for the review
/// lifecycle, from creation through decision recording and tombstoning.
/// Reads exclude tombstoned rows unless a query opts in.
#[derive(Debug, Clone)]
pub struct ReviewRepository {
    pool: PgPool,
}

impl ReviewRepository {
    /// Creates a new ReviewRepository with the given connection pool
    ///
    /// # Arguments
    ///
    /// * `pool` - The PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new review bound to the given owner
    ///
    /// # Arguments
    ///
    /// * `owner` - The owning entity reference
    /// * `review` - The review data to insert
    /// * `status` - The resolved initial status
    ///
    /// # Returns
    ///
    /// The created review row with generated id and timestamps
    #[instrument(skip(self, review), fields(owner = %owner))]
    pub async fn insert(
        &self,
        owner: &OwnerRef,
        review: NewReview,
        status: Status,
    ) -> Result<ReviewRow, DatabaseError> {
        let now = Utc::now();
        let sql = format!(
            "INSERT INTO form_reviews (reviewable_type, reviewable_id, field_key, \
             field_old_value, field_new_value, reviewer_id, form_submitter_id, reviewed_at, \
             metadata, status, reviewer_notes, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12) \
             RETURNING {COLUMNS}"
        );

        let row = sqlx::query_as::<_, ReviewRow>(&sql)
            .bind(&owner.entity_type)
            .bind(owner.entity_id)
            .bind(&review.field_key)
            .bind(&review.field_old_value)
            .bind(&review.field_new_value)
            .bind(review.reviewer_id)
            .bind(review.form_submitter_id)
            .bind(review.reviewed_at)
            .bind(&review.metadata)
            .bind(status.as_str())
            .bind(&review.reviewer_notes)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(&e))?;

        debug!(review_id = row.id, "Created review");
        Ok(row)
    }

    /// Retrieves a review by its identifier
    ///
    /// # Arguments
    ///
    /// * `id` - The review identifier
    ///
    /// # Returns
    ///
    /// The review row or NotFound error; tombstoned rows are not visible
    pub async fn fetch(&self, id: i64) -> Result<ReviewRow, DatabaseError> {
        let sql =
            format!("SELECT {COLUMNS} FROM form_reviews WHERE id = $1 AND deleted_at IS NULL");

        sqlx::query_as::<_, ReviewRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(&e))?
            .ok_or_else(|| DatabaseError::not_found("Review", id))
    }

    /// Finds review rows matching the query, most recent first
    ///
    /// # Arguments
    ///
    /// * `query` - The typed review filter
    pub async fn search(&self, query: &ReviewQuery) -> Result<Vec<ReviewRow>, DatabaseError> {
        let mut builder =
            QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM form_reviews"));
        push_filters(&mut builder, query);
        builder.push(" ORDER BY created_at DESC, id DESC");
        if let Some(limit) = query.limit {
            builder.push(" LIMIT ").push_bind(i64::from(limit));
        }
        if let Some(offset) = query.offset {
            builder.push(" OFFSET ").push_bind(i64::from(offset));
        }

        builder
            .build_query_as::<ReviewRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(&e))
    }

    /// Counts review rows matching the query
    ///
    /// # Arguments
    ///
    /// * `query` - The typed review filter (limit/offset are ignored)
    pub async fn count(&self, query: &ReviewQuery) -> Result<i64, DatabaseError> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM form_reviews");
        push_filters(&mut builder, query);

        builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(&e))
    }

    /// Retrieves the most recently created review for an owner
    ///
    /// Ties on `created_at` break toward the highest id so the result is
    /// deterministic.
    ///
    /// # Arguments
    ///
    /// * `owner` - The owning entity reference
    pub async fn latest_for(&self, owner: &OwnerRef) -> Result<Option<ReviewRow>, DatabaseError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM form_reviews \
             WHERE reviewable_type = $1 AND reviewable_id = $2 AND deleted_at IS NULL \
             ORDER BY created_at DESC, id DESC \
             LIMIT 1"
        );

        sqlx::query_as::<_, ReviewRow>(&sql)
            .bind(&owner.entity_type)
            .bind(owner.entity_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(&e))
    }

    /// Applies a partial update to a review
    ///
    /// Only supplied fields change; `updated_at` is always refreshed.
    ///
    /// # Arguments
    ///
    /// * `id` - The review identifier
    /// * `update` - The fields to change
    pub async fn update(&self, id: i64, update: &ReviewUpdate) -> Result<ReviewRow, DatabaseError> {
        let mut builder = QueryBuilder::<Postgres>::new("UPDATE form_reviews SET updated_at = ");
        builder.push_bind(Utc::now());
        if let Some(status) = update.status {
            builder.push(", status = ").push_bind(status.as_str());
        }
        if let Some(reviewer_id) = update.reviewer_id {
            builder.push(", reviewer_id = ").push_bind(reviewer_id);
        }
        if let Some(reviewed_at) = update.reviewed_at {
            builder.push(", reviewed_at = ").push_bind(reviewed_at);
        }
        if let Some(notes) = &update.reviewer_notes {
            builder.push(", reviewer_notes = ").push_bind(notes.clone());
        }
        builder
            .push(" WHERE id = ")
            .push_bind(id)
            .push(" AND deleted_at IS NULL RETURNING ")
            .push(COLUMNS);

        builder
            .build_query_as::<ReviewRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(&e))?
            .ok_or_else(|| DatabaseError::not_found("Review", id))
    }

    /// Tombstones a review; the row is retained
    ///
    /// # Arguments
    ///
    /// * `id` - The review identifier
    #[instrument(skip(self))]
    pub async fn soft_delete(&self, id: i64) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE form_reviews SET deleted_at = $2, updated_at = $2 \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Review", id));
        }
        Ok(())
    }

    /// Clears a review's tombstone
    ///
    /// # Arguments
    ///
    /// * `id` - The review identifier
    #[instrument(skip(self))]
    pub async fn restore(&self, id: i64) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE form_reviews SET deleted_at = NULL, updated_at = $2 \
             WHERE id = $1 AND deleted_at IS NOT NULL",
        )
        .bind(id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Deleted review", id));
        }
        Ok(())
    }

    /// Returns the ids of owning entities whose review sets satisfy the
    /// filter, in ascending order
    ///
    /// # Arguments
    ///
    /// * `filter` - Entity type plus the restriction on each owner's reviews
    #[instrument(skip(self), fields(entity_type = %filter.entity_type))]
    pub async fn owners_matching(&self, filter: &OwnerFilter) -> Result<Vec<i64>, DatabaseError> {
        let mut builder = QueryBuilder::<Postgres>::new(
            "SELECT reviewable_id FROM form_reviews WHERE reviewable_type = ",
        );
        builder.push_bind(filter.entity_type.clone());
        builder.push(" AND deleted_at IS NULL");

        match &filter.criterion {
            OwnerCriterion::HasReviews | OwnerCriterion::AllApproved => {}
            OwnerCriterion::HasStatus(status) => {
                builder.push(" AND status = ").push_bind(status.as_str());
            }
            OwnerCriterion::ReviewedBy(reviewer_id) => {
                builder.push(" AND reviewer_id = ").push_bind(*reviewer_id);
            }
            OwnerCriterion::HasField(field_key) => {
                builder.push(" AND field_key = ").push_bind(field_key.clone());
            }
        }

        builder.push(" GROUP BY reviewable_id");
        if filter.criterion == OwnerCriterion::AllApproved {
            // At least one review and none outside APPROVED
            builder
                .push(" HAVING COUNT(*) FILTER (WHERE status <> ")
                .push_bind(Status::Approved.as_str())
                .push(") = 0");
        }
        builder.push(" ORDER BY reviewable_id");

        builder
            .build_query_scalar::<i64>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(&e))
    }
}

/// Appends the query's WHERE clauses to the builder
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, query: &ReviewQuery) {
    builder.push(" WHERE TRUE");
    if let Some(owner) = &query.owner {
        builder
            .push(" AND reviewable_type = ")
            .push_bind(owner.entity_type.clone());
        builder
            .push(" AND reviewable_id = ")
            .push_bind(owner.entity_id);
    }
    if let Some(status) = query.status {
        builder
            .push(" AND ")
            .push(<ReviewRecord as StatusDispatch>::status_field())
            .push(" = ")
            .push_bind(status.as_str());
    }
    if let Some(field_key) = &query.field_key {
        builder.push(" AND field_key = ").push_bind(field_key.clone());
    }
    if let Some(reviewer_id) = query.reviewer_id {
        builder.push(" AND reviewer_id = ").push_bind(reviewer_id);
    }
    if let Some(form_submitter_id) = query.form_submitter_id {
        builder
            .push(" AND form_submitter_id = ")
            .push_bind(form_submitter_id);
    }
    if !query.include_deleted {
        builder.push(" AND deleted_at IS NULL");
    }
}

/// Database row for a review
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReviewRow {
    pub id: i64,
    pub reviewable_type: String,
    pub reviewable_id: i64,
    pub field_key: Option<String>,
    pub field_old_value: Option<String>,
    pub field_new_value: Option<String>,
    pub reviewer_id: Option<i64>,
    pub form_submitter_id: Option<i64>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub metadata: Option<serde_json::Value>,
    pub status: String,
    pub reviewer_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}
