//! Review store port
//!
//! The [`ReviewStore`] trait defines every operation the review domain
//! needs from its data source. Adapters implement it for a concrete store:
//!
//! - **Database adapter**: PostgreSQL via `review_store`
//! - **Mock adapter**: in-memory, for testing without external dependencies
//!
//! Application code receives the port, never a concrete store:
//!
//! ```rust,ignore
//! use review_core::{ReviewStore, Reviewable};
//! use std::sync::Arc;
//!
//! pub struct DocumentService {
//!     reviews: Arc<dyn ReviewStore>,
//! }
//!
//! impl DocumentService {
//!     pub async fn pending(&self, doc: &Document) -> Result<Vec<ReviewRecord>, ReviewError> {
//!         doc.reviews(self.reviews.as_ref()).pending().await
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::error::ReviewError;
use crate::owner::OwnerRef;
use crate::query::{OwnerFilter, ReviewQuery};
use crate::record::{NewReview, ReviewRecord, ReviewUpdate};

/// Port trait for review persistence
///
/// All consistency guarantees are delegated to the underlying store;
/// callers needing atomicity across several operations must bring their
/// own transaction boundary.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Persists a new review bound to the given owner
    ///
    /// When `review.status` is `None` the store applies its configured
    /// default. An unresolvable owner is a contract violation and fails
    /// with a validation error.
    async fn create_review(
        &self,
        owner: &OwnerRef,
        review: NewReview,
    ) -> Result<ReviewRecord, ReviewError>;

    /// Retrieves a review by id, or a NotFound error
    async fn get_review(&self, id: i64) -> Result<ReviewRecord, ReviewError>;

    /// Finds reviews matching the query, most recent first
    async fn find_reviews(&self, query: ReviewQuery) -> Result<Vec<ReviewRecord>, ReviewError>;

    /// Counts reviews matching the query
    async fn count_reviews(&self, query: ReviewQuery) -> Result<u64, ReviewError>;

    /// The most recently created review for the owner, if any
    ///
    /// Ties on `created_at` break toward the highest id.
    async fn latest_review(&self, owner: &OwnerRef) -> Result<Option<ReviewRecord>, ReviewError>;

    /// Applies a partial update to a review
    async fn update_review(
        &self,
        id: i64,
        update: ReviewUpdate,
    ) -> Result<ReviewRecord, ReviewError>;

    /// Tombstones a review; the row is retained
    async fn delete_review(&self, id: i64) -> Result<(), ReviewError>;

    /// Clears a review's tombstone
    async fn restore_review(&self, id: i64) -> Result<(), ReviewError>;

    /// Returns the ids of owning entities satisfying the filter,
    /// in ascending order
    async fn owners_matching(&self, filter: OwnerFilter) -> Result<Vec<i64>, ReviewError>;
}
