//! Per-owner review capability
//!
//! [`OwnerReviews`] bundles an owner reference with a store and exposes
//! the full query/create/aggregate surface for that owner's reviews.

use crate::dispatch;
use crate::error::ReviewError;
use crate::owner::OwnerRef;
use crate::ports::ReviewStore;
use crate::query::ReviewQuery;
use crate::record::{FieldReview, NewReview, ReviewRecord};
use crate::stats::ReviewStats;
use crate::status::Status;

/// Review capability handle for one owning entity
pub struct OwnerReviews<'a, S: ReviewStore + ?Sized> {
    store: &'a S,
    owner: OwnerRef,
}

impl<'a, S: ReviewStore + ?Sized> OwnerReviews<'a, S> {
    pub fn new(store: &'a S, owner: OwnerRef) -> Self {
        Self { store, owner }
    }

    pub fn owner(&self) -> &OwnerRef {
        &self.owner
    }

    fn query(&self) -> ReviewQuery {
        ReviewQuery::for_owner(self.owner.clone())
    }

    /// All reviews for this owner
    pub async fn all(&self) -> Result<Vec<ReviewRecord>, ReviewError> {
        self.store.find_reviews(self.query()).await
    }

    /// Reviews in the given status
    pub async fn by_status(&self, status: Status) -> Result<Vec<ReviewRecord>, ReviewError> {
        self.store.find_reviews(self.query().with_status(status)).await
    }

    pub async fn pending(&self) -> Result<Vec<ReviewRecord>, ReviewError> {
        self.by_status(Status::Pending).await
    }

    pub async fn submitted(&self) -> Result<Vec<ReviewRecord>, ReviewError> {
        self.by_status(Status::Submitted).await
    }

    pub async fn approved(&self) -> Result<Vec<ReviewRecord>, ReviewError> {
        self.by_status(Status::Approved).await
    }

    pub async fn rejected(&self) -> Result<Vec<ReviewRecord>, ReviewError> {
        self.by_status(Status::Rejected).await
    }

    /// Whether this owner has any reviews
    pub async fn has_reviews(&self) -> Result<bool, ReviewError> {
        Ok(self.store.count_reviews(self.query()).await? > 0)
    }

    /// Whether this owner has any reviews in the given status
    pub async fn has_with_status(&self, status: Status) -> Result<bool, ReviewError> {
        let count = self
            .store
            .count_reviews(self.query().with_status(status))
            .await?;
        Ok(count > 0)
    }

    pub async fn has_pending(&self) -> Result<bool, ReviewError> {
        self.has_with_status(Status::Pending).await
    }

    pub async fn has_submitted(&self) -> Result<bool, ReviewError> {
        self.has_with_status(Status::Submitted).await
    }

    pub async fn has_approved(&self) -> Result<bool, ReviewError> {
        self.has_with_status(Status::Approved).await
    }

    pub async fn has_rejected(&self) -> Result<bool, ReviewError> {
        self.has_with_status(Status::Rejected).await
    }

    /// Whether this owner has at least one review and every one of them
    /// is approved
    ///
    /// An owner with zero reviews is not all-approved.
    pub async fn all_approved(&self) -> Result<bool, ReviewError> {
        let total = self.store.count_reviews(self.query()).await?;
        if total == 0 {
            return Ok(false);
        }
        let approved = self
            .store
            .count_reviews(self.query().with_status(Status::Approved))
            .await?;
        Ok(total == approved)
    }

    /// The most recently created review, if any
    pub async fn latest(&self) -> Result<Option<ReviewRecord>, ReviewError> {
        self.store.latest_review(&self.owner).await
    }

    /// Reviews for a specific field
    pub async fn for_field(&self, field_key: &str) -> Result<Vec<ReviewRecord>, ReviewError> {
        self.store
            .find_reviews(self.query().with_field_key(field_key))
            .await
    }

    /// Pending reviews for a specific field
    pub async fn pending_for_field(
        &self,
        field_key: &str,
    ) -> Result<Vec<ReviewRecord>, ReviewError> {
        self.store
            .find_reviews(
                self.query()
                    .with_field_key(field_key)
                    .with_status(Status::Pending),
            )
            .await
    }

    /// Persists a new review bound to this owner
    pub async fn create(&self, review: NewReview) -> Result<ReviewRecord, ReviewError> {
        self.store.create_review(&self.owner, review).await
    }

    /// Persists a field-level review bound to this owner
    pub async fn create_field_review(
        &self,
        field: FieldReview,
    ) -> Result<ReviewRecord, ReviewError> {
        self.create(field.into_new_review()).await
    }

    /// Per-status counts plus a total, over this owner's reviews
    pub async fn stats(&self) -> Result<ReviewStats, ReviewError> {
        let records = self.all().await?;
        Ok(ReviewStats::from_records(&records))
    }

    /// Resolves a synthesized `scope_<name>` filter over this owner's
    /// reviews; unknown names fail with [`ReviewError::UnknownMethod`]
    pub async fn scoped(&self, method: &str) -> Result<Vec<ReviewRecord>, ReviewError> {
        let query = dispatch::scope_filter(self.query(), method)?;
        self.store.find_reviews(query).await
    }
}

/// Resolves a synthesized type-level status method over all records
///
/// `find_by_status_method(&store, "pending")` is the table-driven rendering
/// of a static `pending()` call; unknown names fail with
/// [`ReviewError::UnknownMethod`].
pub async fn find_by_status_method<S: ReviewStore + ?Sized>(
    store: &S,
    method: &str,
) -> Result<Vec<ReviewRecord>, ReviewError> {
    let query = dispatch::static_query(method)?;
    store.find_reviews(query).await
}
