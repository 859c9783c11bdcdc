//! Typed query filters for reviews and owning entities

use crate::owner::OwnerRef;
use crate::status::Status;

/// Query parameters for finding reviews
///
/// Soft-deleted records are excluded unless `include_deleted` is set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewQuery {
    /// Restrict to one owning entity
    pub owner: Option<OwnerRef>,
    /// Filter by status
    pub status: Option<Status>,
    /// Filter by exact field key
    pub field_key: Option<String>,
    /// Filter by reviewer
    pub reviewer_id: Option<i64>,
    /// Filter by form submitter
    pub form_submitter_id: Option<i64>,
    /// Include tombstoned records (administrative access)
    pub include_deleted: bool,
    /// Limit results
    pub limit: Option<u32>,
    /// Offset for pagination
    pub offset: Option<u32>,
}

impl ReviewQuery {
    /// Creates a query over one owning entity's reviews
    pub fn for_owner(owner: OwnerRef) -> Self {
        Self {
            owner: Some(owner),
            ..Default::default()
        }
    }

    /// Creates a query over all records with the given status
    pub fn by_status(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Adds a status filter
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Adds an exact field-key filter
    pub fn with_field_key(mut self, field_key: impl Into<String>) -> Self {
        self.field_key = Some(field_key.into());
        self
    }

    /// Adds a reviewer filter
    pub fn with_reviewer(mut self, reviewer_id: i64) -> Self {
        self.reviewer_id = Some(reviewer_id);
        self
    }

    /// Includes tombstoned records in the result
    pub fn include_deleted(mut self) -> Self {
        self.include_deleted = true;
        self
    }

    /// Adds pagination to the query
    pub fn paginate(mut self, limit: u32, offset: u32) -> Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }
}

/// Criterion restricting a set of owning entities by their reviews
#[derive(Debug, Clone, PartialEq)]
pub enum OwnerCriterion {
    /// Owners having at least one review
    HasReviews,
    /// Owners having at least one review in the given status
    HasStatus(Status),
    /// Owners having at least one review and none outside APPROVED
    AllApproved,
    /// Owners having at least one review by the given reviewer
    ReviewedBy(i64),
    /// Owners having at least one review for the given field
    HasField(String),
}

/// Collection-level filter over owning entities of one type
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerFilter {
    /// Entity type tag the owners belong to
    pub entity_type: String,
    /// Restriction applied to each owner's review set
    pub criterion: OwnerCriterion,
}

impl OwnerFilter {
    pub fn has_reviews(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            criterion: OwnerCriterion::HasReviews,
        }
    }

    pub fn has_status(entity_type: impl Into<String>, status: Status) -> Self {
        Self {
            entity_type: entity_type.into(),
            criterion: OwnerCriterion::HasStatus(status),
        }
    }

    pub fn all_approved(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            criterion: OwnerCriterion::AllApproved,
        }
    }

    pub fn reviewed_by(entity_type: impl Into<String>, reviewer_id: i64) -> Self {
        Self {
            entity_type: entity_type.into(),
            criterion: OwnerCriterion::ReviewedBy(reviewer_id),
        }
    }

    pub fn has_field(entity_type: impl Into<String>, field_key: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            criterion: OwnerCriterion::HasField(field_key.into()),
        }
    }
}
