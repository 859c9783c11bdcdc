//! Owner references for reviewable entities
//!
//! A review belongs to exactly one owning entity of any application type.
//! The owner is addressed by a tagged reference (entity type tag + entity
//! id) rather than a language-level association; resolving the tag back to
//! a concrete entity is the host's concern.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ReviewError;
use crate::ports::ReviewStore;
use crate::reviews::OwnerReviews;

/// Tagged reference to an owning entity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerRef {
    /// Entity type tag (e.g. `"documents"`)
    pub entity_type: String,
    /// Entity id within that type
    pub entity_id: i64,
}

impl OwnerRef {
    /// Creates a new owner reference
    pub fn new(entity_type: impl Into<String>, entity_id: i64) -> Self {
        Self {
            entity_type: entity_type.into(),
            entity_id,
        }
    }

    /// Checks that the reference can identify an owning entity
    ///
    /// Creating a review without a resolvable owner is a caller contract
    /// violation, surfaced as a validation error.
    pub fn validate(&self) -> Result<(), ReviewError> {
        if self.entity_type.trim().is_empty() {
            return Err(ReviewError::validation(
                "owner entity type must not be empty",
            ));
        }
        Ok(())
    }
}

impl fmt::Display for OwnerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.entity_type, self.entity_id)
    }
}

/// Capability trait for entities that can have reviews attached
///
/// Host entities implement the two accessor methods; everything else is
/// provided. The review machinery is composed against the entity through
/// its [`OwnerRef`], never mixed into the entity's own hierarchy.
///
/// ```rust,ignore
/// struct Document { id: i64 }
///
/// impl Reviewable for Document {
///     fn entity_type() -> &'static str { "documents" }
///     fn entity_id(&self) -> i64 { self.id }
/// }
///
/// let pending = doc.reviews(&store).pending().await?;
/// ```
pub trait Reviewable {
    /// Type tag stored alongside every review of this entity type
    fn entity_type() -> &'static str;

    /// Id of this entity instance
    fn entity_id(&self) -> i64;

    /// Owner reference for this entity instance
    fn review_owner(&self) -> OwnerRef {
        OwnerRef::new(Self::entity_type(), self.entity_id())
    }

    /// Returns the review capability handle for this entity
    fn reviews<'a, S>(&self, store: &'a S) -> OwnerReviews<'a, S>
    where
        S: ReviewStore + ?Sized,
    {
        OwnerReviews::new(store, self.review_owner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_ref_display() {
        let owner = OwnerRef::new("documents", 42);
        assert_eq!(owner.to_string(), "documents:42");
    }

    #[test]
    fn test_validate_rejects_blank_type() {
        assert!(OwnerRef::new("", 1).validate().is_err());
        assert!(OwnerRef::new("   ", 1).validate().is_err());
        assert!(OwnerRef::new("documents", 1).validate().is_ok());
    }
}
