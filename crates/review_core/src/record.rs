//! Review records and their write models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ReviewsConfig;
use crate::dispatch::StatusDispatch;
use crate::owner::OwnerRef;
use crate::status::Status;

/// One proposed change to one field of one owning entity
///
/// Records are never hard-deleted: removal sets the `deleted_at` tombstone
/// and read operations skip tombstoned rows by default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// Unique identifier
    pub id: i64,
    /// Owning entity
    pub owner: OwnerRef,
    /// Key of the reviewed field
    pub field_key: Option<String>,
    /// Serialized previous value
    pub field_old_value: Option<String>,
    /// Serialized proposed value
    pub field_new_value: Option<String>,
    /// Reviewer principal id (advisory reference)
    pub reviewer_id: Option<i64>,
    /// Submitter principal id (advisory reference)
    pub form_submitter_id: Option<i64>,
    /// When the review decision was made
    pub reviewed_at: Option<DateTime<Utc>>,
    /// Arbitrary structured metadata
    pub metadata: Option<Value>,
    /// Lifecycle status
    pub status: Status,
    /// Free-form reviewer notes
    pub reviewer_notes: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
    /// Soft-delete tombstone
    pub deleted_at: Option<DateTime<Utc>>,
}

impl ReviewRecord {
    /// Display label of the current status
    pub fn status_label(&self) -> String {
        self.status.label()
    }

    /// Whether the record is tombstoned
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Reference to the reviewer, resolved against the configured
    /// principal entity type
    pub fn reviewer_ref(&self, config: &ReviewsConfig) -> Option<OwnerRef> {
        self.reviewer_id
            .map(|id| OwnerRef::new(config.reviewer_model.clone(), id))
    }

    /// Reference to the form submitter, resolved against the configured
    /// principal entity type
    pub fn form_submitter_ref(&self, config: &ReviewsConfig) -> Option<OwnerRef> {
        self.form_submitter_id
            .map(|id| OwnerRef::new(config.form_submitter_model.clone(), id))
    }
}

impl StatusDispatch for ReviewRecord {
    fn current_status(&self) -> Status {
        self.status
    }
}

/// Attribute set for creating a review
///
/// `status: None` lets the store apply the configured default.
#[derive(Debug, Clone, Default)]
pub struct NewReview {
    pub field_key: Option<String>,
    pub field_old_value: Option<String>,
    pub field_new_value: Option<String>,
    pub reviewer_id: Option<i64>,
    pub form_submitter_id: Option<i64>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub metadata: Option<Value>,
    pub status: Option<Status>,
    pub reviewer_notes: Option<String>,
}

/// Partial update applied as a reviewer acts on a record
///
/// Only the supplied fields change; `updated_at` is always refreshed.
#[derive(Debug, Clone, Default)]
pub struct ReviewUpdate {
    pub status: Option<Status>,
    pub reviewer_id: Option<i64>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub reviewer_notes: Option<String>,
}

impl ReviewUpdate {
    /// Records a review decision: new status, reviewer, decision time,
    /// and optional notes in one update
    pub fn decision(status: Status, reviewer_id: i64, notes: Option<String>) -> Self {
        Self {
            status: Some(status),
            reviewer_id: Some(reviewer_id),
            reviewed_at: Some(Utc::now()),
            reviewer_notes: notes,
        }
    }
}

/// Builder for a field-level review
///
/// Structured old/new values are JSON-encoded before storage; plain
/// strings pass through unchanged.
#[derive(Debug, Clone)]
pub struct FieldReview {
    field_key: String,
    old_value: Option<Value>,
    new_value: Option<Value>,
    reviewer_id: Option<i64>,
    form_submitter_id: Option<i64>,
    metadata: Option<Value>,
    status: Option<Status>,
    reviewer_notes: Option<String>,
}

impl FieldReview {
    pub fn new(field_key: impl Into<String>) -> Self {
        Self {
            field_key: field_key.into(),
            old_value: None,
            new_value: None,
            reviewer_id: None,
            form_submitter_id: None,
            metadata: None,
            status: None,
            reviewer_notes: None,
        }
    }

    pub fn old_value(mut self, value: impl Into<Value>) -> Self {
        self.old_value = Some(value.into());
        self
    }

    pub fn new_value(mut self, value: impl Into<Value>) -> Self {
        self.new_value = Some(value.into());
        self
    }

    pub fn reviewer(mut self, reviewer_id: i64) -> Self {
        self.reviewer_id = Some(reviewer_id);
        self
    }

    pub fn submitter(mut self, form_submitter_id: i64) -> Self {
        self.form_submitter_id = Some(form_submitter_id);
        self
    }

    pub fn metadata(mut self, metadata: impl Into<Value>) -> Self {
        self.metadata = Some(metadata.into());
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.reviewer_notes = Some(notes.into());
        self
    }

    /// Builds the attribute set, serializing the old/new values
    pub fn into_new_review(self) -> NewReview {
        NewReview {
            field_key: Some(self.field_key),
            field_old_value: self.old_value.as_ref().and_then(serialize_field_value),
            field_new_value: self.new_value.as_ref().and_then(serialize_field_value),
            reviewer_id: self.reviewer_id,
            form_submitter_id: self.form_submitter_id,
            reviewed_at: None,
            metadata: self.metadata,
            status: self.status,
            reviewer_notes: self.reviewer_notes,
        }
    }
}

/// Serializes a field value for storage
///
/// Strings pass through unchanged, scalars use their canonical text form,
/// structured values are JSON-encoded, and null stores as no value.
pub fn serialize_field_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        structured => Some(structured.to_string()),
    }
}
