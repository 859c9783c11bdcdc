//! Field-Level Review Domain
//!
//! This crate implements a reviewable-field workflow that any application
//! entity can adopt: individual field changes are logged as review records
//! with a four-state lifecycle, a reviewer, and metadata.
//!
//! # Review Lifecycle
//!
//! ```text
//! Pending -> Submitted -> Approved | Rejected
//! ```
//!
//! # Architecture
//!
//! Persistence sits behind the [`ReviewStore`] port; host entities
//! implement [`Reviewable`] and get the [`OwnerReviews`] capability by
//! composition. Status-named filters and checks are synthesized from the
//! live [`Status`] variant set by the [`dispatch`] module.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod owner;
pub mod ports;
pub mod query;
pub mod record;
pub mod reviews;
pub mod stats;
pub mod status;

pub use config::ReviewsConfig;
pub use dispatch::StatusDispatch;
pub use error::ReviewError;
pub use owner::{OwnerRef, Reviewable};
pub use ports::ReviewStore;
pub use query::{OwnerCriterion, OwnerFilter, ReviewQuery};
pub use record::{FieldReview, NewReview, ReviewRecord, ReviewUpdate};
pub use reviews::{find_by_status_method, OwnerReviews};
pub use stats::ReviewStats;
pub use status::Status;
