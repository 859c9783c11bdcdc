//! Review lifecycle status

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ReviewError;

/// Lifecycle status of a review
///
/// The persisted value set is closed: exactly `pending`, `submitted`,
/// `approved`, and `rejected`. Anything else is rejected at the parsing
/// boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Awaiting review
    Pending,
    /// Submitted for review
    Submitted,
    /// Approved by a reviewer
    Approved,
    /// Rejected by a reviewer
    Rejected,
}

impl Status {
    /// All variants, in declaration order
    pub const ALL: [Status; 4] = [
        Status::Pending,
        Status::Submitted,
        Status::Approved,
        Status::Rejected,
    ];

    /// Returns the persisted string value
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Submitted => "submitted",
            Status::Approved => "approved",
            Status::Rejected => "rejected",
        }
    }

    /// Returns the variant name
    pub fn name(&self) -> &'static str {
        match self {
            Status::Pending => "PENDING",
            Status::Submitted => "SUBMITTED",
            Status::Approved => "APPROVED",
            Status::Rejected => "REJECTED",
        }
    }

    /// Returns the display label, derived from the variant name
    /// (underscores become spaces, words are title-cased)
    pub fn label(&self) -> String {
        self.name()
            .split('_')
            .map(|word| {
                let lower = word.to_ascii_lowercase();
                let mut chars = lower.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// All persisted values, in declaration order
    pub fn values() -> Vec<&'static str> {
        Status::ALL.iter().map(Status::as_str).collect()
    }

    /// All variant names, in declaration order
    pub fn names() -> Vec<&'static str> {
        Status::ALL.iter().map(Status::name).collect()
    }

    /// Looks up a variant by name, case-insensitively
    pub fn from_name(name: &str) -> Option<Status> {
        Status::ALL
            .into_iter()
            .find(|status| status.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ReviewError::invalid_status(s))
    }
}
