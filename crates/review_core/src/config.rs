//! Review configuration

use serde::Deserialize;

use crate::status::Status;

/// Package configuration
///
/// Loaded from the environment with the `FORM_REVIEWS` prefix, e.g.
/// `FORM_REVIEWS_DEFAULT_STATUS=submitted`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReviewsConfig {
    /// Initial status applied to new reviews created without one
    pub default_status: Status,
    /// The valid persisted status values
    pub statuses: Vec<String>,
    /// Principal entity type reviewer ids resolve against
    pub reviewer_model: String,
    /// Principal entity type form-submitter ids resolve against
    pub form_submitter_model: String,
    /// Destination for review notifications; dispatch itself is the
    /// host's concern
    pub notification_email: Option<String>,
}

impl Default for ReviewsConfig {
    fn default() -> Self {
        Self {
            default_status: Status::Pending,
            statuses: Status::values().iter().map(|v| v.to_string()).collect(),
            reviewer_model: "User".to_string(),
            form_submitter_model: "User".to_string(),
            notification_email: None,
        }
    }
}

impl ReviewsConfig {
    /// Loads configuration from environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("FORM_REVIEWS"))
            .build()?
            .try_deserialize()
    }
}
