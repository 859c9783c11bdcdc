//! Status-derived method synthesis
//!
//! One query filter and one boolean check per status variant would have to
//! be written by hand; instead, method names are resolved against the live
//! variant set at call time. Adding a variant automatically yields the
//! corresponding operations with no further code:
//!
//! - `scope_<name>` applies a "status equals variant" filter to a query
//! - `is_<name>` checks a record's current status
//! - a bare variant name yields a query over all records in that status
//!
//! A name matching no variant is an unresolved dynamic method and fails
//! with [`ReviewError::UnknownMethod`]; it is never silently swallowed.

use crate::error::ReviewError;
use crate::query::ReviewQuery;
use crate::status::Status;

/// Prefix of synthesized query-filter methods
pub const SCOPE_PREFIX: &str = "scope_";
/// Prefix of synthesized status-check methods
pub const CHECK_PREFIX: &str = "is_";

/// Resolves a method-name fragment to a status variant, case-insensitively
pub fn resolve_status(name: &str) -> Option<Status> {
    Status::from_name(name)
}

/// Applies a synthesized `scope_<name>` filter to the supplied query
pub fn scope_filter(query: ReviewQuery, method: &str) -> Result<ReviewQuery, ReviewError> {
    let name = method
        .strip_prefix(SCOPE_PREFIX)
        .ok_or_else(|| ReviewError::unknown_method(method))?;
    let status = resolve_status(name).ok_or_else(|| ReviewError::unknown_method(method))?;
    Ok(query.with_status(status))
}

/// Resolves a type-level call: a bare variant name yields a query
/// pre-filtered to that status over all records
pub fn static_query(method: &str) -> Result<ReviewQuery, ReviewError> {
    let status = resolve_status(method).ok_or_else(|| ReviewError::unknown_method(method))?;
    Ok(ReviewQuery::by_status(status))
}

/// All synthesizable `scope_<name>` method names
pub fn available_status_scopes() -> Vec<String> {
    Status::ALL
        .iter()
        .map(|status| format!("{}{}", SCOPE_PREFIX, status.as_str()))
        .collect()
}

/// All synthesizable `is_<name>` method names
pub fn available_status_checkers() -> Vec<String> {
    Status::ALL
        .iter()
        .map(|status| format!("{}{}", CHECK_PREFIX, status.as_str()))
        .collect()
}

/// All synthesizable type-level method names
pub fn available_static_status_methods() -> Vec<String> {
    Status::ALL
        .iter()
        .map(|status| status.as_str().to_string())
        .collect()
}

/// Capability for entities carrying a status field
///
/// The status field name is configurable per adopting entity; the default
/// matches the stored column name.
pub trait StatusDispatch {
    /// Name of the status field examined by synthesized methods
    fn status_field() -> &'static str
    where
        Self: Sized,
    {
        "status"
    }

    /// The record's current status
    fn current_status(&self) -> Status;

    /// Resolves a synthesized `is_<name>` check against the current status
    fn check(&self, method: &str) -> Result<bool, ReviewError> {
        let name = method
            .strip_prefix(CHECK_PREFIX)
            .ok_or_else(|| ReviewError::unknown_method(method))?;
        let status = resolve_status(name).ok_or_else(|| ReviewError::unknown_method(method))?;
        Ok(self.current_status() == status)
    }
}
