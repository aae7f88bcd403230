//! Query engine: filtering, counting, listing and grouping tickets.
//!
//! Every operation takes the dataset by reference and a validated
//! [`FilterSpec`]; nothing here mutates shared state, so any number of
//! queries may run concurrently against one `Arc<Dataset>`.

mod filter;
mod operations;
mod types;

pub use filter::{apply, DateFilter, FilterSpec};
pub use operations::{count, group_by, list};
pub use types::{EmptyReason, GroupKey, GroupValue, QueryOutcome};

use thiserror::Error;

/// Validation failures surfaced to callers as structured errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl QueryError {
    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            QueryError::UnknownOperation(_) => "unknown_operation",
            QueryError::MissingArgument(_) => "missing_argument",
            QueryError::InvalidArgument(_) => "invalid_argument",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QueryError::UnknownOperation("drop_tables".to_string());
        assert_eq!(err.to_string(), "Unknown operation: drop_tables");

        let err = QueryError::MissingArgument("group_by");
        assert_eq!(err.to_string(), "Missing required argument: group_by");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            QueryError::UnknownOperation(String::new()).code(),
            "unknown_operation"
        );
        assert_eq!(QueryError::MissingArgument("x").code(), "missing_argument");
        assert_eq!(
            QueryError::InvalidArgument(String::new()).code(),
            "invalid_argument"
        );
    }
}
