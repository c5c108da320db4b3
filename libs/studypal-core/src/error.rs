//! Error types for studypal-core.

use thiserror::Error;

/// Result type alias using CoreError.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised by deck operations, scheduling and queries.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("invalid grade {grade}: expected a value between 0 and 5")]
    InvalidGrade { grade: i64 },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("card not found: {0}")]
    NotFound(i64),

    #[error("duplicate card ID {0}")]
    DuplicateId(i64),
}
