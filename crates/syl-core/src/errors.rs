//! Cross-cutting error types for syllabus.
//!
//! Errors raised while constructing the shared value types. Engine-level
//! failures (malformed names, inconsistent directories) live in `syl-engine`,
//! configuration failures in `syl-config`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Text that is not a `SUBJECT NUMBER` course identifier.
    #[error("Invalid course id: {0:?}")]
    InvalidCourseId(String),

    /// Text that is not a `Season Year` semester.
    #[error("Invalid semester: {0:?}")]
    InvalidSemester(String),

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}
