//! Error types for the Attendance Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate for
//! conditions that reject a whole call. Problems confined to a single
//! employee-day are not errors at this level: they are reported as
//! [`RejectionReason`](crate::models::RejectionReason) values on the affected
//! day and never abort a batch.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Attendance Engine.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
/// use chrono::NaiveDate;
///
/// let error = EngineError::InvalidTimeRange {
///     start: NaiveDate::from_ymd_opt(2026, 1, 20).unwrap(),
///     end: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid time range: end 2026-01-12 is before start 2026-01-20"
/// );
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The requested date range ends before it starts.
    #[error("Invalid time range: end {end} is before start {start}")]
    InvalidTimeRange {
        /// The requested first date.
        start: NaiveDate,
        /// The requested last date.
        end: NaiveDate,
    },

    /// No schedule is configured for a date that needs one.
    #[error("No schedule configured to resolve {date}")]
    MissingSchedule {
        /// The date that could not be resolved.
        date: NaiveDate,
    },

    /// Two special days were declared for the same date.
    #[error("Duplicate special day for {date}")]
    DuplicateSpecialDay {
        /// The date declared more than once.
        date: NaiveDate,
    },

    /// A schedule window is inconsistent (e.g. ends before it starts).
    #[error("Invalid schedule field '{field}': {message}")]
    InvalidSchedule {
        /// The offending schedule field.
        field: String,
        /// A description of the problem.
        message: String,
    },

    /// Engine settings are out of range.
    #[error("Invalid settings field '{field}': {message}")]
    InvalidSettings {
        /// The offending settings field.
        field: String,
        /// A description of the problem.
        message: String,
    },

    /// Configuration directory or file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
