//! Day ledger model and rejection types.
//!
//! A [`DayLedger`] is the derived record of actual worked time for one
//! employee on one civil date. It is rebuilt from punches on every run and
//! never mutated in place.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::SpecialDayKind;

/// Why an employee-day could not be turned into a ledger or a balance.
///
/// # Example
///
/// ```
/// use attendance_engine::models::RejectionReason;
///
/// let json = serde_json::to_string(&RejectionReason::PunchesAfterClockout).unwrap();
/// assert_eq!(json, "\"PUNCHES_AFTER_CLOCKOUT\"");
/// assert_eq!(RejectionReason::OutOfSequence.to_string(), "OUT_OF_SEQUENCE");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectionReason {
    /// A punch arrived in a state that does not accept it, or timestamps went
    /// backwards.
    OutOfSequence,
    /// `IN` while already clocked in.
    DuplicateIn,
    /// Any punch after `OUT` on a single-session day.
    PunchesAfterClockout,
    /// Two punches share a timestamp to the microsecond.
    DuplicateTimestamp,
    /// No schedule was available for a date that needs one.
    MissingSchedule,
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectionReason::OutOfSequence => write!(f, "OUT_OF_SEQUENCE"),
            RejectionReason::DuplicateIn => write!(f, "DUPLICATE_IN"),
            RejectionReason::PunchesAfterClockout => write!(f, "PUNCHES_AFTER_CLOCKOUT"),
            RejectionReason::DuplicateTimestamp => write!(f, "DUPLICATE_TIMESTAMP"),
            RejectionReason::MissingSchedule => write!(f, "MISSING_SCHEDULE"),
        }
    }
}

/// A punch sequence rejection, naming the punch that triggered it.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("punch '{punch_id}' at {timestamp} rejected: {reason}")]
pub struct PunchRejection {
    /// The rejection reason code.
    pub reason: RejectionReason,
    /// The id of the offending punch.
    pub punch_id: String,
    /// The timestamp of the offending punch.
    pub timestamp: DateTime<Utc>,
}

/// A closed interval of worked time.
///
/// # Example
///
/// ```
/// use attendance_engine::models::WorkedInterval;
/// use chrono::{TimeZone, Utc};
///
/// let interval = WorkedInterval::new(
///     Utc.with_ymd_and_hms(2026, 1, 13, 8, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2026, 1, 13, 12, 0, 0).unwrap(),
/// );
/// assert_eq!(interval.minutes(), 240);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkedInterval {
    /// When work started.
    pub start: DateTime<Utc>,
    /// When work stopped.
    pub end: DateTime<Utc>,
}

impl WorkedInterval {
    /// Creates an interval.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Length of the interval, never negative.
    pub fn duration(&self) -> chrono::Duration {
        (self.end - self.start).max(chrono::Duration::zero())
    }

    /// Length of the interval in whole minutes.
    pub fn minutes(&self) -> i64 {
        self.duration().num_minutes()
    }
}

/// Outcome of validating and building one employee-day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ValidationStatus {
    /// Every interval opened during the day was closed.
    Complete,
    /// The day ends clocked in or on lunch; only closed intervals count.
    Incomplete,
    /// The punch sequence was rejected; the day counts zero worked minutes.
    Rejected(PunchRejection),
}

/// The validated, derived record of worked time for one employee on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayLedger {
    /// The employee the ledger belongs to.
    pub employee_id: String,
    /// The civil date of the ledger.
    pub date: NaiveDate,
    /// Worked intervals in chronological order.
    pub worked_intervals: Vec<WorkedInterval>,
    /// Sum of the closed intervals in whole minutes, never negative.
    pub total_worked_minutes: i64,
    /// Number of physical punches recorded for the day.
    pub punch_count: usize,
    /// Holiday/day-off annotations recorded against this employee-day.
    #[serde(default)]
    pub annotations: Vec<SpecialDayKind>,
    /// Whether the day was complete, incomplete or rejected.
    pub validation_status: ValidationStatus,
}

impl DayLedger {
    /// Creates the ledger of a rejected employee-day: no intervals, zero minutes.
    ///
    /// Holiday/day-off annotations are kept so the day still resolves as an
    /// override.
    pub fn rejected(
        employee_id: impl Into<String>,
        date: NaiveDate,
        punch_count: usize,
        annotations: Vec<SpecialDayKind>,
        rejection: PunchRejection,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            date,
            worked_intervals: Vec::new(),
            total_worked_minutes: 0,
            punch_count,
            annotations,
            validation_status: ValidationStatus::Rejected(rejection),
        }
    }

    /// Returns the rejection if the day was rejected.
    pub fn rejection(&self) -> Option<&PunchRejection> {
        match &self.validation_status {
            ValidationStatus::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }

    /// Returns true if the day was rejected.
    pub fn is_rejected(&self) -> bool {
        self.rejection().is_some()
    }

    /// Returns the first holiday/day-off annotation, if any.
    pub fn annotation(&self) -> Option<SpecialDayKind> {
        self.annotations.first().copied()
    }
}
