//! Punch sequence validation.
//!
//! This module classifies the punches of one employee-day into a well-formed
//! sequence or a rejection. Validation is a small state machine:
//!
//! ```text
//! ExpectIn --IN--> Working --LUNCH_START--> OnLunch
//!                  Working <--LUNCH_END---- OnLunch
//!                  Working --OUT----------> Done
//! ```
//!
//! Holiday and day-off annotations are set aside before the state machine runs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::SessionPolicy;
use crate::models::{PunchEvent, PunchKind, PunchRejection, RejectionReason, SpecialDayKind};

/// Where an employee-day stands after a sequence of punches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunchState {
    /// Waiting for the first `IN`.
    ExpectIn,
    /// Clocked in.
    Working,
    /// Out for lunch.
    OnLunch,
    /// Clocked out.
    Done,
}

impl PunchState {
    /// Returns true if the state leaves an interval open.
    pub fn is_open(self) -> bool {
        matches!(self, PunchState::Working | PunchState::OnLunch)
    }

    /// Applies one physical punch.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::calculation::PunchState;
    /// use attendance_engine::config::SessionPolicy;
    /// use attendance_engine::models::{PunchKind, RejectionReason};
    ///
    /// let policy = SessionPolicy::SingleSession;
    /// assert_eq!(PunchState::ExpectIn.next(PunchKind::In, policy), Ok(PunchState::Working));
    /// assert_eq!(
    ///     PunchState::Working.next(PunchKind::In, policy),
    ///     Err(RejectionReason::DuplicateIn)
    /// );
    /// ```
    pub fn next(self, kind: PunchKind, policy: SessionPolicy) -> Result<PunchState, RejectionReason> {
        use PunchKind::*;
        use PunchState::*;

        match (self, kind) {
            // Annotations never move the state machine.
            (state, Holiday | DayOff) => Ok(state),

            (ExpectIn, In) => Ok(Working),
            (ExpectIn, _) => Err(RejectionReason::OutOfSequence),

            (Working, LunchStart) => Ok(OnLunch),
            (Working, Out) => Ok(Done),
            (Working, In) => Err(RejectionReason::DuplicateIn),
            (Working, LunchEnd) => Err(RejectionReason::OutOfSequence),

            (OnLunch, LunchEnd) => Ok(Working),
            (OnLunch, _) => Err(RejectionReason::OutOfSequence),

            (Done, In) if policy == SessionPolicy::MultipleSessions => Ok(Working),
            (Done, _) => Err(RejectionReason::PunchesAfterClockout),
        }
    }
}

/// A punch sequence that passed validation.
///
/// Only [`validate`] constructs one, so holding a `ValidatedSequence` means
/// the physical punches are strictly increasing in time and every transition
/// was legal.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSequence {
    employee_id: String,
    date: NaiveDate,
    punches: Vec<PunchEvent>,
    annotations: Vec<SpecialDayKind>,
    final_state: PunchState,
}

impl ValidatedSequence {
    /// The employee.
    pub fn employee_id(&self) -> &str {
        &self.employee_id
    }

    /// The civil date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Physical punches in strictly increasing time order.
    pub fn punches(&self) -> &[PunchEvent] {
        &self.punches
    }

    /// Holiday/day-off annotations found in the day.
    pub fn annotations(&self) -> &[SpecialDayKind] {
        &self.annotations
    }

    /// The state after the last punch.
    pub fn final_state(&self) -> PunchState {
        self.final_state
    }
}

/// Validates the punches of one employee-day.
///
/// # Arguments
///
/// * `employee_id` - The employee the punches belong to
/// * `date` - The civil date of the punches
/// * `punches` - The day's punches, ordered by timestamp
/// * `policy` - Whether an `IN` after `OUT` opens a new session
///
/// # Returns
///
/// The [`ValidatedSequence`] or a [`PunchRejection`] naming the first punch
/// that broke the sequence:
/// - `DUPLICATE_TIMESTAMP` if two physical punches share a microsecond
/// - `OUT_OF_SEQUENCE` if a timestamp goes backwards, or a punch arrives in a
///   state that does not accept it
/// - `DUPLICATE_IN` for `IN` while clocked in
/// - `PUNCHES_AFTER_CLOCKOUT` for anything after `OUT` on a single-session day
///
/// An empty day, or one holding only annotations, is valid.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::{validate, PunchState};
/// use attendance_engine::config::SessionPolicy;
/// use attendance_engine::models::{PunchEvent, PunchKind, RejectionReason};
/// use chrono::{NaiveDate, TimeZone, Utc};
///
/// let date = NaiveDate::from_ymd_opt(2026, 1, 13).unwrap();
/// let at = |h| Utc.with_ymd_and_hms(2026, 1, 13, h, 0, 0).unwrap();
///
/// let day = vec![
///     PunchEvent::new("p1", "emp_001", at(8), PunchKind::In),
///     PunchEvent::new("p2", "emp_001", at(17), PunchKind::Out),
/// ];
/// let validated = validate("emp_001", date, &day, SessionPolicy::SingleSession).unwrap();
/// assert_eq!(validated.final_state(), PunchState::Done);
///
/// let stray_out = vec![PunchEvent::new("p3", "emp_001", at(17), PunchKind::Out)];
/// let rejection = validate("emp_001", date, &stray_out, SessionPolicy::SingleSession).unwrap_err();
/// assert_eq!(rejection.reason, RejectionReason::OutOfSequence);
/// assert_eq!(rejection.punch_id, "p3");
/// ```
pub fn validate(
    employee_id: &str,
    date: NaiveDate,
    punches: &[PunchEvent],
    policy: SessionPolicy,
) -> Result<ValidatedSequence, PunchRejection> {
    let mut state = PunchState::ExpectIn;
    let mut previous_micros: Option<i64> = None;
    let mut physical = Vec::with_capacity(punches.len());
    let mut annotations = Vec::new();

    for punch in punches {
        if let Some(kind) = punch.kind.annotation_kind() {
            annotations.push(kind);
            continue;
        }

        let reject = |reason| PunchRejection {
            reason,
            punch_id: punch.id.clone(),
            timestamp: punch.timestamp,
        };

        let micros = punch.timestamp.timestamp_micros();
        if let Some(previous) = previous_micros {
            if micros == previous {
                return Err(reject(RejectionReason::DuplicateTimestamp));
            }
            if micros < previous {
                return Err(reject(RejectionReason::OutOfSequence));
            }
        }
        previous_micros = Some(micros);

        state = state.next(punch.kind, policy).map_err(reject)?;
        physical.push(punch.clone());
    }

    Ok(ValidatedSequence {
        employee_id: employee_id.to_string(),
        date,
        punches: physical,
        annotations,
        final_state: state,
    })
}
