//! Day ledger construction.
//!
//! This module turns a [`ValidatedSequence`] into a [`DayLedger`]: the worked
//! intervals of the day and their total. `IN` and `LUNCH_END` open an
//! interval, `LUNCH_START` and `OUT` close it, so a day with lunch yields two
//! intervals and its total is `(OUT - IN) - (LUNCH_END - LUNCH_START)`.

use chrono::Duration;

use crate::models::{DayLedger, PunchKind, ValidationStatus, WorkedInterval};

use super::ValidatedSequence;

/// Builds the ledger of a validated employee-day.
///
/// # Arguments
///
/// * `sequence` - A sequence produced by [`validate`](super::validate)
///
/// # Returns
///
/// A [`DayLedger`] with:
/// - `worked_intervals`: closed intervals in chronological order
/// - `total_worked_minutes`: their summed length in whole minutes, never negative
/// - `validation_status`: [`ValidationStatus::Incomplete`] if the day ends
///   clocked in or on lunch, otherwise [`ValidationStatus::Complete`]
///
/// An interval left open contributes nothing; no end time is ever estimated.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::{build, validate};
/// use attendance_engine::config::SessionPolicy;
/// use attendance_engine::models::{PunchEvent, PunchKind, ValidationStatus};
/// use chrono::{NaiveDate, TimeZone, Utc};
///
/// let date = NaiveDate::from_ymd_opt(2026, 1, 13).unwrap();
/// let at = |h, m| Utc.with_ymd_and_hms(2026, 1, 13, h, m, 0).unwrap();
/// let day = vec![
///     PunchEvent::new("p1", "emp_001", at(8, 0), PunchKind::In),
///     PunchEvent::new("p2", "emp_001", at(12, 0), PunchKind::LunchStart),
///     PunchEvent::new("p3", "emp_001", at(13, 0), PunchKind::LunchEnd),
///     PunchEvent::new("p4", "emp_001", at(17, 5), PunchKind::Out),
/// ];
///
/// let sequence = validate("emp_001", date, &day, SessionPolicy::SingleSession).unwrap();
/// let ledger = build(&sequence);
///
/// assert_eq!(ledger.worked_intervals.len(), 2);
/// assert_eq!(ledger.total_worked_minutes, 485);
/// assert_eq!(ledger.validation_status, ValidationStatus::Complete);
/// ```
pub fn build(sequence: &ValidatedSequence) -> DayLedger {
    let mut worked_intervals = Vec::new();
    let mut open = None;

    for punch in sequence.punches() {
        match punch.kind {
            PunchKind::In | PunchKind::LunchEnd => open = Some(punch.timestamp),
            PunchKind::LunchStart | PunchKind::Out => {
                if let Some(start) = open.take() {
                    worked_intervals.push(WorkedInterval::new(start, punch.timestamp));
                }
            }
            PunchKind::Holiday | PunchKind::DayOff => {}
        }
    }

    // Sum durations before truncating so partial minutes across intervals add up.
    let worked: Duration = worked_intervals
        .iter()
        .map(WorkedInterval::duration)
        .fold(Duration::zero(), |total, d| total + d);
    let total_worked_minutes = worked.num_minutes().max(0);

    let validation_status = if sequence.final_state().is_open() {
        ValidationStatus::Incomplete
    } else {
        ValidationStatus::Complete
    };

    DayLedger {
        employee_id: sequence.employee_id().to_string(),
        date: sequence.date(),
        worked_intervals,
        total_worked_minutes,
        punch_count: sequence.punches().len(),
        annotations: sequence.annotations().to_vec(),
        validation_status,
    }
}
