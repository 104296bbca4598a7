//! Employee-day grouping.
//!
//! Punches arrive as UTC instants. This module assigns each one to the civil
//! date it falls on at a fixed offset and groups them per employee and date.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::PunchEvent;

/// An employee on a civil date; the unit of validation and ledger building.
///
/// Orders by employee id, then date.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EmployeeDay {
    /// The employee.
    pub employee_id: String,
    /// The civil date.
    pub date: NaiveDate,
}

/// Returns the civil date of an instant at a fixed UTC offset.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::localize;
/// use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};
///
/// // 01:30 UTC is still the previous evening at UTC-3
/// let instant = Utc.with_ymd_and_hms(2026, 1, 14, 1, 30, 0).unwrap();
/// let offset = FixedOffset::west_opt(3 * 3600).unwrap();
/// assert_eq!(localize(instant, offset), NaiveDate::from_ymd_opt(2026, 1, 13).unwrap());
/// ```
pub fn localize(timestamp: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    timestamp.with_timezone(&offset).date_naive()
}

/// Groups punches by employee and civil date.
///
/// Each group is sorted by timestamp. The sort is stable, so punches sharing
/// a timestamp stay adjacent in input order and the validator sees them as
/// duplicates.
pub fn group_by_employee_day(
    punches: &[PunchEvent],
    offset: FixedOffset,
) -> BTreeMap<EmployeeDay, Vec<PunchEvent>> {
    let mut groups: BTreeMap<EmployeeDay, Vec<PunchEvent>> = BTreeMap::new();

    for punch in punches {
        let key = EmployeeDay {
            employee_id: punch.employee_id.clone(),
            date: localize(punch.timestamp, offset),
        };
        groups.entry(key).or_default().push(punch.clone());
    }

    for group in groups.values_mut() {
        group.sort_by_key(|p| p.timestamp);
    }

    groups
}
