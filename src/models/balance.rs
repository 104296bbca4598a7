//! Balance models: date ranges, per-day balance entries and period balances.
//!
//! This module contains the [`DateRange`], [`BalanceEntry`] and [`PeriodBalance`]
//! types produced by the balance accumulator.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::RejectionReason;

/// An inclusive range of calendar dates, guaranteed `start <= end`.
///
/// # Example
///
/// ```
/// use attendance_engine::models::DateRange;
/// use chrono::NaiveDate;
///
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 18).unwrap(),
/// )
/// .unwrap();
/// assert_eq!(range.num_days(), 7);
/// assert_eq!(range.days().count(), 7);
///
/// // End before start is rejected
/// assert!(DateRange::new(range.end(), range.start()).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = EngineError;

    fn try_from(raw: RawDateRange) -> EngineResult<Self> {
        DateRange::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Creates a range.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTimeRange`] if `end` is before `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> EngineResult<Self> {
        if end < start {
            return Err(EngineError::InvalidTimeRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The first date (inclusive).
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// The last date (inclusive).
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Checks if a date falls within the range, inclusive of both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of dates in the range.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Every date in the range, ascending.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |date| *date <= self.end)
    }
}

/// How a balance entry's worked minutes were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    /// A complete ledger existed for the date.
    Complete,
    /// The ledger ended clocked in or on lunch; only closed intervals count.
    Incomplete,
    /// No punches were recorded for the date.
    NoPunches,
    /// The day was rejected; worked minutes are zero and no delta is charged.
    Rejected,
}

/// The balance of a single date.
///
/// `delta_minutes = worked_minutes - expected_minutes` for every entry that is
/// not rejected. A rejected entry is held at a delta of zero so that no
/// shortfall is ever fabricated from bad data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceEntry {
    /// The date of the entry.
    pub date: NaiveDate,
    /// Minutes the schedule expects on this date.
    pub expected_minutes: i64,
    /// Minutes credited as worked.
    pub worked_minutes: i64,
    /// Minutes recorded by the day ledger, before tolerance.
    pub recorded_minutes: i64,
    /// Worked minus expected; positive is overtime, negative is shortfall.
    pub delta_minutes: i64,
    /// Running total of deltas up to and including this date.
    pub cumulative_minutes: i64,
    /// Whether a holiday/day-off override zeroed the expectation.
    pub is_override: bool,
    /// Whether a small clock variation was absorbed into the expectation.
    pub tolerance_applied: bool,
    /// Where the worked minutes came from.
    pub status: EntryStatus,
    /// The rejection reason, for audit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection: Option<RejectionReason>,
}

impl BalanceEntry {
    /// Returns true if the day was rejected.
    pub fn is_rejected(&self) -> bool {
        self.status == EntryStatus::Rejected
    }
}

/// The balance of one employee over a date range.
///
/// A pure fold over ascending dates: `entries[i].cumulative_minutes` equals
/// `entries[i - 1].cumulative_minutes + entries[i].delta_minutes`, and
/// `total_minutes` equals the last cumulative value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodBalance {
    /// The employee the balance belongs to.
    pub employee_id: String,
    /// The dates covered.
    pub range: DateRange,
    /// One entry per date in the range, ascending.
    pub entries: Vec<BalanceEntry>,
    /// Sum of all deltas.
    pub total_minutes: i64,
}

impl PeriodBalance {
    /// The running totals, one per entry.
    pub fn cumulative(&self) -> Vec<i64> {
        self.entries.iter().map(|e| e.cumulative_minutes).collect()
    }

    /// Accumulated overtime in hours, rounded to one decimal place; zero when
    /// the balance is not positive.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::{DateRange, PeriodBalance};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let date = NaiveDate::from_ymd_opt(2026, 1, 13).unwrap();
    /// let balance = PeriodBalance {
    ///     employee_id: "emp_001".to_string(),
    ///     range: DateRange::new(date, date).unwrap(),
    ///     entries: vec![],
    ///     total_minutes: 90,
    /// };
    /// assert_eq!(balance.overtime_hours(), Decimal::new(15, 1));
    /// assert_eq!(balance.shortfall_hours(), Decimal::ZERO);
    /// ```
    pub fn overtime_hours(&self) -> Decimal {
        minutes_to_hours(self.total_minutes.max(0))
    }

    /// Accumulated shortfall in hours, rounded to one decimal place; zero when
    /// the balance is not negative.
    pub fn shortfall_hours(&self) -> Decimal {
        minutes_to_hours((-self.total_minutes).max(0))
    }

    /// Entries that were rejected.
    pub fn rejected_entries(&self) -> impl Iterator<Item = &BalanceEntry> {
        self.entries.iter().filter(|e| e.is_rejected())
    }
}

fn minutes_to_hours(minutes: i64) -> Decimal {
    (Decimal::new(minutes, 0) / Decimal::new(60, 0))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}
