//! Schedule resolution.
//!
//! This module determines how many minutes an employee is expected to work on
//! a calendar date. The first matching rule wins:
//!
//! 1. A special day (holiday or day off) expects nothing and is an override.
//! 2. Sunday is an implicit rest day.
//! 3. Saturday expects the Saturday window.
//! 4. Any other day expects the weekday window minus lunch.
//!
//! The resolver works on civil dates only. Instants must be localized first,
//! see [`localize`](super::localize).

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{ScheduleConfig, SpecialDayKind, SpecialDays};

/// Represents the type of day for schedule lookup.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::DayType;
///
/// let day_type = DayType::Saturday;
/// assert_eq!(day_type.to_string(), "Saturday");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    /// Monday through Friday - the weekday window applies.
    Weekday,
    /// Saturday - the Saturday window applies.
    Saturday,
    /// Sunday - rest day, nothing expected.
    Sunday,
}

impl std::fmt::Display for DayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayType::Weekday => write!(f, "Weekday"),
            DayType::Saturday => write!(f, "Saturday"),
            DayType::Sunday => write!(f, "Sunday"),
        }
    }
}

/// Determines the day type for a given date.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::{get_day_type, DayType};
/// use chrono::NaiveDate;
///
/// // 2026-01-17 is a Saturday
/// assert_eq!(get_day_type(NaiveDate::from_ymd_opt(2026, 1, 17).unwrap()), DayType::Saturday);
/// // 2026-01-18 is a Sunday
/// assert_eq!(get_day_type(NaiveDate::from_ymd_opt(2026, 1, 18).unwrap()), DayType::Sunday);
/// // 2026-01-12 is a Monday
/// assert_eq!(get_day_type(NaiveDate::from_ymd_opt(2026, 1, 12).unwrap()), DayType::Weekday);
/// ```
pub fn get_day_type(date: NaiveDate) -> DayType {
    match date.weekday() {
        Weekday::Sat => DayType::Saturday,
        Weekday::Sun => DayType::Sunday,
        _ => DayType::Weekday,
    }
}

/// Which rule produced an expected window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "source", content = "kind", rename_all = "snake_case")]
pub enum WindowSource {
    /// A date in the special-day calendar.
    SpecialDay(SpecialDayKind),
    /// A holiday/day-off annotation punched against this employee.
    EmployeeAnnotation(SpecialDayKind),
    /// The regular schedule for the day type.
    Schedule(DayType),
}

impl std::fmt::Display for WindowSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowSource::SpecialDay(kind) => write!(f, "{} (calendar)", kind),
            WindowSource::EmployeeAnnotation(kind) => write!(f, "{} (employee annotation)", kind),
            WindowSource::Schedule(day_type) => write!(f, "{} schedule", day_type),
        }
    }
}

/// The expectation for a single date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedWindow {
    /// Minutes the employee is expected to work.
    pub expected_minutes: i64,
    /// True when a holiday or day off zeroed the expectation.
    pub is_override: bool,
    /// The rule that produced the window.
    pub source: WindowSource,
}

impl ExpectedWindow {
    /// The zero-minute window of a holiday or day off.
    pub fn overridden(source: WindowSource) -> Self {
        Self {
            expected_minutes: 0,
            is_override: true,
            source,
        }
    }
}

/// Resolves the expected window for a date.
///
/// # Arguments
///
/// * `date` - The civil date to resolve
/// * `schedule` - The configured schedule, if any
/// * `special_days` - The holiday/day-off calendar
///
/// # Returns
///
/// The [`ExpectedWindow`] for the date. Special days and Sundays resolve
/// without a schedule.
///
/// # Errors
///
/// Returns [`EngineError::MissingSchedule`] for a Saturday or weekday when no
/// schedule is configured.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::expected_window;
/// use attendance_engine::models::{ScheduleConfig, SpecialDay, SpecialDayKind, SpecialDays};
/// use chrono::NaiveDate;
///
/// let schedule = ScheduleConfig::default();
/// let tuesday = NaiveDate::from_ymd_opt(2026, 1, 13).unwrap();
/// let holidays = SpecialDays::new(vec![SpecialDay {
///     date: tuesday,
///     kind: SpecialDayKind::Holiday,
///     description: None,
/// }])
/// .unwrap();
///
/// let normal = expected_window(tuesday, Some(&schedule), &SpecialDays::empty()).unwrap();
/// assert_eq!(normal.expected_minutes, 480);
///
/// let holiday = expected_window(tuesday, Some(&schedule), &holidays).unwrap();
/// assert_eq!(holiday.expected_minutes, 0);
/// assert!(holiday.is_override);
/// ```
pub fn expected_window(
    date: NaiveDate,
    schedule: Option<&ScheduleConfig>,
    special_days: &SpecialDays,
) -> EngineResult<ExpectedWindow> {
    if let Some(special) = special_days.get(date) {
        return Ok(ExpectedWindow::overridden(WindowSource::SpecialDay(special.kind)));
    }

    let day_type = get_day_type(date);
    let expected_minutes = match day_type {
        DayType::Sunday => 0,
        DayType::Saturday => schedule
            .ok_or(EngineError::MissingSchedule { date })?
            .saturday_minutes(),
        DayType::Weekday => schedule
            .ok_or(EngineError::MissingSchedule { date })?
            .weekday_minutes(),
    };

    Ok(ExpectedWindow {
        expected_minutes: expected_minutes.max(0),
        is_override: false,
        source: WindowSource::Schedule(day_type),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SpecialDay;
    use chrono::NaiveTime;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn hm(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn calendar(entries: &[(&str, SpecialDayKind)]) -> SpecialDays {
        SpecialDays::new(
            entries
                .iter()
                .map(|(date, kind)| SpecialDay {
                    date: make_date(date),
                    kind: *kind,
                    description: None,
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_every_weekday_resolves_to_weekday_window() {
        let schedule = ScheduleConfig::default();
        // 2026-01-12 (Mon) through 2026-01-16 (Fri)
        for day in 12..=16 {
            let date = NaiveDate::from_ymd_opt(2026, 1, day).unwrap();
            let window = expected_window(date, Some(&schedule), &SpecialDays::empty()).unwrap();
            assert_eq!(window.expected_minutes, 480, "{}", date);
            assert_eq!(window.source, WindowSource::Schedule(DayType::Weekday));
            assert!(!window.is_override);
        }
    }

    #[test]
    fn test_saturday_uses_saturday_window() {
        let window = expected_window(
            make_date("2026-01-17"),
            Some(&ScheduleConfig::default()),
            &SpecialDays::empty(),
        )
        .unwrap();
        assert_eq!(window.expected_minutes, 240);
        assert_eq!(window.source, WindowSource::Schedule(DayType::Saturday));
    }

    #[test]
    fn test_sunday_expects_nothing_and_is_not_an_override() {
        let window = expected_window(
            make_date("2026-01-18"),
            Some(&ScheduleConfig::default()),
            &SpecialDays::empty(),
        )
        .unwrap();
        assert_eq!(window.expected_minutes, 0);
        assert!(!window.is_override);
    }

    #[test]
    fn test_special_day_wins_over_weekday() {
        let days = calendar(&[("2026-01-14", SpecialDayKind::DayOff)]);
        let window =
            expected_window(make_date("2026-01-14"), Some(&ScheduleConfig::default()), &days)
                .unwrap();
        assert_eq!(
            window,
            ExpectedWindow {
                expected_minutes: 0,
                is_override: true,
                source: WindowSource::SpecialDay(SpecialDayKind::DayOff),
            }
        );
    }

    #[test]
    fn test_special_day_on_sunday_is_still_an_override() {
        let days = calendar(&[("2026-01-18", SpecialDayKind::Holiday)]);
        let window = expected_window(make_date("2026-01-18"), None, &days).unwrap();
        assert!(window.is_override);
    }

    #[test]
    fn test_missing_schedule_on_weekday() {
        let result = expected_window(make_date("2026-01-13"), None, &SpecialDays::empty());
        assert_eq!(
            result,
            Err(EngineError::MissingSchedule {
                date: make_date("2026-01-13")
            })
        );
    }

    #[test]
    fn test_missing_schedule_on_saturday() {
        let result = expected_window(make_date("2026-01-17"), None, &SpecialDays::empty());
        assert!(matches!(result, Err(EngineError::MissingSchedule { .. })));
    }

    #[test]
    fn test_sunday_and_special_days_resolve_without_schedule() {
        let days = calendar(&[("2026-01-13", SpecialDayKind::Holiday)]);
        assert!(expected_window(make_date("2026-01-18"), None, &days).is_ok());
        assert!(expected_window(make_date("2026-01-13"), None, &days).is_ok());
    }

    #[test]
    fn test_custom_schedule() {
        let schedule = ScheduleConfig {
            weekday_in: hm(9, 0),
            weekday_lunch_start: hm(12, 30),
            weekday_lunch_end: hm(13, 0),
            weekday_out: hm(18, 0),
            saturday_in: hm(9, 0),
            saturday_out: hm(13, 30),
        };
        let weekday =
            expected_window(make_date("2026-01-15"), Some(&schedule), &SpecialDays::empty())
                .unwrap();
        let saturday =
            expected_window(make_date("2026-01-17"), Some(&schedule), &SpecialDays::empty())
                .unwrap();
        assert_eq!(weekday.expected_minutes, 540 - 30);
        assert_eq!(saturday.expected_minutes, 270);
    }

    #[test]
    fn test_window_source_display() {
        assert_eq!(
            WindowSource::SpecialDay(SpecialDayKind::Holiday).to_string(),
            "Holiday (calendar)"
        );
        assert_eq!(
            WindowSource::Schedule(DayType::Weekday).to_string(),
            "Weekday schedule"
        );
    }
}
