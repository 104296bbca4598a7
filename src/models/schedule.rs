//! Schedule configuration and special-day models.
//!
//! This module contains the [`ScheduleConfig`] describing the expected weekday
//! and Saturday work windows, and the [`SpecialDays`] calendar of holidays and
//! days off that override it.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The expected work windows, as wall-clock times of day.
///
/// Applies to every date unless a special day overrides it. Sundays are an
/// implicit rest day and have no window here.
///
/// Times are written `"HH:MM"` and also accept `"HH:MM:SS"`.
///
/// # Example
///
/// ```
/// use attendance_engine::models::ScheduleConfig;
///
/// let yaml = r#"
/// weekday_in: "08:00"
/// weekday_lunch_start: "12:00"
/// weekday_lunch_end: "13:00"
/// weekday_out: "17:00"
/// saturday_in: "08:00"
/// saturday_out: "12:00"
/// "#;
/// let schedule: ScheduleConfig = serde_yaml::from_str(yaml).unwrap();
/// assert_eq!(schedule.weekday_minutes(), 480);
/// assert_eq!(schedule.saturday_minutes(), 240);
/// assert_eq!(schedule, ScheduleConfig::default());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Weekday clock-in time.
    #[serde(with = "wall_clock")]
    pub weekday_in: NaiveTime,
    /// Weekday lunch start.
    #[serde(with = "wall_clock")]
    pub weekday_lunch_start: NaiveTime,
    /// Weekday lunch end.
    #[serde(with = "wall_clock")]
    pub weekday_lunch_end: NaiveTime,
    /// Weekday clock-out time.
    #[serde(with = "wall_clock")]
    pub weekday_out: NaiveTime,
    /// Saturday clock-in time.
    #[serde(with = "wall_clock")]
    pub saturday_in: NaiveTime,
    /// Saturday clock-out time.
    #[serde(with = "wall_clock")]
    pub saturday_out: NaiveTime,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            weekday_in: hm(8, 0),
            weekday_lunch_start: hm(12, 0),
            weekday_lunch_end: hm(13, 0),
            weekday_out: hm(17, 0),
            saturday_in: hm(8, 0),
            saturday_out: hm(12, 0),
        }
    }
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

/// Whole minutes from `start` to `end`; negative if `end` is earlier.
pub(crate) fn minutes_between(start: NaiveTime, end: NaiveTime) -> i64 {
    (end - start).num_minutes()
}

impl ScheduleConfig {
    /// Expected minutes on a weekday: the full window minus lunch.
    pub fn weekday_minutes(&self) -> i64 {
        minutes_between(self.weekday_in, self.weekday_out)
            - minutes_between(self.weekday_lunch_start, self.weekday_lunch_end)
    }

    /// Expected minutes on a Saturday.
    pub fn saturday_minutes(&self) -> i64 {
        minutes_between(self.saturday_in, self.saturday_out)
    }

    /// Checks that every window is ordered.
    ///
    /// The weekday times must satisfy `in <= lunch_start <= lunch_end <= out`
    /// and the Saturday window `in <= out`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidSchedule`] naming the first field that
    /// breaks the ordering.
    pub fn validate(&self) -> EngineResult<()> {
        let checks = [
            ("weekday_lunch_start", "weekday_in", self.weekday_in, self.weekday_lunch_start),
            (
                "weekday_lunch_end",
                "weekday_lunch_start",
                self.weekday_lunch_start,
                self.weekday_lunch_end,
            ),
            ("weekday_out", "weekday_lunch_end", self.weekday_lunch_end, self.weekday_out),
            ("saturday_out", "saturday_in", self.saturday_in, self.saturday_out),
        ];

        for (field, previous, earlier, later) in checks {
            if later < earlier {
                return Err(EngineError::InvalidSchedule {
                    field: field.to_string(),
                    message: format!(
                        "{} is before {} ({})",
                        later.format("%H:%M"),
                        previous,
                        earlier.format("%H:%M")
                    ),
                });
            }
        }
        Ok(())
    }
}

/// The kind of a special day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpecialDayKind {
    /// A holiday.
    Holiday,
    /// A granted day off.
    DayOff,
}

impl std::fmt::Display for SpecialDayKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpecialDayKind::Holiday => write!(f, "Holiday"),
            SpecialDayKind::DayOff => write!(f, "Day off"),
        }
    }
}

/// A date whose expectation is overridden to zero minutes.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{SpecialDay, SpecialDayKind};
/// use chrono::NaiveDate;
///
/// let day = SpecialDay {
///     date: NaiveDate::from_ymd_opt(2026, 4, 21).unwrap(),
///     kind: SpecialDayKind::Holiday,
///     description: Some("Tiradentes".to_string()),
/// };
/// assert_eq!(day.kind.to_string(), "Holiday");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialDay {
    /// The calendar day being overridden.
    pub date: NaiveDate,
    /// Holiday or day off.
    pub kind: SpecialDayKind,
    /// Optional human-readable label.
    #[serde(default)]
    pub description: Option<String>,
}

/// A calendar of special days with at most one entry per date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecialDays {
    days: BTreeMap<NaiveDate, SpecialDay>,
}

impl SpecialDays {
    /// Builds the calendar, rejecting duplicate dates.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DuplicateSpecialDay`] if two entries share a date.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::{SpecialDay, SpecialDayKind, SpecialDays};
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    /// let entry = SpecialDay { date, kind: SpecialDayKind::Holiday, description: None };
    ///
    /// let calendar = SpecialDays::new(vec![entry.clone()]).unwrap();
    /// assert!(calendar.contains(date));
    ///
    /// assert!(SpecialDays::new(vec![entry.clone(), entry]).is_err());
    /// ```
    pub fn new(days: Vec<SpecialDay>) -> EngineResult<Self> {
        let mut calendar = BTreeMap::new();
        for day in days {
            let date = day.date;
            if calendar.insert(date, day).is_some() {
                return Err(EngineError::DuplicateSpecialDay { date });
            }
        }
        Ok(Self { days: calendar })
    }

    /// An empty calendar.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Looks up the special day for a date.
    pub fn get(&self, date: NaiveDate) -> Option<&SpecialDay> {
        self.days.get(&date)
    }

    /// Returns true if the date is a special day.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.days.contains_key(&date)
    }

    /// Number of special days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Returns true if there are no special days.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Iterates special days in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = &SpecialDay> {
        self.days.values()
    }
}

/// Serde adapter for `"HH:MM"` / `"HH:MM:SS"` wall-clock strings.
mod wall_clock {
    use chrono::{NaiveTime, Timelike};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        let format = if time.second() == 0 { "%H:%M" } else { "%H:%M:%S" };
        serializer.serialize_str(&time.format(format).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(|e| D::Error::custom(format!("invalid time of day '{}': {}", raw, e)))
    }
}
