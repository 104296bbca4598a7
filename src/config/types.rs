//! Configuration types for the attendance engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{ScheduleConfig, SpecialDays};

/// Default daily clock-variation allowance, in minutes.
pub const DEFAULT_DAILY_TOLERANCE_MINUTES: u32 = 10;

/// Whether an employee may clock in again after clocking out on the same day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPolicy {
    /// One `IN`..`OUT` session per day; anything after `OUT` is rejected.
    #[default]
    SingleSession,
    /// An `IN` after `OUT` opens another session on the same day.
    MultipleSessions,
}

/// Engine settings threaded explicitly into every computation.
///
/// # Example
///
/// ```
/// use attendance_engine::config::{LedgerSettings, SessionPolicy};
///
/// let settings: LedgerSettings = serde_yaml::from_str("utc_offset_minutes: -180").unwrap();
/// assert_eq!(settings.daily_tolerance_minutes, 10);
/// assert_eq!(settings.session_policy, SessionPolicy::SingleSession);
/// assert_eq!(settings.utc_offset().unwrap().local_minus_utc(), -3 * 3600);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerSettings {
    /// Offset of the employees' civil time from UTC, in minutes. Used to
    /// assign punch instants to calendar dates.
    pub utc_offset_minutes: i32,
    /// On a day with a positive expectation, a recorded total within this many
    /// minutes of the expectation is credited as exactly the expectation.
    pub daily_tolerance_minutes: u32,
    /// Whether multiple sessions per day are allowed.
    pub session_policy: SessionPolicy,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
            daily_tolerance_minutes: DEFAULT_DAILY_TOLERANCE_MINUTES,
            session_policy: SessionPolicy::SingleSession,
        }
    }
}

impl LedgerSettings {
    /// Returns the configured offset.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidSettings`] if the offset is not strictly
    /// within ±24 hours.
    pub fn utc_offset(&self) -> EngineResult<FixedOffset> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| EngineError::InvalidSettings {
                field: "utc_offset_minutes".to_string(),
                message: format!(
                    "{} minutes is outside the ±24h range",
                    self.utc_offset_minutes
                ),
            })
    }

    /// Checks that the settings are usable.
    pub fn validate(&self) -> EngineResult<()> {
        self.utc_offset().map(|_| ())
    }
}

/// The complete attendance configuration loaded from YAML files.
#[derive(Debug, Clone, Default)]
pub struct AttendanceConfig {
    /// The expected schedule, if one is configured.
    schedule: Option<ScheduleConfig>,
    /// Holidays and days off.
    special_days: SpecialDays,
    /// Engine settings.
    settings: LedgerSettings,
}

impl AttendanceConfig {
    /// Creates a new AttendanceConfig from its component parts.
    pub fn new(
        schedule: Option<ScheduleConfig>,
        special_days: SpecialDays,
        settings: LedgerSettings,
    ) -> Self {
        Self {
            schedule,
            special_days,
            settings,
        }
    }

    /// Returns the schedule, if configured.
    pub fn schedule(&self) -> Option<&ScheduleConfig> {
        self.schedule.as_ref()
    }

    /// Returns the special-day calendar.
    pub fn special_days(&self) -> &SpecialDays {
        &self.special_days
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &LedgerSettings {
        &self.settings
    }
}
