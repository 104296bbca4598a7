//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading attendance
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{ScheduleConfig, SpecialDay, SpecialDays};

use super::types::{AttendanceConfig, LedgerSettings};

/// Loads and provides access to attendance configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory.
/// Every file is optional; the directory itself is not.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── schedule.yaml      # Weekday and Saturday windows
/// ├── special_days.yaml  # Holidays and days off
/// └── settings.yaml      # UTC offset, tolerance, session policy
/// ```
///
/// A missing `schedule.yaml` leaves the schedule unset, so working dates
/// resolve to `MISSING_SCHEDULE`. A missing `special_days.yaml` yields an
/// empty calendar and a missing `settings.yaml` yields default settings.
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Special days: {}", loader.special_days().len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AttendanceConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/default")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The directory does not exist
    /// - Any present file contains invalid YAML
    /// - The schedule has an inverted window
    /// - Two special days share a date
    /// - The settings are out of range
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        if !path.is_dir() {
            return Err(EngineError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let schedule = Self::load_optional_yaml::<ScheduleConfig>(&path.join("schedule.yaml"))?;
        if let Some(schedule) = &schedule {
            schedule.validate()?;
        }

        let special_days =
            Self::load_optional_yaml::<Vec<SpecialDay>>(&path.join("special_days.yaml"))?
                .unwrap_or_default();
        let special_days = SpecialDays::new(special_days)?;

        let settings = Self::load_optional_yaml::<LedgerSettings>(&path.join("settings.yaml"))?
            .unwrap_or_default();
        settings.validate()?;

        debug!(
            path = %path.display(),
            has_schedule = schedule.is_some(),
            special_days = special_days.len(),
            "Loaded attendance configuration"
        );

        Ok(Self {
            config: AttendanceConfig::new(schedule, special_days, settings),
        })
    }

    /// Loads and parses a YAML file, returning `None` if it does not exist.
    fn load_optional_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<Option<T>> {
        if !path.exists() {
            return Ok(None);
        }

        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content)
            .map(Some)
            .map_err(|e| EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })
    }

    /// Returns the underlying attendance configuration.
    pub fn config(&self) -> &AttendanceConfig {
        &self.config
    }

    /// Returns the schedule, if configured.
    pub fn schedule(&self) -> Option<&ScheduleConfig> {
        self.config.schedule()
    }

    /// Returns the special-day calendar.
    pub fn special_days(&self) -> &SpecialDays {
        self.config.special_days()
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &LedgerSettings {
        self.config.settings()
    }

    /// Returns true if `date` is a configured special day.
    pub fn is_special_day(&self, date: NaiveDate) -> bool {
        self.config.special_days().contains(date)
    }
}
