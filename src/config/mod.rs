//! Configuration loading and management for the Attendance Engine.
//!
//! This module provides functionality to load the expected schedule, the
//! special-day calendar and engine settings from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Schedule configured: {}", config.schedule().is_some());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AttendanceConfig, DEFAULT_DAILY_TOLERANCE_MINUTES, LedgerSettings, SessionPolicy};
