//! Attendance Ledger and Balance Engine
//!
//! This crate turns raw punch-clock events (clock in, clock out, lunch start/end)
//! into validated per-day ledgers of worked time, resolves the expected schedule
//! for each calendar date, and folds the daily differences into an overtime or
//! shortfall balance over a date range.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
