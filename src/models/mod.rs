//! Core data models for the Attendance Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod balance;
mod ledger;
mod punch;
mod report;
mod schedule;

pub use balance::{BalanceEntry, DateRange, EntryStatus, PeriodBalance};
pub use ledger::{DayLedger, PunchRejection, RejectionReason, ValidationStatus, WorkedInterval};
pub use punch::{GeoPoint, PunchEvent, PunchEvidence, PunchKind};
pub use report::{AuditStep, AuditTrace, AuditWarning, BalanceReport, RejectedDay};
pub use schedule::{ScheduleConfig, SpecialDay, SpecialDayKind, SpecialDays};
