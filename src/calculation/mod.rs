//! Calculation logic for the Attendance Engine.
//!
//! This module contains the balance pipeline: localizing punches to civil
//! dates and grouping them per employee-day, validating each day's punch
//! sequence, building the day ledger of worked intervals, resolving the
//! expected minutes of each date, and folding the days of a range into a
//! cumulative balance.
//!
//! Every function here is pure. Nothing blocks and no state is shared, so
//! separate employees or employee-days can be computed on separate threads.

mod balance_accumulator;
mod day_grouping;
mod day_ledger;
mod engine;
mod punch_validation;
mod schedule_resolver;

pub use balance_accumulator::{BalanceAccumulation, accumulate};
pub use day_grouping::{EmployeeDay, group_by_employee_day, localize};
pub use day_ledger::build;
pub use engine::{build_day_ledgers, compute_all_balances, compute_period_balance};
pub use punch_validation::{PunchState, ValidatedSequence, validate};
pub use schedule_resolver::{DayType, ExpectedWindow, WindowSource, expected_window, get_day_type};
