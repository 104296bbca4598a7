//! End-to-end balance computation.
//!
//! These entry points take already-fetched, in-memory punches and
//! configuration and run the whole pipeline: grouping, validation, ledger
//! building and accumulation. Per-day problems never abort a run; only a
//! malformed request does.

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::{FixedOffset, NaiveDate, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{LedgerSettings, SessionPolicy};
use crate::error::EngineResult;
use crate::models::{
    AuditStep, AuditTrace, BalanceReport, DateRange, DayLedger, PunchEvent, ScheduleConfig,
    SpecialDays, ValidationStatus,
};

use super::{EmployeeDay, accumulate, build, group_by_employee_day, localize, validate};

/// Builds the ledger of every employee-day present in `punches`.
///
/// Each employee-day is validated and built independently. A rejected day
/// yields a [`ValidationStatus::Rejected`] ledger and leaves the others
/// untouched.
///
/// # Arguments
///
/// * `punches` - Raw punches of any number of employees, in any order
/// * `settings` - Supplies the UTC offset and session policy
///
/// # Returns
///
/// One [`DayLedger`] per employee-day, ordered by employee id then date.
///
/// # Errors
///
/// Returns [`EngineError::InvalidSettings`](crate::error::EngineError::InvalidSettings)
/// if the UTC offset is out of range.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::build_day_ledgers;
/// use attendance_engine::config::LedgerSettings;
/// use attendance_engine::models::{PunchEvent, PunchKind};
/// use chrono::{TimeZone, Utc};
///
/// let at = |d, h| Utc.with_ymd_and_hms(2026, 1, d, h, 0, 0).unwrap();
/// let punches = vec![
///     PunchEvent::new("p1", "emp_001", at(13, 8), PunchKind::In),
///     PunchEvent::new("p2", "emp_001", at(13, 17), PunchKind::Out),
///     PunchEvent::new("p3", "emp_001", at(14, 17), PunchKind::Out),
/// ];
///
/// let ledgers = build_day_ledgers(&punches, &LedgerSettings::default()).unwrap();
/// assert_eq!(ledgers.len(), 2);
/// assert_eq!(ledgers[0].total_worked_minutes, 540);
/// assert!(ledgers[1].is_rejected());
/// ```
pub fn build_day_ledgers(
    punches: &[PunchEvent],
    settings: &LedgerSettings,
) -> EngineResult<Vec<DayLedger>> {
    let offset = settings.utc_offset()?;
    Ok(ledgers_for(punches, offset, settings.session_policy))
}

fn ledgers_for(
    punches: &[PunchEvent],
    offset: FixedOffset,
    policy: SessionPolicy,
) -> Vec<DayLedger> {
    group_by_employee_day(punches, offset)
        .into_iter()
        .map(|(key, day)| ledger_for(key, &day, policy))
        .collect()
}

fn ledger_for(key: EmployeeDay, punches: &[PunchEvent], policy: SessionPolicy) -> DayLedger {
    match validate(&key.employee_id, key.date, punches, policy) {
        Ok(sequence) => {
            let ledger = build(&sequence);
            debug!(
                employee_id = %ledger.employee_id,
                date = %ledger.date,
                intervals = ledger.worked_intervals.len(),
                worked_minutes = ledger.total_worked_minutes,
                "Built day ledger"
            );
            ledger
        }
        Err(rejection) => {
            warn!(
                employee_id = %key.employee_id,
                date = %key.date,
                reason = %rejection.reason,
                punch_id = %rejection.punch_id,
                "Rejected punch sequence"
            );
            let punch_count = punches.iter().filter(|p| !p.is_annotation()).count();
            let annotations = punches
                .iter()
                .filter_map(|p| p.kind.annotation_kind())
                .collect();
            DayLedger::rejected(key.employee_id, key.date, punch_count, annotations, rejection)
        }
    }
}

/// Computes the balance report of one employee over a date range.
///
/// # Arguments
///
/// * `employee_id` - The employee to report on; other employees' punches are ignored
/// * `punches` - Raw punches, in any order
/// * `schedule` - The configured schedule, if any
/// * `special_days` - The holiday/day-off calendar
/// * `start` - First date of the range, inclusive
/// * `end` - Last date of the range, inclusive
/// * `settings` - Engine settings
///
/// # Returns
///
/// A [`BalanceReport`] with one balance entry per date in the range, the
/// rejected days inside it and the audit trace.
///
/// # Errors
///
/// - [`EngineError::InvalidTimeRange`](crate::error::EngineError::InvalidTimeRange)
///   if `end` is before `start`, raised before any punch is looked at
/// - [`EngineError::InvalidSettings`](crate::error::EngineError::InvalidSettings)
///   if the UTC offset is out of range
/// - [`EngineError::InvalidSchedule`](crate::error::EngineError::InvalidSchedule)
///   if a schedule window ends before it starts
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::compute_period_balance;
/// use attendance_engine::config::LedgerSettings;
/// use attendance_engine::models::{PunchEvent, PunchKind, ScheduleConfig, SpecialDays};
/// use chrono::{NaiveDate, TimeZone, Utc};
///
/// let at = |h, m| Utc.with_ymd_and_hms(2026, 1, 13, h, m, 0).unwrap();
/// let punches = vec![
///     PunchEvent::new("p1", "emp_001", at(8, 30), PunchKind::In),
///     PunchEvent::new("p2", "emp_001", at(17, 0), PunchKind::Out),
/// ];
/// let date = NaiveDate::from_ymd_opt(2026, 1, 13).unwrap();
///
/// let report = compute_period_balance(
///     "emp_001",
///     &punches,
///     Some(&ScheduleConfig::default()),
///     &SpecialDays::empty(),
///     date,
///     date,
///     &LedgerSettings::default(),
/// )
/// .unwrap();
///
/// assert_eq!(report.balance.total_minutes, 30);
/// assert!(report.rejected_days.is_empty());
/// ```
pub fn compute_period_balance(
    employee_id: &str,
    punches: &[PunchEvent],
    schedule: Option<&ScheduleConfig>,
    special_days: &SpecialDays,
    start: NaiveDate,
    end: NaiveDate,
    settings: &LedgerSettings,
) -> EngineResult<BalanceReport> {
    let range = DateRange::new(start, end)?;
    let offset = settings.utc_offset()?;
    if let Some(schedule) = schedule {
        schedule.validate()?;
    }

    let own: Vec<PunchEvent> = punches
        .iter()
        .filter(|p| p.employee_id == employee_id)
        .cloned()
        .collect();

    Ok(report_for(
        employee_id,
        &own,
        schedule,
        special_days,
        &range,
        offset,
        settings,
    ))
}

/// Computes a balance report for every employee present in `punches`.
///
/// Employees are processed independently; a rejected day for one employee
/// never affects another.
///
/// # Returns
///
/// One [`BalanceReport`] per distinct employee id, ordered by employee id.
///
/// # Errors
///
/// Same as [`compute_period_balance`].
pub fn compute_all_balances(
    punches: &[PunchEvent],
    schedule: Option<&ScheduleConfig>,
    special_days: &SpecialDays,
    start: NaiveDate,
    end: NaiveDate,
    settings: &LedgerSettings,
) -> EngineResult<Vec<BalanceReport>> {
    let range = DateRange::new(start, end)?;
    let offset = settings.utc_offset()?;
    if let Some(schedule) = schedule {
        schedule.validate()?;
    }

    let mut by_employee: BTreeMap<&str, Vec<PunchEvent>> = BTreeMap::new();
    for punch in punches {
        by_employee
            .entry(punch.employee_id.as_str())
            .or_default()
            .push(punch.clone());
    }

    Ok(by_employee
        .into_iter()
        .map(|(employee_id, own)| {
            report_for(
                employee_id,
                &own,
                schedule,
                special_days,
                &range,
                offset,
                settings,
            )
        })
        .collect())
}

/// Runs the pipeline for one employee's punches.
fn report_for(
    employee_id: &str,
    punches: &[PunchEvent],
    schedule: Option<&ScheduleConfig>,
    special_days: &SpecialDays,
    range: &DateRange,
    offset: FixedOffset,
    settings: &LedgerSettings,
) -> BalanceReport {
    let start_time = Instant::now();

    let in_range: Vec<PunchEvent> = punches
        .iter()
        .filter(|p| range.contains(localize(p.timestamp, offset)))
        .cloned()
        .collect();
    let ledgers = ledgers_for(&in_range, offset, settings.session_policy);

    let mut steps: Vec<AuditStep> = ledgers
        .iter()
        .enumerate()
        .map(|(i, ledger)| ledger_step(u32::try_from(i + 1).unwrap_or(u32::MAX), ledger))
        .collect();
    let next_step = u32::try_from(steps.len() + 1).unwrap_or(u32::MAX);

    let accumulation = accumulate(
        employee_id,
        &ledgers,
        schedule,
        special_days,
        range,
        settings,
        next_step,
    );
    steps.extend(accumulation.audit_steps);

    let duration_us = u64::try_from(start_time.elapsed().as_micros()).unwrap_or(u64::MAX);

    info!(
        employee_id = %employee_id,
        start = %range.start(),
        end = %range.end(),
        total_minutes = accumulation.balance.total_minutes,
        rejected_days = accumulation.rejected_days.len(),
        duration_us,
        "Computed period balance"
    );

    BalanceReport {
        report_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        employee_id: employee_id.to_string(),
        balance: accumulation.balance,
        rejected_days: accumulation.rejected_days,
        audit_trace: AuditTrace {
            steps,
            warnings: accumulation.warnings,
            duration_us,
        },
    }
}

fn ledger_step(step_number: u32, ledger: &DayLedger) -> AuditStep {
    let reasoning = match &ledger.validation_status {
        ValidationStatus::Complete => format!(
            "{} punches form {} closed interval(s), {} min",
            ledger.punch_count,
            ledger.worked_intervals.len(),
            ledger.total_worked_minutes
        ),
        ValidationStatus::Incomplete => format!(
            "{} punches end with an open interval; {} closed min",
            ledger.punch_count, ledger.total_worked_minutes
        ),
        ValidationStatus::Rejected(rejection) => rejection.to_string(),
    };

    AuditStep {
        step_number,
        rule_id: "day_ledger".to_string(),
        rule_name: "Day Ledger".to_string(),
        date: ledger.date,
        input: serde_json::json!({
            "punch_count": ledger.punch_count,
            "annotations": ledger.annotations,
        }),
        output: serde_json::json!({
            "validation_status": ledger.validation_status,
            "total_worked_minutes": ledger.total_worked_minutes,
        }),
        reasoning,
    }
}
