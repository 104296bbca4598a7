//! Balance accumulation.
//!
//! This module folds day ledgers into a [`PeriodBalance`]: one
//! [`BalanceEntry`] per calendar date in the range, in ascending order,
//! including dates with no punches at all.
//!
//! A rejected day counts zero worked minutes and a zero delta, so bad data
//! never produces a shortfall. A holiday or day off only zeroes the
//! expectation; minutes worked on it are credited as overtime.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::config::LedgerSettings;
use crate::models::{
    AuditStep, AuditWarning, BalanceEntry, DateRange, DayLedger, EntryStatus, PeriodBalance,
    RejectedDay, RejectionReason, ScheduleConfig, SpecialDays, ValidationStatus,
};

use super::{ExpectedWindow, WindowSource, expected_window};

/// The result of accumulating one employee's balance.
///
/// Contains the balance itself, the rejected days inside the range and the
/// audit records documenting every decision.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceAccumulation {
    /// The per-day balance and cumulative total.
    pub balance: PeriodBalance,
    /// Rejected employee-days in the range, in date order.
    pub rejected_days: Vec<RejectedDay>,
    /// Two steps per date: schedule resolution, then the day balance.
    pub audit_steps: Vec<AuditStep>,
    /// Days that were counted but need attention.
    pub warnings: Vec<AuditWarning>,
}

/// What the resolver settled on for one date.
enum Resolution {
    Window(ExpectedWindow),
    Missing,
}

/// Accumulates the balance of one employee over a date range.
///
/// # Arguments
///
/// * `employee_id` - The employee to balance; ledgers of other employees are ignored
/// * `day_ledgers` - The employee's ledgers, in any order
/// * `schedule` - The configured schedule, if any
/// * `special_days` - The holiday/day-off calendar
/// * `range` - The dates to balance, inclusive
/// * `settings` - Engine settings; the daily tolerance is read from here
/// * `first_step` - The step number of the first audit step
///
/// # Returns
///
/// A [`BalanceAccumulation`] whose balance has one entry per date in `range`.
/// Missing ledgers count zero worked minutes. When two ledgers share a date
/// the first one wins.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::{accumulate, build, validate};
/// use attendance_engine::config::LedgerSettings;
/// use attendance_engine::models::{DateRange, PunchEvent, PunchKind, ScheduleConfig, SpecialDays};
/// use chrono::{NaiveDate, TimeZone, Utc};
///
/// let monday = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
/// let tuesday = NaiveDate::from_ymd_opt(2026, 1, 13).unwrap();
/// let punches = vec![
///     PunchEvent::new("p1", "emp_001", Utc.with_ymd_and_hms(2026, 1, 12, 8, 30, 0).unwrap(), PunchKind::In),
///     PunchEvent::new("p2", "emp_001", Utc.with_ymd_and_hms(2026, 1, 12, 17, 0, 0).unwrap(), PunchKind::Out),
/// ];
/// let settings = LedgerSettings::default();
/// let sequence = validate("emp_001", monday, &punches, settings.session_policy).unwrap();
/// let ledger = build(&sequence);
///
/// let result = accumulate(
///     "emp_001",
///     &[ledger],
///     Some(&ScheduleConfig::default()),
///     &SpecialDays::empty(),
///     &DateRange::new(monday, tuesday).unwrap(),
///     &settings,
///     1,
/// );
///
/// // Monday +30, Tuesday -480
/// assert_eq!(result.balance.cumulative(), vec![30, -450]);
/// assert_eq!(result.balance.total_minutes, -450);
/// ```
pub fn accumulate(
    employee_id: &str,
    day_ledgers: &[DayLedger],
    schedule: Option<&ScheduleConfig>,
    special_days: &SpecialDays,
    range: &DateRange,
    settings: &LedgerSettings,
    first_step: u32,
) -> BalanceAccumulation {
    let mut by_date: BTreeMap<NaiveDate, &DayLedger> = BTreeMap::new();
    for ledger in day_ledgers
        .iter()
        .filter(|l| l.employee_id == employee_id && range.contains(l.date))
    {
        by_date.entry(ledger.date).or_insert(ledger);
    }

    let tolerance = i64::from(settings.daily_tolerance_minutes);
    let mut entries = Vec::with_capacity(usize::try_from(range.num_days()).unwrap_or_default());
    let mut rejected_days = Vec::new();
    let mut audit_steps = Vec::new();
    let mut warnings = Vec::new();
    let mut step_number = first_step;
    let mut cumulative: i64 = 0;

    for date in range.days() {
        let ledger = by_date.get(&date).copied();
        let resolution = resolve(date, ledger, schedule, special_days);

        let (expected_minutes, is_override) = match &resolution {
            Resolution::Window(window) => (window.expected_minutes, window.is_override),
            Resolution::Missing => (0, false),
        };

        audit_steps.push(resolution_step(step_number, date, &resolution));
        step_number += 1;

        let recorded_minutes = ledger.map_or(0, |l| l.total_worked_minutes);
        let rejection = match (ledger.and_then(DayLedger::rejection), &resolution) {
            (Some(rejection), _) => Some(RejectedDay {
                employee_id: employee_id.to_string(),
                date,
                reason: rejection.reason,
                punch_id: Some(rejection.punch_id.clone()),
                timestamp: Some(rejection.timestamp),
            }),
            (None, Resolution::Missing) => Some(RejectedDay {
                employee_id: employee_id.to_string(),
                date,
                reason: RejectionReason::MissingSchedule,
                punch_id: None,
                timestamp: None,
            }),
            (None, Resolution::Window(_)) => None,
        };

        let entry = match rejection {
            Some(rejected) => {
                warn!(
                    employee_id = %employee_id,
                    %date,
                    reason = %rejected.reason,
                    "Rejected day counted as zero worked minutes"
                );
                warnings.push(AuditWarning {
                    code: rejected.reason.to_string(),
                    message: format!(
                        "{} on {} was rejected ({}); counted as zero worked minutes",
                        employee_id, date, rejected.reason
                    ),
                    severity: "high".to_string(),
                });
                let reason = rejected.reason;
                rejected_days.push(rejected);

                BalanceEntry {
                    date,
                    expected_minutes,
                    worked_minutes: 0,
                    recorded_minutes,
                    delta_minutes: 0,
                    cumulative_minutes: cumulative,
                    is_override,
                    tolerance_applied: false,
                    status: EntryStatus::Rejected,
                    rejection: Some(reason),
                }
            }
            None => {
                let status = match ledger {
                    None => EntryStatus::NoPunches,
                    Some(l) if l.punch_count == 0 => EntryStatus::NoPunches,
                    Some(l) if l.validation_status == ValidationStatus::Incomplete => {
                        EntryStatus::Incomplete
                    }
                    Some(_) => EntryStatus::Complete,
                };

                if status == EntryStatus::Incomplete {
                    warn!(
                        employee_id = %employee_id,
                        %date,
                        recorded_minutes,
                        "Day ended with an open interval"
                    );
                    warnings.push(AuditWarning {
                        code: "INCOMPLETE_DAY".to_string(),
                        message: format!(
                            "{} on {} ended clocked in; only {} closed minutes counted",
                            employee_id, date, recorded_minutes
                        ),
                        severity: "medium".to_string(),
                    });
                }

                let within_tolerance = status == EntryStatus::Complete
                    && expected_minutes > 0
                    && recorded_minutes > 0
                    && (recorded_minutes - expected_minutes).abs() <= tolerance;
                let worked_minutes = if within_tolerance {
                    expected_minutes
                } else {
                    recorded_minutes
                };
                let delta_minutes = worked_minutes - expected_minutes;
                cumulative += delta_minutes;

                BalanceEntry {
                    date,
                    expected_minutes,
                    worked_minutes,
                    recorded_minutes,
                    delta_minutes,
                    cumulative_minutes: cumulative,
                    is_override,
                    tolerance_applied: within_tolerance && recorded_minutes != expected_minutes,
                    status,
                    rejection: None,
                }
            }
        };

        debug!(
            employee_id = %employee_id,
            %date,
            expected = entry.expected_minutes,
            worked = entry.worked_minutes,
            delta = entry.delta_minutes,
            cumulative = entry.cumulative_minutes,
            "Balanced day"
        );

        audit_steps.push(balance_step(step_number, &entry));
        step_number += 1;
        entries.push(entry);
    }

    BalanceAccumulation {
        balance: PeriodBalance {
            employee_id: employee_id.to_string(),
            range: *range,
            entries,
            total_minutes: cumulative,
        },
        rejected_days,
        audit_steps,
        warnings,
    }
}

/// Resolves the expectation for a date, letting an employee annotation
/// override a regular or missing schedule.
fn resolve(
    date: NaiveDate,
    ledger: Option<&DayLedger>,
    schedule: Option<&ScheduleConfig>,
    special_days: &SpecialDays,
) -> Resolution {
    let annotation = ledger.and_then(DayLedger::annotation);

    match (expected_window(date, schedule, special_days), annotation) {
        (Ok(window), _) if window.is_override => Resolution::Window(window),
        (_, Some(kind)) => {
            Resolution::Window(ExpectedWindow::overridden(WindowSource::EmployeeAnnotation(kind)))
        }
        (Ok(window), None) => Resolution::Window(window),
        (Err(err), None) => {
            debug!(%date, error = %err, "No expectation resolved");
            Resolution::Missing
        }
    }
}

fn resolution_step(step_number: u32, date: NaiveDate, resolution: &Resolution) -> AuditStep {
    let (output, reasoning) = match resolution {
        Resolution::Window(window) => (
            serde_json::json!({
                "expected_minutes": window.expected_minutes,
                "is_override": window.is_override,
            }),
            format!(
                "{}: {} minutes expected",
                window.source, window.expected_minutes
            ),
        ),
        Resolution::Missing => (
            serde_json::json!({ "rejection": RejectionReason::MissingSchedule }),
            "No schedule configured for a working day".to_string(),
        ),
    };

    AuditStep {
        step_number,
        rule_id: "schedule_resolution".to_string(),
        rule_name: "Schedule Resolution".to_string(),
        date,
        input: serde_json::json!({ "weekday": date.format("%A").to_string() }),
        output,
        reasoning,
    }
}

fn balance_step(step_number: u32, entry: &BalanceEntry) -> AuditStep {
    let reasoning = match entry.status {
        EntryStatus::Rejected => format!(
            "Day rejected ({}); worked 0, delta 0",
            entry
                .rejection
                .map(|r| r.to_string())
                .unwrap_or_default()
        ),
        _ if entry.tolerance_applied => format!(
            "Recorded {} min is within tolerance of {} min; credited {} min",
            entry.recorded_minutes, entry.expected_minutes, entry.worked_minutes
        ),
        _ => format!(
            "{} worked - {} expected = {:+} min",
            entry.worked_minutes, entry.expected_minutes, entry.delta_minutes
        ),
    };

    AuditStep {
        step_number,
        rule_id: "day_balance".to_string(),
        rule_name: "Day Balance".to_string(),
        date: entry.date,
        input: serde_json::json!({
            "expected_minutes": entry.expected_minutes,
            "recorded_minutes": entry.recorded_minutes,
            "status": entry.status,
        }),
        output: serde_json::json!({
            "worked_minutes": entry.worked_minutes,
            "delta_minutes": entry.delta_minutes,
            "cumulative_minutes": entry.cumulative_minutes,
        }),
        reasoning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{build, validate};
    use crate::config::SessionPolicy;
    use crate::models::{PunchEvent, PunchKind, PunchRejection, SpecialDay, SpecialDayKind};
    use chrono::{DateTime, TimeZone, Utc};

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn at(date: &str, hour: u32, minute: u32) -> DateTime<Utc> {
        let d = make_date(date);
        Utc.from_utc_datetime(&d.and_hms_opt(hour, minute, 0).unwrap())
    }

    fn make_ledger(date: &str, punches: &[(u32, u32, PunchKind)]) -> DayLedger {
        let events: Vec<PunchEvent> = punches
            .iter()
            .enumerate()
            .map(|(i, (h, m, kind))| {
                PunchEvent::new(format!("{}-{}", date, i), "emp_001", at(date, *h, *m), *kind)
            })
            .collect();
        let sequence = validate(
            "emp_001",
            make_date(date),
            &events,
            SessionPolicy::SingleSession,
        )
        .unwrap();
        build(&sequence)
    }

    fn rejected_ledger(date: &str, reason: RejectionReason) -> DayLedger {
        DayLedger::rejected(
            "emp_001",
            make_date(date),
            1,
            Vec::new(),
            PunchRejection {
                reason,
                punch_id: "bad".to_string(),
                timestamp: at(date, 17, 0),
            },
        )
    }

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::new(make_date(start), make_date(end)).unwrap()
    }

    fn run(
        ledgers: &[DayLedger],
        special_days: &SpecialDays,
        range: &DateRange,
    ) -> BalanceAccumulation {
        accumulate(
            "emp_001",
            ledgers,
            Some(&ScheduleConfig::default()),
            special_days,
            range,
            &LedgerSettings::default(),
            1,
        )
    }

    fn holiday(date: &str) -> SpecialDays {
        SpecialDays::new(vec![SpecialDay {
            date: make_date(date),
            kind: SpecialDayKind::Holiday,
            description: None,
        }])
        .unwrap()
    }

    #[test]
    fn test_small_variation_is_absorbed_by_tolerance() {
        // 2026-01-13 is a Tuesday
        let ledger = make_ledger(
            "2026-01-13",
            &[
                (8, 0, PunchKind::In),
                (12, 0, PunchKind::LunchStart),
                (13, 0, PunchKind::LunchEnd),
                (17, 5, PunchKind::Out),
            ],
        );
        let result = run(&[ledger], &SpecialDays::empty(), &range("2026-01-13", "2026-01-13"));
        let entry = &result.balance.entries[0];

        assert_eq!(entry.recorded_minutes, 485);
        assert_eq!(entry.worked_minutes, 480);
        assert_eq!(entry.expected_minutes, 480);
        assert_eq!(entry.delta_minutes, 0);
        assert!(entry.tolerance_applied);
        assert_eq!(entry.status, EntryStatus::Complete);
    }

    #[test]
    fn test_short_day_within_tolerance_is_credited_in_full() {
        let ledger = make_ledger(
            "2026-01-13",
            &[
                (8, 0, PunchKind::In),
                (12, 0, PunchKind::LunchStart),
                (13, 0, PunchKind::LunchEnd),
                (16, 52, PunchKind::Out),
            ],
        );
        let result = run(&[ledger], &SpecialDays::empty(), &range("2026-01-13", "2026-01-13"));
        let entry = &result.balance.entries[0];

        assert_eq!(entry.recorded_minutes, 472);
        assert_eq!(entry.worked_minutes, 480);
        assert_eq!(entry.delta_minutes, 0);
        assert!(entry.tolerance_applied);
        assert_eq!(result.balance.total_minutes, 0);
    }

    #[test]
    fn test_variation_beyond_tolerance_counts_in_full() {
        let ledger = make_ledger("2026-01-13", &[(8, 30, PunchKind::In), (17, 0, PunchKind::Out)]);
        let result = run(&[ledger], &SpecialDays::empty(), &range("2026-01-13", "2026-01-13"));
        let entry = &result.balance.entries[0];

        assert_eq!(entry.worked_minutes, 510);
        assert_eq!(entry.delta_minutes, 30);
        assert!(!entry.tolerance_applied);
    }

    #[test]
    fn test_zero_tolerance_disables_absorption() {
        let ledger = make_ledger(
            "2026-01-13",
            &[
                (8, 0, PunchKind::In),
                (12, 0, PunchKind::LunchStart),
                (13, 0, PunchKind::LunchEnd),
                (17, 5, PunchKind::Out),
            ],
        );
        let settings = LedgerSettings {
            daily_tolerance_minutes: 0,
            ..LedgerSettings::default()
        };
        let result = accumulate(
            "emp_001",
            &[ledger],
            Some(&ScheduleConfig::default()),
            &SpecialDays::empty(),
            &range("2026-01-13", "2026-01-13"),
            &settings,
            1,
        );
        assert_eq!(result.balance.total_minutes, 5);
    }

    #[test]
    fn test_holiday_work_is_pure_overtime() {
        let ledger = make_ledger("2026-01-13", &[(9, 0, PunchKind::In), (13, 0, PunchKind::Out)]);
        let result = run(&[ledger], &holiday("2026-01-13"), &range("2026-01-13", "2026-01-13"));
        let entry = &result.balance.entries[0];

        assert_eq!(entry.expected_minutes, 0);
        assert_eq!(entry.worked_minutes, 240);
        assert_eq!(entry.delta_minutes, 240);
        assert!(entry.is_override);
    }

    #[test]
    fn test_weekday_without_punches_is_full_shortfall() {
        let result = run(&[], &SpecialDays::empty(), &range("2026-01-13", "2026-01-13"));
        let entry = &result.balance.entries[0];

        assert_eq!(entry.expected_minutes, 480);
        assert_eq!(entry.worked_minutes, 0);
        assert_eq!(entry.delta_minutes, -480);
        assert_eq!(entry.status, EntryStatus::NoPunches);
    }

    #[test]
    fn test_rejected_day_counts_zero_and_is_reported() {
        let ledger = rejected_ledger("2026-01-13", RejectionReason::OutOfSequence);
        let result = run(&[ledger], &SpecialDays::empty(), &range("2026-01-13", "2026-01-13"));
        let entry = &result.balance.entries[0];

        assert_eq!(entry.worked_minutes, 0);
        assert_eq!(entry.delta_minutes, 0);
        assert_eq!(entry.status, EntryStatus::Rejected);
        assert_eq!(entry.rejection, Some(RejectionReason::OutOfSequence));
        assert_eq!(result.rejected_days.len(), 1);
        assert_eq!(result.rejected_days[0].punch_id.as_deref(), Some("bad"));
        assert_eq!(result.warnings[0].code, "OUT_OF_SEQUENCE");
    }

    #[test]
    fn test_week_with_rejected_day_keeps_other_deltas_in_order() {
        // Monday 2026-01-12 .. Sunday 2026-01-18, rejected Thursday
        let full_day = [(8, 0, PunchKind::In), (17, 0, PunchKind::Out)];
        let ledgers = vec![
            make_ledger("2026-01-12", &full_day),
            make_ledger("2026-01-13", &full_day),
            make_ledger("2026-01-14", &full_day),
            rejected_ledger("2026-01-15", RejectionReason::DuplicateIn),
            make_ledger("2026-01-16", &full_day),
            make_ledger("2026-01-17", &[(8, 0, PunchKind::In), (12, 0, PunchKind::Out)]),
        ];
        let result = run(&ledgers, &SpecialDays::empty(), &range("2026-01-12", "2026-01-18"));
        let deltas: Vec<i64> = result.balance.entries.iter().map(|e| e.delta_minutes).collect();

        // 540 worked vs 480 expected on each full weekday
        assert_eq!(deltas, vec![60, 60, 60, 0, 60, 0, 0]);
        assert_eq!(result.balance.cumulative(), vec![60, 120, 180, 180, 240, 240, 240]);
        assert_eq!(result.balance.total_minutes, 240);
        assert_eq!(result.rejected_days.len(), 1);
    }

    #[test]
    fn test_cumulative_is_a_fold_over_deltas() {
        let ledgers = vec![
            make_ledger("2026-01-12", &[(8, 0, PunchKind::In), (18, 0, PunchKind::Out)]),
            make_ledger("2026-01-14", &[(10, 0, PunchKind::In), (14, 0, PunchKind::Out)]),
        ];
        let result = run(&ledgers, &SpecialDays::empty(), &range("2026-01-12", "2026-01-18"));

        let mut running = 0;
        for entry in &result.balance.entries {
            running += entry.delta_minutes;
            assert_eq!(entry.cumulative_minutes, running);
        }
        assert_eq!(result.balance.total_minutes, running);
    }

    #[test]
    fn test_missing_schedule_rejects_working_days_only() {
        // Friday, Saturday, Sunday
        let result = accumulate(
            "emp_001",
            &[],
            None,
            &SpecialDays::empty(),
            &range("2026-01-16", "2026-01-18"),
            &LedgerSettings::default(),
            1,
        );

        let statuses: Vec<EntryStatus> = result.balance.entries.iter().map(|e| e.status).collect();
        assert_eq!(
            statuses,
            vec![EntryStatus::Rejected, EntryStatus::Rejected, EntryStatus::NoPunches]
        );
        assert!(
            result
                .rejected_days
                .iter()
                .all(|d| d.reason == RejectionReason::MissingSchedule && d.punch_id.is_none())
        );
        assert_eq!(result.balance.total_minutes, 0);
    }

    #[test]
    fn test_employee_annotation_overrides_expectation() {
        let ledger = make_ledger("2026-01-13", &[(11, 0, PunchKind::DayOff)]);
        let result = run(&[ledger], &SpecialDays::empty(), &range("2026-01-13", "2026-01-13"));
        let entry = &result.balance.entries[0];

        assert_eq!(entry.expected_minutes, 0);
        assert!(entry.is_override);
        assert_eq!(entry.delta_minutes, 0);
        assert_eq!(entry.status, EntryStatus::NoPunches);
    }

    #[test]
    fn test_employee_annotation_resolves_without_schedule() {
        let ledger = make_ledger("2026-01-13", &[(11, 0, PunchKind::Holiday)]);
        let result = accumulate(
            "emp_001",
            &[ledger],
            None,
            &SpecialDays::empty(),
            &range("2026-01-13", "2026-01-13"),
            &LedgerSettings::default(),
            1,
        );
        assert!(result.rejected_days.is_empty());
        assert!(result.balance.entries[0].is_override);
    }

    #[test]
    fn test_rejected_annotated_day_keeps_override() {
        let ledger = DayLedger::rejected(
            "emp_001",
            make_date("2026-01-13"),
            1,
            vec![SpecialDayKind::Holiday],
            PunchRejection {
                reason: RejectionReason::OutOfSequence,
                punch_id: "bad".to_string(),
                timestamp: at("2026-01-13", 17, 0),
            },
        );
        let result = run(&[ledger], &SpecialDays::empty(), &range("2026-01-13", "2026-01-13"));
        let entry = &result.balance.entries[0];

        assert_eq!(entry.expected_minutes, 0);
        assert!(entry.is_override);
        assert_eq!(entry.delta_minutes, 0);
        assert_eq!(entry.status, EntryStatus::Rejected);
        assert_eq!(entry.rejection, Some(RejectionReason::OutOfSequence));
        assert_eq!(result.rejected_days.len(), 1);
    }

    #[test]
    fn test_incomplete_day_counts_closed_minutes_with_warning() {
        let ledger = make_ledger(
            "2026-01-13",
            &[(8, 0, PunchKind::In), (12, 0, PunchKind::LunchStart)],
        );
        let result = run(&[ledger], &SpecialDays::empty(), &range("2026-01-13", "2026-01-13"));
        let entry = &result.balance.entries[0];

        assert_eq!(entry.status, EntryStatus::Incomplete);
        assert_eq!(entry.worked_minutes, 240);
        assert_eq!(entry.delta_minutes, -240);
        assert_eq!(result.warnings[0].code, "INCOMPLETE_DAY");
    }

    #[test]
    fn test_ledgers_outside_range_or_for_others_are_ignored() {
        let mut other = make_ledger("2026-01-13", &[(8, 0, PunchKind::In), (17, 0, PunchKind::Out)]);
        other.employee_id = "emp_002".to_string();
        let outside = make_ledger("2026-01-20", &[(8, 0, PunchKind::In), (17, 0, PunchKind::Out)]);

        let result = run(
            &[other, outside],
            &SpecialDays::empty(),
            &range("2026-01-13", "2026-01-13"),
        );
        assert_eq!(result.balance.entries.len(), 1);
        assert_eq!(result.balance.entries[0].worked_minutes, 0);
    }

    #[test]
    fn test_audit_steps_are_numbered_from_first_step() {
        let result = accumulate(
            "emp_001",
            &[],
            Some(&ScheduleConfig::default()),
            &SpecialDays::empty(),
            &range("2026-01-12", "2026-01-13"),
            &LedgerSettings::default(),
            5,
        );
        let numbers: Vec<u32> = result.audit_steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![5, 6, 7, 8]);
        assert_eq!(result.audit_steps[0].rule_id, "schedule_resolution");
        assert_eq!(result.audit_steps[1].rule_id, "day_balance");
    }
}
