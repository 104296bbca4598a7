//! Balance report models for the Attendance Engine.
//!
//! This module contains the [`BalanceReport`] type and the audit structures
//! that record how every day of a period was resolved and balanced.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PeriodBalance, RejectionReason};

/// A single step in the audit trace recording a balance decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The date the step applies to.
    pub date: NaiveDate,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated while balancing.
///
/// Warnings flag days that were counted but need attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a balance computation.
///
/// # Example
///
/// ```
/// use attendance_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 1234,
/// };
/// assert!(trace.steps.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of balance steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during the computation.
    pub warnings: Vec<AuditWarning>,
    /// The total computation duration in microseconds.
    pub duration_us: u64,
}

/// An employee-day that was counted as zero worked minutes because it was
/// rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedDay {
    /// The employee.
    pub employee_id: String,
    /// The civil date.
    pub date: NaiveDate,
    /// Why the day was rejected.
    pub reason: RejectionReason,
    /// The punch that triggered the rejection, if a punch did.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub punch_id: Option<String>,
    /// The timestamp of that punch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// The result of balancing one employee over a date range.
///
/// The `balance` is a pure function of the inputs; `report_id` and
/// `generated_at` identify this particular run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceReport {
    /// Unique identifier for this report.
    pub report_id: Uuid,
    /// When the report was produced.
    pub generated_at: DateTime<Utc>,
    /// The version of the engine that produced the report.
    pub engine_version: String,
    /// The employee the report is for.
    pub employee_id: String,
    /// The per-day balance and cumulative total.
    pub balance: PeriodBalance,
    /// Rejected employee-days inside the range, for audit.
    pub rejected_days: Vec<RejectedDay>,
    /// Complete audit trace of balance decisions.
    pub audit_trace: AuditTrace,
}
