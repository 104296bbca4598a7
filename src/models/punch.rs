//! Punch event model and related types.
//!
//! A punch is a single timestamped attendance event. Physical punches
//! (`IN`, `OUT`, `LUNCH_START`, `LUNCH_END`) drive interval math; `HOLIDAY` and
//! `DAY_OFF` are administrative annotations recorded against one employee and
//! never take part in it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SpecialDayKind;

/// The kind of a punch event.
///
/// # Example
///
/// ```
/// use attendance_engine::models::PunchKind;
///
/// let kind: PunchKind = serde_json::from_str("\"LUNCH_START\"").unwrap();
/// assert_eq!(kind, PunchKind::LunchStart);
/// assert!(!kind.is_annotation());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PunchKind {
    /// Clock in.
    In,
    /// Clock out.
    Out,
    /// Leaving for lunch.
    LunchStart,
    /// Back from lunch.
    LunchEnd,
    /// Administrative holiday annotation for this employee.
    Holiday,
    /// Administrative day-off annotation for this employee.
    DayOff,
}

impl PunchKind {
    /// Returns true for `HOLIDAY` and `DAY_OFF`, which are annotations rather
    /// than physical punches.
    pub fn is_annotation(self) -> bool {
        self.annotation_kind().is_some()
    }

    /// Maps an annotation punch to the special-day kind it declares.
    pub fn annotation_kind(self) -> Option<SpecialDayKind> {
        match self {
            PunchKind::Holiday => Some(SpecialDayKind::Holiday),
            PunchKind::DayOff => Some(SpecialDayKind::DayOff),
            _ => None,
        }
    }
}

impl std::fmt::Display for PunchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PunchKind::In => write!(f, "IN"),
            PunchKind::Out => write!(f, "OUT"),
            PunchKind::LunchStart => write!(f, "LUNCH_START"),
            PunchKind::LunchEnd => write!(f, "LUNCH_END"),
            PunchKind::Holiday => write!(f, "HOLIDAY"),
            PunchKind::DayOff => write!(f, "DAY_OFF"),
        }
    }
}

/// A GPS position captured with a punch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

/// Evidence captured alongside a punch.
///
/// The engine carries evidence through untouched; it never verifies photos or
/// positions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PunchEvidence {
    /// Reference to the stored photo (storage key or URL).
    #[serde(default)]
    pub photo_ref: Option<String>,
    /// Where the punch was taken.
    #[serde(default)]
    pub location: Option<GeoPoint>,
}

/// A single recorded attendance event. Immutable once recorded.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{PunchEvent, PunchKind};
///
/// let json = r#"{
///     "id": "p1",
///     "employee_id": "emp_002",
///     "timestamp": "2026-01-13T11:00:00Z",
///     "kind": "IN"
/// }"#;
/// let punch: PunchEvent = serde_json::from_str(json).unwrap();
/// assert_eq!(punch.kind, PunchKind::In);
/// assert!(!punch.is_manual);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PunchEvent {
    /// Unique identifier of the punch.
    pub id: String,
    /// The employee who punched.
    pub employee_id: String,
    /// The instant of the punch, in UTC.
    pub timestamp: DateTime<Utc>,
    /// What the punch records.
    pub kind: PunchKind,
    /// Photo and GPS evidence, absent for manual entries.
    #[serde(default)]
    pub evidence: Option<PunchEvidence>,
    /// Whether an administrator entered the punch by hand.
    #[serde(default)]
    pub is_manual: bool,
}

impl PunchEvent {
    /// Creates a punch without evidence.
    pub fn new(
        id: impl Into<String>,
        employee_id: impl Into<String>,
        timestamp: DateTime<Utc>,
        kind: PunchKind,
    ) -> Self {
        Self {
            id: id.into(),
            employee_id: employee_id.into(),
            timestamp,
            kind,
            evidence: None,
            is_manual: false,
        }
    }

    /// Returns true if this punch is an administrative annotation.
    pub fn is_annotation(&self) -> bool {
        self.kind.is_annotation()
    }
}
