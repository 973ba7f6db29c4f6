//! Alert domain types.
//!
//! An alert is a hazard notice the backend raised for one village. Records
//! are identified by an opaque backend-assigned id; the village reference
//! is weak (the village may be missing from any given village snapshot and
//! the record is still valid).

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Severity
// ─────────────────────────────────────────────────────────────────────────────

/// Urgency scale for alerts, least urgent first.
///
/// The derived `Ord` is load-bearing: map markers and dashboards compare
/// severities, and `Critical` must sort above all other levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// All severities, least urgent first.
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    /// Wire representation (`"low"`, `"medium"`, `"high"`, `"critical"`).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Capitalized label for list views.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Alert kind
// ─────────────────────────────────────────────────────────────────────────────

/// Hazard category of an alert.
///
/// The backend produces the four named kinds today. `Other` absorbs any
/// unrecognized wire value so a new backend category cannot break polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Drought,
    Flood,
    Pest,
    Disease,
    #[serde(other)]
    Other,
}

impl AlertKind {
    /// Wire representation (`"drought"`, `"flood"`, `"pest"`, `"disease"`,
    /// `"other"`).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Drought => "drought",
            Self::Flood => "flood",
            Self::Pest => "pest",
            Self::Disease => "disease",
            Self::Other => "other",
        }
    }

    /// Capitalized label for list views.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Drought => "Drought",
            Self::Flood => "Flood",
            Self::Pest => "Pest",
            Self::Disease => "Disease",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Alert record
// ─────────────────────────────────────────────────────────────────────────────

/// A hazard alert for one village.
///
/// Dismissal is implicit: a dismissed alert is simply removed from the live
/// set, there is no flag on the record. The store does not deduplicate
/// records for the same `(village_id, kind)` pair; that is a caller concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRecord {
    /// Backend-assigned unique identifier.
    pub id: String,
    /// Weak reference to the village the alert concerns.
    pub village_id: String,
    /// Hazard category.
    #[serde(rename = "alert_type")]
    pub kind: AlertKind,
    /// Localized human-readable description. Voice announcements speak
    /// this text verbatim.
    pub message: String,
    /// Urgency level.
    pub severity: Severity,
    /// When the backend raised the alert.
    pub timestamp: DateTime<Utc>,
}
