//! Dashboard aggregates and simulation DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::alert::{AlertKind, AlertRecord, Severity};

/// Aggregate counts for the dashboard header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Number of monitored villages.
    pub total_villages: u64,
    /// Live (undismissed) alerts across all villages.
    pub active_alerts: u64,
    /// Live alerts with critical severity.
    pub critical_alerts: u64,
    /// Villages the backend currently classifies as critical.
    pub critical_villages: u64,
    /// When the backend computed these counts.
    pub last_updated: DateTime<Utc>,
}

/// Request body for triggering a hazard simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Hazard to simulate.
    pub scenario: AlertKind,
    /// Target village id.
    pub village_id: String,
    /// Severity the created alert should carry.
    pub severity: Severity,
}

/// Backend response to a simulation trigger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationOutcome {
    /// Human-readable acknowledgment.
    pub message: String,
    /// The alert the backend created. Its `message` is what voice
    /// announcements speak.
    pub alert: AlertRecord,
    /// When the simulation ran.
    pub timestamp: DateTime<Utc>,
}
