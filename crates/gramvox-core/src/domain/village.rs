//! Village domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One day's sensor aggregates for a village.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorReading {
    /// Day label within the rolling series (e.g. `"Day 3"`).
    pub day: String,
    /// Volumetric soil moisture, percent.
    pub soil_moisture: f64,
    /// Air temperature, degrees Celsius.
    pub temperature: f64,
    /// Relative humidity, percent.
    pub humidity: f64,
    /// Soil pH.
    pub ph_level: f64,
    /// Backend-formatted reading time, kept verbatim for chart axes.
    pub timestamp: String,
}

/// A monitored village with its telemetry and metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Village {
    /// Stable slug identifier (e.g. `"mandya-kirangur"`).
    pub id: String,
    /// Village name.
    pub name: String,
    /// Administrative district.
    pub district: String,
    /// Indian state.
    pub state: String,
    /// Primary crop grown.
    pub crop: String,
    /// `[latitude, longitude]` pair, as the backend serializes it.
    pub coords: [f64; 2],
    /// Resident population.
    pub population: u32,
    /// Cultivated area in hectares.
    pub area_hectares: f64,
    /// Soil classification (e.g. `"clayey"`, `"alluvial"`).
    pub soil_type: String,
    /// Irrigation method (e.g. `"canal"`, `"drip"`).
    pub irrigation_type: String,
    /// Rolling sensor history, oldest first.
    #[serde(default)]
    pub history: Vec<SensorReading>,
    /// Alert message strings the backend embeds on the village record.
    /// Display-only; structured alert state lives in `AlertRecord`.
    #[serde(default)]
    pub alerts: Vec<String>,
    /// When the backend last touched this record.
    pub last_updated: DateTime<Utc>,
}

impl Village {
    /// Latest sensor reading, if any history exists.
    pub fn latest_reading(&self) -> Option<&SensorReading> {
        self.history.last()
    }
}
