//! Delhi ward metadata

use serde::{Deserialize, Serialize};

/// An administrative ward of Delhi, the unit of risk scoring.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ward {
    /// Opaque identifier, e.g. "w16".
    pub id: String,
    /// Display name, e.g. "Laxmi Nagar".
    pub name: String,
    /// Administrative zone, e.g. "East Delhi".
    pub zone: String,
    /// Centroid for map positioning.
    pub latitude: f64,
    pub longitude: f64,
    /// Estimated population.
    pub population: u32,
    /// Area in square kilometres.
    pub area_sq_km: f64,
    /// Average annual rainfall, mm.
    pub avg_rainfall_mm: f64,
    /// Recorded flood incidents.
    pub historical_incidents: u32,
}
