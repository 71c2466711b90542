//! Ward registry
//!
//! Static metadata for the Delhi wards the dashboard covers. Real boundary
//! data would come from the Delhi Geoportal; this registry carries the
//! attributes the risk model and the map panels consume.

use shared::{RiskPredictionInput, Ward};

/// In-memory registry of Delhi wards.
#[derive(Debug, Clone)]
pub struct WardRegistry {
    wards: Vec<Ward>,
}

impl WardRegistry {
    /// Registry seeded with the covered Delhi wards.
    pub fn delhi() -> Self {
        Self {
            wards: delhi_wards(),
        }
    }

    /// Look up a ward by its identifier.
    pub fn get(&self, ward_id: &str) -> Option<&Ward> {
        self.wards.iter().find(|w| w.id == ward_id)
    }

    /// All registered wards.
    pub fn list(&self) -> &[Ward] {
        &self.wards
    }

    /// Fill optional prediction inputs the caller omitted from the ward
    /// record, when the ward is known. Returns true if anything was filled.
    ///
    /// Fields filled here count as supplied for confidence purposes, since
    /// they come from recorded ward data rather than a blanket default.
    pub fn enrich(&self, input: &mut RiskPredictionInput) -> bool {
        let Some(ward) = self.get(&input.ward_id) else {
            return false;
        };

        let mut enriched = false;
        if input.historical_incidents.is_none() {
            input.historical_incidents = Some(ward.historical_incidents as f64);
            enriched = true;
        }
        enriched
    }
}

impl Default for WardRegistry {
    fn default() -> Self {
        Self::delhi()
    }
}

fn ward(
    id: &str,
    name: &str,
    zone: &str,
    latitude: f64,
    longitude: f64,
    population: u32,
    area_sq_km: f64,
    avg_rainfall_mm: f64,
    historical_incidents: u32,
) -> Ward {
    Ward {
        id: id.to_string(),
        name: name.to_string(),
        zone: zone.to_string(),
        latitude,
        longitude,
        population,
        area_sq_km,
        avg_rainfall_mm,
        historical_incidents,
    }
}

fn delhi_wards() -> Vec<Ward> {
    vec![
        // Central Delhi
        ward("w01", "Connaught Place", "Central Delhi", 28.6315, 77.2167, 182_000, 4.5, 750.0, 8),
        ward("w02", "Karol Bagh", "Central Delhi", 28.6519, 77.1909, 156_000, 3.8, 820.0, 15),
        ward("w03", "Paharganj", "Central Delhi", 28.6448, 77.2107, 98_000, 2.1, 780.0, 12),
        ward("w04", "Daryaganj", "Central Delhi", 28.6469, 77.2404, 125_000, 3.2, 760.0, 9),
        // North Delhi
        ward("w05", "Civil Lines", "North Delhi", 28.6814, 77.2226, 145_000, 5.8, 720.0, 5),
        ward("w06", "Model Town", "North Delhi", 28.7173, 77.1926, 178_000, 6.2, 740.0, 7),
        ward("w07", "Sadar Bazar", "North Delhi", 28.6617, 77.2028, 210_000, 3.5, 850.0, 18),
        // South Delhi
        ward("w09", "Saket", "South Delhi", 28.5244, 77.2066, 167_000, 6.2, 710.0, 9),
        ward("w10", "Vasant Kunj", "South Delhi", 28.5195, 77.1565, 145_000, 9.8, 680.0, 4),
        ward("w14", "Mehrauli", "South Delhi", 28.5175, 77.1785, 234_000, 8.5, 780.0, 12),
        // East Delhi (Yamuna floodplain, highest risk)
        ward("w15", "Mayur Vihar", "East Delhi", 28.5921, 77.2932, 198_000, 5.6, 890.0, 22),
        ward("w16", "Laxmi Nagar", "East Delhi", 28.6304, 77.2783, 223_000, 4.2, 920.0, 25),
        ward("w17", "Preet Vihar", "East Delhi", 28.6398, 77.2948, 187_000, 4.8, 850.0, 16),
        ward("w18", "Patparganj", "East Delhi", 28.6165, 77.2873, 245_000, 6.2, 880.0, 20),
        // West Delhi
        ward("w20", "Punjabi Bagh", "West Delhi", 28.6714, 77.1304, 189_000, 4.8, 790.0, 14),
    ]
}
