//! Route record

use serde::{Deserialize, Serialize};

/// One trip definition associated with a vehicle
///
/// `consumption_per_100km` is read as l/100km for the diesel variant and
/// kWh/100km for the electric variant of the same vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Identifier of the vehicle this route belongs to
    pub vehicle_id: String,
    /// Strecke [km]
    pub distance_km: f64,
    /// Beladung [t]
    pub load_t: f64,
    /// Verbrauch [kWh bzw. l / 100 km]
    pub consumption_per_100km: f64,
    /// Schichtzeiten (concrete times or hours)
    #[serde(default)]
    pub shift_times: Option<String>,
    /// Standzeiten am Depot [h]
    #[serde(default)]
    pub depot_idle_hours: Option<f64>,
    /// Depot Standort
    #[serde(default)]
    pub depot_location: Option<String>,
    /// When created
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Route {
    pub fn new(vehicle_id: String, distance_km: f64, load_t: f64, consumption_per_100km: f64) -> Self {
        Self {
            vehicle_id,
            distance_km,
            load_t,
            consumption_per_100km,
            shift_times: None,
            depot_idle_hours: None,
            depot_location: None,
            created_at: chrono::Utc::now(),
        }
    }
}
