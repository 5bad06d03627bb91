//! Fleet vehicle record

use serde::{Deserialize, Serialize};

/// A registered fleet truck with its fixed and operating cost attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Unique identifier, generated at registration
    pub id: String,
    /// Fahrzeugname (e.g., "MAN TGX 18.470")
    pub name: String,
    /// Zulässiges Gesamtgewicht [t]
    pub gross_weight_t: f64,
    /// Maximale Zuladung [t]
    pub max_payload_t: f64,
    /// Kaufpreis [EUR]
    pub purchase_price_eur: f64,
    /// Prognostizierter Restwert [EUR]
    pub residual_value_eur: f64,
    /// Geplante Laufzeit [km oder Jahre]
    pub planned_lifetime: f64,
    /// Versicherungskosten, jährlich [EUR]
    pub insurance_cost_eur: f64,
    /// Kraftfahrzeugsteuer, jährlich [EUR]
    pub vehicle_tax_eur: f64,
    /// Wartungskosten, jährlich [EUR]
    pub maintenance_cost_eur: f64,
    /// Mautkosten, jährlich [EUR]
    pub toll_cost_eur: f64,
    /// Jährliche Fahrleistung [km]; the configured default applies when absent
    #[serde(default)]
    pub annual_mileage_km: Option<f64>,
    /// When registered
    pub registered_at: chrono::DateTime<chrono::Utc>,
}

/// Cost attributes collected by the entry form, without the generated fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VehicleData {
    pub name: String,
    pub gross_weight_t: f64,
    pub max_payload_t: f64,
    pub purchase_price_eur: f64,
    pub residual_value_eur: f64,
    pub planned_lifetime: f64,
    pub insurance_cost_eur: f64,
    pub vehicle_tax_eur: f64,
    pub maintenance_cost_eur: f64,
    pub toll_cost_eur: f64,
    #[serde(default)]
    pub annual_mileage_km: Option<f64>,
}

impl Vehicle {
    pub fn new(data: VehicleData) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: data.name,
            gross_weight_t: data.gross_weight_t,
            max_payload_t: data.max_payload_t,
            purchase_price_eur: data.purchase_price_eur,
            residual_value_eur: data.residual_value_eur,
            planned_lifetime: data.planned_lifetime,
            insurance_cost_eur: data.insurance_cost_eur,
            vehicle_tax_eur: data.vehicle_tax_eur,
            maintenance_cost_eur: data.maintenance_cost_eur,
            toll_cost_eur: data.toll_cost_eur,
            annual_mileage_km: data.annual_mileage_km,
            registered_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_generates_unique_ids() {
        let a = Vehicle::new(VehicleData {
            name: "Lkw A".to_string(),
            ..Default::default()
        });
        let b = Vehicle::new(VehicleData {
            name: "Lkw B".to_string(),
            ..Default::default()
        });
        assert_ne!(a.id, b.id);
        assert!(!a.id.is_empty());
    }

    #[test]
    fn annual_mileage_defaults_to_none() {
        let v = Vehicle::new(VehicleData::default());
        assert!(v.annual_mileage_km.is_none());
    }
}
