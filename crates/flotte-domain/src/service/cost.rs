//! Diesel vs. electric operating cost comparison per (vehicle, route) pair

use serde::{Deserialize, Serialize};

use crate::model::{Route, Vehicle};
use flotte_types::{Error, Result};

/// Policy values of the cost model
///
/// These are the only genuinely variable business inputs, so they are
/// configurable; the defaults are the planning figures the model was
/// built with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostParameters {
    /// Dieselpreis [€/l]
    #[serde(default = "default_diesel_price")]
    pub diesel_price_eur_per_l: f64,

    /// Strompreis Depot-Laden [€/kWh]
    #[serde(default = "default_depot_electricity")]
    pub depot_electricity_eur_per_kwh: f64,

    /// Strompreis öffentliches Laden [€/kWh]
    #[serde(default = "default_public_electricity")]
    pub public_electricity_eur_per_kwh: f64,

    /// Anteil der Ladevorgänge am Depot, 0.0..=1.0
    #[serde(default = "default_depot_share")]
    pub depot_charging_share: f64,

    /// Mautsatz [€/km]
    #[serde(default = "default_toll_rate")]
    pub toll_eur_per_km: f64,

    /// Anteil der mautpflichtigen Strecke, 0.0..=1.0
    #[serde(default = "default_tolled_share")]
    pub tolled_distance_share: f64,

    /// Fahrerlohn [€/h]
    #[serde(default = "default_labour_rate")]
    pub labour_eur_per_h: f64,

    /// Durchschnittsgeschwindigkeit Autobahn [km/h]
    #[serde(default = "default_highway_speed")]
    pub average_highway_speed_kmh: f64,

    /// Wartungskosten-Reduktion des E-Lkw, 0.0..=1.0
    #[serde(default = "default_maintenance_reduction")]
    pub electric_maintenance_reduction: f64,

    /// Jährliche Fahrleistung, wenn das Fahrzeug keine angibt [km]
    #[serde(default = "default_annual_mileage")]
    pub default_annual_mileage_km: f64,
}

fn default_diesel_price() -> f64 {
    1.73
}

fn default_depot_electricity() -> f64 {
    0.21
}

fn default_public_electricity() -> f64 {
    0.50
}

fn default_depot_share() -> f64 {
    1.0
}

fn default_toll_rate() -> f64 {
    0.22
}

fn default_tolled_share() -> f64 {
    0.8
}

fn default_labour_rate() -> f64 {
    25.56
}

fn default_highway_speed() -> f64 {
    80.0
}

fn default_maintenance_reduction() -> f64 {
    0.44
}

fn default_annual_mileage() -> f64 {
    100_000.0
}

impl Default for CostParameters {
    fn default() -> Self {
        Self {
            diesel_price_eur_per_l: default_diesel_price(),
            depot_electricity_eur_per_kwh: default_depot_electricity(),
            public_electricity_eur_per_kwh: default_public_electricity(),
            depot_charging_share: default_depot_share(),
            toll_eur_per_km: default_toll_rate(),
            tolled_distance_share: default_tolled_share(),
            labour_eur_per_h: default_labour_rate(),
            average_highway_speed_kmh: default_highway_speed(),
            electric_maintenance_reduction: default_maintenance_reduction(),
            default_annual_mileage_km: default_annual_mileage(),
        }
    }
}

impl CostParameters {
    /// Blended electricity price over depot and public charging [€/kWh]
    pub fn blended_electricity_price(&self) -> f64 {
        self.depot_charging_share * self.depot_electricity_eur_per_kwh
            + (1.0 - self.depot_charging_share) * self.public_electricity_eur_per_kwh
    }

    /// Checks that all share fields lie within `0.0..=1.0`.
    ///
    /// A share outside that range would turn the blended electricity price
    /// or the maintenance reduction into a negative contribution.
    pub fn validate(&self) -> Result<()> {
        let shares = [
            ("Anteil Depot-Ladevorgang", self.depot_charging_share),
            ("Mautpflichtiger Streckenanteil", self.tolled_distance_share),
            (
                "Wartungs-Reduktion E-Lkw",
                self.electric_maintenance_reduction,
            ),
        ];
        for (label, value) in shares {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidInput(format!(
                    "{} muss zwischen 0 und 1 liegen, ist {}",
                    label, value
                )));
            }
        }
        Ok(())
    }
}

/// Derived cost figures for one (vehicle, route) pair, per powertrain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostComparison {
    /// Durchschnittlicher Strompreis [€/kWh]
    pub blended_electricity_eur_per_kwh: f64,
    /// Wartungskosten pro km, Diesel [€/km]
    pub maintenance_eur_per_km_diesel: f64,
    /// Wartungskosten pro km, E-Lkw [€/km]
    pub maintenance_eur_per_km_electric: f64,
    /// Energiekosten der Route, Diesel [€]
    pub energy_cost_diesel: f64,
    /// Energiekosten der Route, E-Lkw [€]
    pub energy_cost_electric: f64,
    /// Wartungskosten der Route, Diesel [€]
    pub maintenance_cost_diesel: f64,
    /// Wartungskosten der Route, E-Lkw [€]
    pub maintenance_cost_electric: f64,
    /// Mautkosten der Route (nur Diesel) [€]
    pub toll_cost_diesel: f64,
    /// Fahrerkosten der Route [€]; carried for reference, part of neither total
    pub driver_cost: f64,
    /// Gesamtbetriebskosten der Route, Diesel [€]
    pub total_diesel: f64,
    /// Gesamtbetriebskosten der Route, E-Lkw [€]
    pub total_electric: f64,
}

/// One labeled row of the comparison table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRow {
    pub label: String,
    /// `None` renders as "-"
    pub electric: Option<f64>,
    pub diesel: Option<f64>,
    pub unit: String,
}

impl CostRow {
    fn new(label: &str, electric: Option<f64>, diesel: Option<f64>, unit: &str) -> Self {
        Self {
            label: label.to_string(),
            electric,
            diesel,
            unit: unit.to_string(),
        }
    }
}

impl CostComparison {
    /// The comparison table as shown to the user: the pricing assumptions
    /// first, then the derived per-route figures
    pub fn rows(&self, params: &CostParameters) -> Vec<CostRow> {
        vec![
            CostRow::new(
                "Anteil Depot-Ladevorgang",
                Some(params.depot_charging_share * 100.0),
                None,
                "%",
            ),
            CostRow::new(
                "Strompreis Depot-Laden",
                Some(params.depot_electricity_eur_per_kwh),
                None,
                "€/kWh",
            ),
            CostRow::new(
                "Strompreis öffentliches Laden",
                Some(params.public_electricity_eur_per_kwh),
                None,
                "€/kWh",
            ),
            CostRow::new(
                "Durchschnittlicher Strompreis",
                Some(self.blended_electricity_eur_per_kwh),
                None,
                "€/kWh",
            ),
            CostRow::new("Dieselpreis", None, Some(params.diesel_price_eur_per_l), "€/l"),
            CostRow::new(
                "Energiekosten",
                Some(self.energy_cost_electric),
                Some(self.energy_cost_diesel),
                "€ pro Route",
            ),
            CostRow::new(
                "Wartungskosten",
                Some(self.maintenance_cost_electric),
                Some(self.maintenance_cost_diesel),
                "€ pro Route",
            ),
            CostRow::new("Mautkosten", None, Some(self.toll_cost_diesel), "€ pro Route"),
            CostRow::new(
                "Gesamtbetriebskosten",
                Some(self.total_electric),
                Some(self.total_diesel),
                "€ pro Route",
            ),
        ]
    }
}

/// One analyzed (vehicle, route) pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteAnalysis {
    pub vehicle: Vehicle,
    pub route: Route,
    pub costs: CostComparison,
}

fn annual_mileage(vehicle: &Vehicle, params: &CostParameters) -> Result<f64> {
    match vehicle.annual_mileage_km {
        Some(v) if v.is_finite() && v > 0.0 => Ok(v),
        Some(v) => Err(Error::InvalidInput(format!(
            "annual mileage of vehicle '{}' must be positive, got {}",
            vehicle.name, v
        ))),
        None => Ok(params.default_annual_mileage_km),
    }
}

/// Compute the diesel vs. electric cost figures for one (vehicle, route) pair
///
/// An explicitly stored non-positive annual mileage is rejected rather than
/// divided by; an absent one falls back to the configured default.
pub fn calculate_costs(
    vehicle: &Vehicle,
    route: &Route,
    params: &CostParameters,
) -> Result<CostComparison> {
    let mileage = annual_mileage(vehicle, params)?;
    let distance = route.distance_km;

    let maintenance_per_km_diesel = vehicle.maintenance_cost_eur / mileage;
    let maintenance_per_km_electric =
        vehicle.maintenance_cost_eur * (1.0 - params.electric_maintenance_reduction) / mileage;

    let blended_electricity = params.blended_electricity_price();

    let toll_cost_diesel = params.toll_eur_per_km * (distance * params.tolled_distance_share);
    let energy_cost_diesel =
        (route.consumption_per_100km / 100.0) * distance * params.diesel_price_eur_per_l;
    let energy_cost_electric =
        (route.consumption_per_100km / 100.0) * distance * blended_electricity;

    let maintenance_cost_diesel = maintenance_per_km_diesel * distance;
    let maintenance_cost_electric = maintenance_per_km_electric * distance;

    let driver_cost = params.labour_eur_per_h * (distance / params.average_highway_speed_kmh);

    Ok(CostComparison {
        blended_electricity_eur_per_kwh: blended_electricity,
        maintenance_eur_per_km_diesel: maintenance_per_km_diesel,
        maintenance_eur_per_km_electric: maintenance_per_km_electric,
        energy_cost_diesel,
        energy_cost_electric,
        maintenance_cost_diesel,
        maintenance_cost_electric,
        toll_cost_diesel,
        driver_cost,
        total_diesel: energy_cost_diesel + toll_cost_diesel + maintenance_cost_diesel,
        total_electric: energy_cost_electric + maintenance_cost_electric,
    })
}

/// Pair every route with its vehicle and compute the comparison for each pair
///
/// Costs are computed per pair independently; routes whose vehicle is gone
/// are skipped. Having no vehicles or no routes at all is an error so the
/// caller can tell the user which input is missing.
pub fn analyze_fleet(
    vehicles: &[Vehicle],
    routes: &[Route],
    params: &CostParameters,
) -> Result<Vec<RouteAnalysis>> {
    if vehicles.is_empty() || routes.is_empty() {
        return Err(Error::NoData);
    }

    let mut analyses = Vec::new();
    for vehicle in vehicles {
        for route in routes {
            if route.vehicle_id == vehicle.id {
                let costs = calculate_costs(vehicle, route, params)?;
                analyses.push(RouteAnalysis {
                    vehicle: vehicle.clone(),
                    route: route.clone(),
                    costs,
                });
            }
        }
    }
    Ok(analyses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VehicleData;

    fn test_vehicle(maintenance_cost_eur: f64, annual_mileage_km: Option<f64>) -> Vehicle {
        Vehicle::new(VehicleData {
            name: "MAN TGX".to_string(),
            gross_weight_t: 40.0,
            max_payload_t: 25.0,
            maintenance_cost_eur,
            annual_mileage_km,
            ..Default::default()
        })
    }

    fn test_route(vehicle_id: &str, distance_km: f64, consumption: f64) -> Route {
        Route::new(vehicle_id.to_string(), distance_km, 20.0, consumption)
    }

    #[test]
    fn maintenance_per_km() {
        let vehicle = test_vehicle(1000.0, Some(100_000.0));
        let route = test_route(&vehicle.id, 100.0, 30.0);
        let costs = calculate_costs(&vehicle, &route, &CostParameters::default()).unwrap();

        assert!((costs.maintenance_eur_per_km_diesel - 0.01).abs() < 1e-9);
        assert!((costs.maintenance_eur_per_km_electric - 0.0056).abs() < 1e-9);
    }

    #[test]
    fn energy_costs_at_full_depot_share() {
        let vehicle = test_vehicle(1000.0, None);
        let route = test_route(&vehicle.id, 100.0, 30.0);
        let costs = calculate_costs(&vehicle, &route, &CostParameters::default()).unwrap();

        // 30/100 * 100 * 1.73 and 30/100 * 100 * 0.21
        assert!((costs.energy_cost_diesel - 51.9).abs() < 1e-9);
        assert!((costs.energy_cost_electric - 6.3).abs() < 1e-9);
    }

    #[test]
    fn toll_applies_to_80_percent_of_distance() {
        let vehicle = test_vehicle(1000.0, None);
        let route = test_route(&vehicle.id, 100.0, 30.0);
        let costs = calculate_costs(&vehicle, &route, &CostParameters::default()).unwrap();

        assert!((costs.toll_cost_diesel - 17.6).abs() < 1e-9);
    }

    #[test]
    fn diesel_total_is_energy_plus_toll_plus_maintenance() {
        let vehicle = test_vehicle(1000.0, Some(100_000.0));
        let route = test_route(&vehicle.id, 100.0, 30.0);
        let costs = calculate_costs(&vehicle, &route, &CostParameters::default()).unwrap();

        let expected = 51.9 + 17.6 + 0.01 * 100.0;
        assert!((costs.total_diesel - expected).abs() < 1e-9);
    }

    #[test]
    fn electric_total_excludes_toll_and_driver_cost() {
        let vehicle = test_vehicle(1000.0, Some(100_000.0));
        let route = test_route(&vehicle.id, 100.0, 30.0);
        let costs = calculate_costs(&vehicle, &route, &CostParameters::default()).unwrap();

        assert!((costs.total_electric - (6.3 + 0.0056 * 100.0)).abs() < 1e-9);
        // Driver cost is carried but not totaled anywhere
        assert!((costs.driver_cost - 25.56 * (100.0 / 80.0)).abs() < 1e-9);
    }

    #[test]
    fn zero_distance_yields_zero_costs() {
        let vehicle = test_vehicle(1000.0, None);
        let route = test_route(&vehicle.id, 0.0, 30.0);
        let costs = calculate_costs(&vehicle, &route, &CostParameters::default()).unwrap();

        assert_eq!(costs.energy_cost_diesel, 0.0);
        assert_eq!(costs.energy_cost_electric, 0.0);
        assert_eq!(costs.maintenance_cost_diesel, 0.0);
        assert_eq!(costs.maintenance_cost_electric, 0.0);
        assert_eq!(costs.toll_cost_diesel, 0.0);
        assert_eq!(costs.driver_cost, 0.0);
        assert_eq!(costs.total_diesel, 0.0);
        assert_eq!(costs.total_electric, 0.0);
    }

    #[test]
    fn zero_annual_mileage_is_rejected() {
        let vehicle = test_vehicle(1000.0, Some(0.0));
        let route = test_route(&vehicle.id, 100.0, 30.0);
        let err = calculate_costs(&vehicle, &route, &CostParameters::default()).unwrap_err();

        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn missing_annual_mileage_uses_default() {
        let explicit = test_vehicle(1000.0, Some(100_000.0));
        let implicit = test_vehicle(1000.0, None);
        let route = test_route(&explicit.id, 250.0, 28.0);
        let params = CostParameters::default();

        let a = calculate_costs(&explicit, &route, &params).unwrap();
        let b = calculate_costs(&implicit, &route, &params).unwrap();
        assert_eq!(a.maintenance_eur_per_km_diesel, b.maintenance_eur_per_km_diesel);
    }

    #[test]
    fn blended_price_mixes_depot_and_public() {
        let params = CostParameters {
            depot_charging_share: 0.5,
            ..CostParameters::default()
        };
        assert!((params.blended_electricity_price() - (0.5 * 0.21 + 0.5 * 0.50)).abs() < 1e-9);
    }

    #[test]
    fn rows_mark_powertrain_gaps_with_none() {
        let vehicle = test_vehicle(1000.0, None);
        let route = test_route(&vehicle.id, 100.0, 30.0);
        let params = CostParameters::default();
        let rows = calculate_costs(&vehicle, &route, &params).unwrap().rows(&params);

        let toll = rows.iter().find(|r| r.label == "Mautkosten").unwrap();
        assert!(toll.electric.is_none());
        assert!(toll.diesel.is_some());

        let total = rows.iter().find(|r| r.label == "Gesamtbetriebskosten").unwrap();
        assert!(total.electric.is_some() && total.diesel.is_some());
    }

    #[test]
    fn analyze_fleet_pairs_routes_with_their_vehicle() {
        let a = test_vehicle(1000.0, None);
        let b = test_vehicle(2000.0, None);
        let routes = vec![
            test_route(&a.id, 100.0, 30.0),
            test_route(&b.id, 50.0, 25.0),
            test_route("missing", 10.0, 20.0),
        ];
        let analyses =
            analyze_fleet(&[a.clone(), b.clone()], &routes, &CostParameters::default()).unwrap();

        assert_eq!(analyses.len(), 2);
        assert_eq!(analyses[0].vehicle.id, a.id);
        assert_eq!(analyses[1].vehicle.id, b.id);
    }

    #[test]
    fn analyze_fleet_requires_both_inputs() {
        let vehicle = test_vehicle(1000.0, None);
        let route = test_route(&vehicle.id, 100.0, 30.0);
        let params = CostParameters::default();

        assert!(matches!(
            analyze_fleet(&[], &[route.clone()], &params).unwrap_err(),
            Error::NoData
        ));
        assert!(matches!(
            analyze_fleet(&[vehicle], &[], &params).unwrap_err(),
            Error::NoData
        ));
    }

    #[test]
    fn parameters_deserialize_with_partial_toml() {
        let params: CostParameters = toml::from_str("diesel_price_eur_per_l = 2.05").unwrap();
        assert!((params.diesel_price_eur_per_l - 2.05).abs() < 1e-9);
        assert!((params.toll_eur_per_km - 0.22).abs() < 1e-9);
    }

    #[test]
    fn validate_accepts_boundary_shares() {
        let mut params = CostParameters::default();
        params.depot_charging_share = 0.0;
        params.tolled_distance_share = 1.0;
        params.electric_maintenance_reduction = 0.5;

        assert!(params.validate().is_ok());
    }

    #[test]
    fn validate_rejects_shares_outside_unit_interval() {
        for share in [-0.1, 2.0, f64::NAN] {
            let mut params = CostParameters::default();
            params.depot_charging_share = share;
            assert!(matches!(
                params.validate().unwrap_err(),
                Error::InvalidInput(_)
            ));

            let mut params = CostParameters::default();
            params.tolled_distance_share = share;
            assert!(params.validate().is_err());

            let mut params = CostParameters::default();
            params.electric_maintenance_reduction = share;
            assert!(params.validate().is_err());
        }
    }

    #[test]
    fn oversized_depot_share_would_turn_blending_negative() {
        // A share of 2.0 makes the public-charging term negative, which is
        // exactly what validate() guards against.
        let mut params = CostParameters::default();
        params.depot_charging_share = 2.0;
        assert!(params.blended_electricity_price() < 0.0);
        assert!(params.validate().is_err());
    }
}
