//! In-memory fleet store for session-scope use

use std::collections::HashMap;

use flotte_domain::model::{Route, Vehicle};
use flotte_domain::repository::{RouteRepository, VehicleRepository};
use flotte_types::Error;

use super::sort_vehicles;

/// Session-scope store; everything is lost when it is dropped
#[derive(Debug, Default)]
pub struct MemoryFleetStore {
    vehicles: HashMap<String, Vehicle>,
    routes: Vec<Route>,
}

impl MemoryFleetStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VehicleRepository for MemoryFleetStore {
    fn save_vehicle(&mut self, vehicle: &Vehicle) -> Result<String, Error> {
        self.vehicles.insert(vehicle.id.clone(), vehicle.clone());
        Ok(vehicle.id.clone())
    }

    fn find_vehicle(&self, id: &str) -> Result<Option<Vehicle>, Error> {
        Ok(self.vehicles.get(id).cloned())
    }

    fn find_all_vehicles(&self) -> Result<Vec<Vehicle>, Error> {
        let mut vehicles: Vec<_> = self.vehicles.values().cloned().collect();
        sort_vehicles(&mut vehicles);
        Ok(vehicles)
    }

    fn remove_vehicle(&mut self, id: &str) -> Result<bool, Error> {
        Ok(self.vehicles.remove(id).is_some())
    }
}

impl RouteRepository for MemoryFleetStore {
    fn save_route(&mut self, route: &Route) -> Result<(), Error> {
        self.routes.push(route.clone());
        Ok(())
    }

    fn find_routes(&self, vehicle_id: Option<&str>) -> Result<Vec<Route>, Error> {
        Ok(self
            .routes
            .iter()
            .filter(|r| vehicle_id.map_or(true, |id| r.vehicle_id == id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flotte_domain::model::VehicleData;

    fn vehicle(name: &str) -> Vehicle {
        Vehicle::new(VehicleData {
            name: name.to_string(),
            maintenance_cost_eur: 1000.0,
            ..Default::default()
        })
    }

    #[test]
    fn round_trips_vehicle_fields() {
        let mut store = MemoryFleetStore::new();
        let v = vehicle("Scania R 450");
        store.save_vehicle(&v).unwrap();

        let listed = store.find_all_vehicles().unwrap();
        assert_eq!(listed, vec![v]);
    }

    #[test]
    fn removes_by_id() {
        let mut store = MemoryFleetStore::new();
        let v = vehicle("Volvo FH");
        store.save_vehicle(&v).unwrap();

        assert!(store.remove_vehicle(&v.id).unwrap());
        assert!(!store.remove_vehicle(&v.id).unwrap());
        assert!(store.find_all_vehicles().unwrap().is_empty());
    }

    #[test]
    fn filters_routes_by_vehicle() {
        let mut store = MemoryFleetStore::new();
        let a = vehicle("A");
        let b = vehicle("B");
        store.save_vehicle(&a).unwrap();
        store.save_vehicle(&b).unwrap();
        store.save_route(&Route::new(a.id.clone(), 100.0, 20.0, 30.0)).unwrap();
        store.save_route(&Route::new(b.id.clone(), 50.0, 10.0, 25.0)).unwrap();

        assert_eq!(store.find_routes(None).unwrap().len(), 2);
        let only_a = store.find_routes(Some(&a.id)).unwrap();
        assert_eq!(only_a.len(), 1);
        assert_eq!(only_a[0].vehicle_id, a.id);
    }
}
