//! JSON file fleet store
//!
//! Vehicles live in `vehicles.json` (keyed by id), routes in `routes.json`.
//! Every mutation writes through to disk before returning.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use flotte_domain::model::{Route, Vehicle};
use flotte_domain::repository::{RouteRepository, VehicleRepository};
use flotte_types::Error;

use super::sort_vehicles;

pub struct JsonFleetStore {
    vehicles_path: PathBuf,
    routes_path: PathBuf,
    vehicles: HashMap<String, Vehicle>,
    routes: Vec<Route>,
}

impl JsonFleetStore {
    /// Create or load a store in the given directory
    pub fn open(store_dir: PathBuf) -> Result<Self, Error> {
        fs::create_dir_all(&store_dir)?;
        let vehicles_path = store_dir.join("vehicles.json");
        let routes_path = store_dir.join("routes.json");

        let vehicles = if vehicles_path.exists() {
            let file = File::open(&vehicles_path)?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).unwrap_or_else(|e| {
                log::warn!("unreadable {}, starting empty: {}", vehicles_path.display(), e);
                HashMap::new()
            })
        } else {
            HashMap::new()
        };

        let routes = if routes_path.exists() {
            let file = File::open(&routes_path)?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).unwrap_or_else(|e| {
                log::warn!("unreadable {}, starting empty: {}", routes_path.display(), e);
                Vec::new()
            })
        } else {
            Vec::new()
        };

        Ok(Self {
            vehicles_path,
            routes_path,
            vehicles,
            routes,
        })
    }

    fn save_vehicles(&self) -> Result<(), Error> {
        let file = File::create(&self.vehicles_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &self.vehicles)?;
        Ok(())
    }

    fn save_routes(&self) -> Result<(), Error> {
        let file = File::create(&self.routes_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &self.routes)?;
        Ok(())
    }
}

impl VehicleRepository for JsonFleetStore {
    fn save_vehicle(&mut self, vehicle: &Vehicle) -> Result<String, Error> {
        self.vehicles.insert(vehicle.id.clone(), vehicle.clone());
        self.save_vehicles()?;
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
        let removed = self.vehicles.remove(id).is_some();
        if removed {
            self.save_vehicles()?;
        }
        Ok(removed)
    }
}

impl RouteRepository for JsonFleetStore {
    fn save_route(&mut self, route: &Route) -> Result<(), Error> {
        self.routes.push(route.clone());
        self.save_routes()?;
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
            gross_weight_t: 40.0,
            max_payload_t: 25.0,
            purchase_price_eur: 120_000.0,
            maintenance_cost_eur: 8000.0,
            annual_mileage_km: Some(110_000.0),
            ..Default::default()
        })
    }

    #[test]
    fn survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let v = vehicle("DAF XF");
        let route = Route::new(v.id.clone(), 320.0, 18.0, 27.0);

        {
            let mut store = JsonFleetStore::open(dir.path().to_path_buf()).unwrap();
            store.save_vehicle(&v).unwrap();
            store.save_route(&route).unwrap();
        }

        let store = JsonFleetStore::open(dir.path().to_path_buf()).unwrap();
        assert_eq!(store.find_all_vehicles().unwrap(), vec![v.clone()]);
        assert_eq!(store.find_routes(Some(&v.id)).unwrap(), vec![route]);
    }

    #[test]
    fn remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let v = vehicle("Iveco S-Way");

        let mut store = JsonFleetStore::open(dir.path().to_path_buf()).unwrap();
        store.save_vehicle(&v).unwrap();
        assert!(store.remove_vehicle(&v.id).unwrap());

        let reopened = JsonFleetStore::open(dir.path().to_path_buf()).unwrap();
        assert!(reopened.find_all_vehicles().unwrap().is_empty());
    }

    #[test]
    fn opens_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFleetStore::open(dir.path().join("fresh")).unwrap();
        assert!(store.find_all_vehicles().unwrap().is_empty());
        assert!(store.find_routes(None).unwrap().is_empty());
    }
}
