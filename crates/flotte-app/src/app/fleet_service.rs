//! Fleet use cases over an injected store
//!
//! Records entered during a session are kept in the session scope even when
//! the durable write fails; the failure is surfaced as a message, not an
//! error (no rollback, no retry).

use flotte_domain::model::{Route, Vehicle, VehicleData};
use flotte_domain::repository::FleetRepository;
use flotte_domain::service::{analyze_fleet, CostParameters, RouteAnalysis};
use flotte_types::{Error, Result};

/// Result of a create operation
#[derive(Debug, Clone)]
pub struct SaveOutcome {
    pub id: String,
    /// Whether the durable write went through
    pub persisted: bool,
    /// User-facing message when it did not
    pub message: Option<String>,
}

impl SaveOutcome {
    fn persisted(id: String) -> Self {
        Self {
            id,
            persisted: true,
            message: None,
        }
    }

    fn session_only(id: String, error: &Error) -> Self {
        Self {
            id,
            persisted: false,
            message: Some(format!("Daten nur in der Sitzung gespeichert: {error}")),
        }
    }
}

pub struct FleetService {
    store: Box<dyn FleetRepository>,
    params: CostParameters,
    /// Records the durable store failed to accept this session
    session_vehicles: Vec<Vehicle>,
    session_routes: Vec<Route>,
}

impl FleetService {
    pub fn new(store: Box<dyn FleetRepository>, params: CostParameters) -> Self {
        Self {
            store,
            params,
            session_vehicles: Vec::new(),
            session_routes: Vec::new(),
        }
    }

    pub fn params(&self) -> &CostParameters {
        &self.params
    }

    pub fn set_params(&mut self, params: CostParameters) {
        self.params = params;
    }

    /// Register a new vehicle with a generated identifier
    pub fn register_vehicle(&mut self, data: VehicleData) -> SaveOutcome {
        self.register_vehicle_record(Vehicle::new(data))
    }

    /// Register an already-constructed vehicle record (CSV import)
    pub fn register_vehicle_record(&mut self, vehicle: Vehicle) -> SaveOutcome {
        match self.store.save_vehicle(&vehicle) {
            Ok(id) => SaveOutcome::persisted(id),
            Err(e) => {
                log::warn!("vehicle {} not persisted: {}", vehicle.id, e);
                let outcome = SaveOutcome::session_only(vehicle.id.clone(), &e);
                self.session_vehicles.push(vehicle);
                outcome
            }
        }
    }

    /// All vehicles: the durable store's, then session-only ones
    pub fn vehicles(&self) -> Vec<Vehicle> {
        let mut vehicles = match self.store.find_all_vehicles() {
            Ok(v) => v,
            Err(e) => {
                log::warn!("vehicle listing from store failed: {}", e);
                Vec::new()
            }
        };
        vehicles.extend(self.session_vehicles.iter().cloned());
        vehicles
    }

    pub fn find_vehicle(&self, id: &str) -> Option<Vehicle> {
        self.vehicles().into_iter().find(|v| v.id == id)
    }

    /// Remove a vehicle by identifier from both scopes
    pub fn remove_vehicle(&mut self, id: &str) -> Result<bool> {
        let in_session = self.session_vehicles.iter().position(|v| v.id == id);
        if let Some(index) = in_session {
            self.session_vehicles.remove(index);
        }
        let in_store = self.store.remove_vehicle(id)?;
        Ok(in_store || in_session.is_some())
    }

    /// Register a route; the referenced vehicle must exist
    pub fn register_route(&mut self, route: Route) -> Result<SaveOutcome> {
        if self.vehicles().is_empty() {
            return Err(Error::NoData);
        }
        if self.find_vehicle(&route.vehicle_id).is_none() {
            return Err(Error::UnknownVehicle(route.vehicle_id));
        }

        let id = route.vehicle_id.clone();
        match self.store.save_route(&route) {
            Ok(()) => Ok(SaveOutcome::persisted(id)),
            Err(e) => {
                log::warn!("route for vehicle {} not persisted: {}", id, e);
                let outcome = SaveOutcome::session_only(id, &e);
                self.session_routes.push(route);
                Ok(outcome)
            }
        }
    }

    /// All routes, optionally restricted to one vehicle
    pub fn routes(&self, vehicle_id: Option<&str>) -> Vec<Route> {
        let mut routes = match self.store.find_routes(vehicle_id) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("route listing from store failed: {}", e);
                Vec::new()
            }
        };
        routes.extend(
            self.session_routes
                .iter()
                .filter(|r| vehicle_id.map_or(true, |id| r.vehicle_id == id))
                .cloned(),
        );
        routes
    }

    /// Cost comparison for every (vehicle, route) pair
    pub fn analyze(&self) -> Result<Vec<RouteAnalysis>> {
        analyze_fleet(&self.vehicles(), &self.routes(None), &self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flotte_infra::MemoryFleetStore;
    use flotte_domain::repository::{RouteRepository, VehicleRepository};

    fn service() -> FleetService {
        FleetService::new(Box::new(MemoryFleetStore::new()), CostParameters::default())
    }

    fn truck(name: &str) -> VehicleData {
        VehicleData {
            name: name.to_string(),
            maintenance_cost_eur: 1000.0,
            ..Default::default()
        }
    }

    /// Store double whose durable writes always fail
    #[derive(Default)]
    struct BrokenStore;

    impl VehicleRepository for BrokenStore {
        fn save_vehicle(&mut self, _: &Vehicle) -> std::result::Result<String, Error> {
            Err(Error::Io(std::io::Error::other("disk gone")))
        }
        fn find_vehicle(&self, _: &str) -> std::result::Result<Option<Vehicle>, Error> {
            Ok(None)
        }
        fn find_all_vehicles(&self) -> std::result::Result<Vec<Vehicle>, Error> {
            Ok(Vec::new())
        }
        fn remove_vehicle(&mut self, _: &str) -> std::result::Result<bool, Error> {
            Ok(false)
        }
    }

    impl RouteRepository for BrokenStore {
        fn save_route(&mut self, _: &Route) -> std::result::Result<(), Error> {
            Err(Error::Io(std::io::Error::other("disk gone")))
        }
        fn find_routes(&self, _: Option<&str>) -> std::result::Result<Vec<Route>, Error> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn register_and_list() {
        let mut service = service();
        let outcome = service.register_vehicle(truck("MAN TGX"));
        assert!(outcome.persisted);

        let vehicles = service.vehicles();
        assert_eq!(vehicles.len(), 1);
        assert_eq!(vehicles[0].id, outcome.id);
    }

    #[test]
    fn route_requires_known_vehicle() {
        let mut service = service();
        let route = Route::new("nope".to_string(), 100.0, 20.0, 30.0);
        assert!(matches!(
            service.register_route(route.clone()).unwrap_err(),
            Error::NoData
        ));

        service.register_vehicle(truck("MAN TGX"));
        assert!(matches!(
            service.register_route(route).unwrap_err(),
            Error::UnknownVehicle(_)
        ));
        assert!(service.routes(None).is_empty());
    }

    #[test]
    fn failed_write_keeps_record_in_session() {
        let mut service =
            FleetService::new(Box::<BrokenStore>::default(), CostParameters::default());

        let outcome = service.register_vehicle(truck("MAN TGX"));
        assert!(!outcome.persisted);
        assert!(outcome.message.is_some());

        // The record is still usable this session
        let vehicles = service.vehicles();
        assert_eq!(vehicles.len(), 1);

        let route = Route::new(vehicles[0].id.clone(), 100.0, 20.0, 30.0);
        let route_outcome = service.register_route(route).unwrap();
        assert!(!route_outcome.persisted);
        assert_eq!(service.routes(None).len(), 1);
        assert_eq!(service.analyze().unwrap().len(), 1);
    }

    #[test]
    fn remove_vehicle_clears_both_scopes() {
        let mut service = service();
        let id = service.register_vehicle(truck("Volvo FH")).id;
        assert!(service.remove_vehicle(&id).unwrap());
        assert!(!service.remove_vehicle(&id).unwrap());
        assert!(service.vehicles().is_empty());
    }

    #[test]
    fn analyze_without_data_is_an_error() {
        let service = service();
        assert!(matches!(service.analyze().unwrap_err(), Error::NoData));
    }

    #[test]
    fn analyze_pairs_per_vehicle() {
        let mut service = service();
        let id = service.register_vehicle(truck("MAN TGX")).id;
        service
            .register_route(Route::new(id.clone(), 100.0, 20.0, 30.0))
            .unwrap();

        let analyses = service.analyze().unwrap();
        assert_eq!(analyses.len(), 1);
        assert!((analyses[0].costs.energy_cost_diesel - 51.9).abs() < 1e-9);
    }
}
