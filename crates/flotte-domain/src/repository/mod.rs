//! Repository trait definitions for data persistence

use crate::model::{Route, Vehicle};
use flotte_types::Error;

/// Repository for registered vehicles
pub trait VehicleRepository {
    /// Save a vehicle, returning its identifier
    fn save_vehicle(&mut self, vehicle: &Vehicle) -> Result<String, Error>;

    /// Find a vehicle by identifier
    fn find_vehicle(&self, id: &str) -> Result<Option<Vehicle>, Error>;

    /// Find all vehicles, ordered by registration time then name
    fn find_all_vehicles(&self) -> Result<Vec<Vehicle>, Error>;

    /// Remove a vehicle by identifier; returns whether it existed
    fn remove_vehicle(&mut self, id: &str) -> Result<bool, Error>;
}

/// Repository for routes
pub trait RouteRepository {
    /// Save a route
    fn save_route(&mut self, route: &Route) -> Result<(), Error>;

    /// Find routes, optionally restricted to one vehicle
    fn find_routes(&self, vehicle_id: Option<&str>) -> Result<Vec<Route>, Error>;
}

/// Combined store handle the application layer works against
pub trait FleetRepository: VehicleRepository + RouteRepository {}

impl<T: VehicleRepository + RouteRepository> FleetRepository for T {}
