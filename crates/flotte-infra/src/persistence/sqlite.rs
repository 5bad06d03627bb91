//! SQLite fleet store
//!
//! The async sqlx driver is hidden behind a blocking runtime handle so the
//! application layer stays synchronous like the other backends.

use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use tokio::runtime::Runtime;

use flotte_domain::model::{Route, Vehicle};
use flotte_domain::repository::{RouteRepository, VehicleRepository};
use flotte_types::Error;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS vehicles (
    id                    TEXT PRIMARY KEY,
    name                  TEXT NOT NULL,
    gross_weight_t        REAL NOT NULL,
    max_payload_t         REAL NOT NULL,
    purchase_price_eur    REAL NOT NULL,
    residual_value_eur    REAL NOT NULL,
    planned_lifetime      REAL NOT NULL,
    insurance_cost_eur    REAL NOT NULL,
    vehicle_tax_eur       REAL NOT NULL,
    maintenance_cost_eur  REAL NOT NULL,
    toll_cost_eur         REAL NOT NULL,
    annual_mileage_km     REAL,
    registered_at         TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS routes (
    id                    INTEGER PRIMARY KEY AUTOINCREMENT,
    vehicle_id            TEXT NOT NULL REFERENCES vehicles(id),
    distance_km           REAL NOT NULL,
    load_t                REAL NOT NULL,
    consumption_per_100km REAL NOT NULL,
    shift_times           TEXT,
    depot_idle_hours      REAL,
    depot_location        TEXT,
    created_at            TEXT NOT NULL
);
";

pub struct SqliteFleetStore {
    runtime: Runtime,
    pool: SqlitePool,
}

impl SqliteFleetStore {
    /// Open or create a database file
    pub fn open(path: &Path) -> Result<Self, Error> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        Self::connect(options)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self, Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        Self::connect(options)
    }

    fn connect(options: SqliteConnectOptions) -> Result<Self, Error> {
        let runtime = Runtime::new()?;
        let pool = runtime.block_on(async {
            // A single long-lived connection; an in-memory database would
            // vanish with its connection otherwise.
            let pool = SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?;
            sqlx::raw_sql(SCHEMA).execute(&pool).await?;
            Ok::<_, sqlx::Error>(pool)
        })?;
        Ok(Self { runtime, pool })
    }

    fn vehicle_from_row(row: &SqliteRow) -> Result<Vehicle, Error> {
        Ok(Vehicle {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            gross_weight_t: row.try_get("gross_weight_t")?,
            max_payload_t: row.try_get("max_payload_t")?,
            purchase_price_eur: row.try_get("purchase_price_eur")?,
            residual_value_eur: row.try_get("residual_value_eur")?,
            planned_lifetime: row.try_get("planned_lifetime")?,
            insurance_cost_eur: row.try_get("insurance_cost_eur")?,
            vehicle_tax_eur: row.try_get("vehicle_tax_eur")?,
            maintenance_cost_eur: row.try_get("maintenance_cost_eur")?,
            toll_cost_eur: row.try_get("toll_cost_eur")?,
            annual_mileage_km: row.try_get("annual_mileage_km")?,
            registered_at: parse_timestamp(&row.try_get::<String, _>("registered_at")?)?,
        })
    }

    fn route_from_row(row: &SqliteRow) -> Result<Route, Error> {
        Ok(Route {
            vehicle_id: row.try_get("vehicle_id")?,
            distance_km: row.try_get("distance_km")?,
            load_t: row.try_get("load_t")?,
            consumption_per_100km: row.try_get("consumption_per_100km")?,
            shift_times: row.try_get("shift_times")?,
            depot_idle_hours: row.try_get("depot_idle_hours")?,
            depot_location: row.try_get("depot_location")?,
            created_at: parse_timestamp(&row.try_get::<String, _>("created_at")?)?,
        })
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::InvalidInput(format!("bad timestamp '{raw}': {e}")))
}

impl VehicleRepository for SqliteFleetStore {
    fn save_vehicle(&mut self, vehicle: &Vehicle) -> Result<String, Error> {
        self.runtime.block_on(async {
            sqlx::query(
                "INSERT INTO vehicles (id, name, gross_weight_t, max_payload_t, \
                 purchase_price_eur, residual_value_eur, planned_lifetime, \
                 insurance_cost_eur, vehicle_tax_eur, maintenance_cost_eur, \
                 toll_cost_eur, annual_mileage_km, registered_at) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
                 ON CONFLICT(id) DO NOTHING",
            )
            .bind(&vehicle.id)
            .bind(&vehicle.name)
            .bind(vehicle.gross_weight_t)
            .bind(vehicle.max_payload_t)
            .bind(vehicle.purchase_price_eur)
            .bind(vehicle.residual_value_eur)
            .bind(vehicle.planned_lifetime)
            .bind(vehicle.insurance_cost_eur)
            .bind(vehicle.vehicle_tax_eur)
            .bind(vehicle.maintenance_cost_eur)
            .bind(vehicle.toll_cost_eur)
            .bind(vehicle.annual_mileage_km)
            .bind(vehicle.registered_at.to_rfc3339())
            .execute(&self.pool)
            .await
        })?;
        Ok(vehicle.id.clone())
    }

    fn find_vehicle(&self, id: &str) -> Result<Option<Vehicle>, Error> {
        let row = self.runtime.block_on(async {
            sqlx::query("SELECT * FROM vehicles WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
        })?;
        row.as_ref().map(Self::vehicle_from_row).transpose()
    }

    fn find_all_vehicles(&self) -> Result<Vec<Vehicle>, Error> {
        let rows = self.runtime.block_on(async {
            sqlx::query("SELECT * FROM vehicles ORDER BY registered_at, name")
                .fetch_all(&self.pool)
                .await
        })?;
        rows.iter().map(Self::vehicle_from_row).collect()
    }

    fn remove_vehicle(&mut self, id: &str) -> Result<bool, Error> {
        let result = self.runtime.block_on(async {
            sqlx::query("DELETE FROM vehicles WHERE id = ?")
                .bind(id)
                .execute(&self.pool)
                .await
        })?;
        Ok(result.rows_affected() > 0)
    }
}

impl RouteRepository for SqliteFleetStore {
    fn save_route(&mut self, route: &Route) -> Result<(), Error> {
        self.runtime.block_on(async {
            sqlx::query(
                "INSERT INTO routes (vehicle_id, distance_km, load_t, \
                 consumption_per_100km, shift_times, depot_idle_hours, \
                 depot_location, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&route.vehicle_id)
            .bind(route.distance_km)
            .bind(route.load_t)
            .bind(route.consumption_per_100km)
            .bind(&route.shift_times)
            .bind(route.depot_idle_hours)
            .bind(&route.depot_location)
            .bind(route.created_at.to_rfc3339())
            .execute(&self.pool)
            .await
        })?;
        Ok(())
    }

    fn find_routes(&self, vehicle_id: Option<&str>) -> Result<Vec<Route>, Error> {
        let rows = self.runtime.block_on(async {
            match vehicle_id {
                Some(id) => {
                    sqlx::query("SELECT * FROM routes WHERE vehicle_id = ? ORDER BY id")
                        .bind(id)
                        .fetch_all(&self.pool)
                        .await
                }
                None => {
                    sqlx::query("SELECT * FROM routes ORDER BY id")
                        .fetch_all(&self.pool)
                        .await
                }
            }
        })?;
        rows.iter().map(Self::route_from_row).collect()
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
            max_payload_t: 24.0,
            purchase_price_eur: 95_000.0,
            residual_value_eur: 20_000.0,
            planned_lifetime: 8.0,
            insurance_cost_eur: 4200.0,
            vehicle_tax_eur: 556.0,
            maintenance_cost_eur: 7500.0,
            toll_cost_eur: 12_000.0,
            annual_mileage_km: None,
        })
    }

    #[test]
    fn round_trips_vehicle_fields() {
        let mut store = SqliteFleetStore::open_in_memory().unwrap();
        let v = vehicle("Mercedes Actros");
        store.save_vehicle(&v).unwrap();

        let found = store.find_vehicle(&v.id).unwrap().unwrap();
        assert_eq!(found.name, v.name);
        assert_eq!(found.maintenance_cost_eur, v.maintenance_cost_eur);
        assert_eq!(found.annual_mileage_km, None);
        assert_eq!(
            found.registered_at.timestamp_millis(),
            v.registered_at.timestamp_millis()
        );
    }

    #[test]
    fn duplicate_id_insert_is_a_no_op() {
        let mut store = SqliteFleetStore::open_in_memory().unwrap();
        let v = vehicle("eActros 600");
        store.save_vehicle(&v).unwrap();

        let mut renamed = v.clone();
        renamed.name = "umbenannt".to_string();
        store.save_vehicle(&renamed).unwrap();

        // ON CONFLICT DO NOTHING keeps the first write
        let found = store.find_vehicle(&v.id).unwrap().unwrap();
        assert_eq!(found.name, "eActros 600");
        assert_eq!(store.find_all_vehicles().unwrap().len(), 1);
    }

    #[test]
    fn routes_filter_by_vehicle() {
        let mut store = SqliteFleetStore::open_in_memory().unwrap();
        let a = vehicle("A");
        let b = vehicle("B");
        store.save_vehicle(&a).unwrap();
        store.save_vehicle(&b).unwrap();

        let mut route = Route::new(a.id.clone(), 420.0, 22.0, 31.0);
        route.depot_location = Some("Hamburg".to_string());
        store.save_route(&route).unwrap();
        store.save_route(&Route::new(b.id.clone(), 80.0, 10.0, 24.0)).unwrap();

        let only_a = store.find_routes(Some(&a.id)).unwrap();
        assert_eq!(only_a.len(), 1);
        assert_eq!(only_a[0].depot_location.as_deref(), Some("Hamburg"));
        assert_eq!(store.find_routes(None).unwrap().len(), 2);
    }

    #[test]
    fn remove_vehicle_reports_existence() {
        let mut store = SqliteFleetStore::open_in_memory().unwrap();
        let v = vehicle("Ford F-Max");
        store.save_vehicle(&v).unwrap();

        assert!(store.remove_vehicle(&v.id).unwrap());
        assert!(!store.remove_vehicle(&v.id).unwrap());
    }
}
