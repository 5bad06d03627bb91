//! CSV import for vehicle data
//!
//! Expected header (column order free):
//! name,gross_weight_t,max_payload_t,purchase_price_eur,residual_value_eur,
//! planned_lifetime,insurance_cost_eur,vehicle_tax_eur,maintenance_cost_eur,
//! toll_cost_eur[,annual_mileage_km]

use std::path::Path;

use flotte_domain::model::{Vehicle, VehicleData};
use flotte_types::{Error, Result};

/// Load vehicles from a CSV file; each row gets a freshly generated id
pub fn load_vehicles_from_csv(path: &Path) -> Result<Vec<Vehicle>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| Error::CsvImport(format!("failed to open {}: {}", path.display(), e)))?;

    let mut vehicles = Vec::new();
    for (index, record) in reader.deserialize::<VehicleData>().enumerate() {
        let data = record.map_err(|e| Error::CsvImport(format!("row {}: {}", index + 2, e)))?;
        if data.name.is_empty() {
            return Err(Error::CsvImport(format!("row {}: empty vehicle name", index + 2)));
        }
        vehicles.push(Vehicle::new(data));
    }

    if vehicles.is_empty() {
        return Err(Error::CsvImport("no vehicle rows found".to_string()));
    }
    Ok(vehicles)
}
