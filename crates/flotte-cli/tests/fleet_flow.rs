//! End-to-end flow over the application layer: register vehicles and routes,
//! analyze, export, reopen the durable store.

use flotte_app::app::FleetService;
use flotte_app::config::Config;
use flotte_app::export::export_to_excel;
use flotte_app::repository::open_fleet_store;
use flotte_domain::model::{Route, VehicleData};
use flotte_domain::service::CostParameters;
use flotte_types::StorageBackend;

fn config_for(backend: StorageBackend, dir: &std::path::Path) -> Config {
    Config {
        backend,
        data_dir: Some(dir.to_path_buf()),
        ..Default::default()
    }
}

fn sample_vehicle(name: &str) -> VehicleData {
    VehicleData {
        name: name.to_string(),
        gross_weight_t: 40.0,
        max_payload_t: 25.0,
        purchase_price_eur: 120_000.0,
        residual_value_eur: 30_000.0,
        planned_lifetime: 8.0,
        insurance_cost_eur: 4500.0,
        vehicle_tax_eur: 556.0,
        maintenance_cost_eur: 1000.0,
        toll_cost_eur: 11_000.0,
        annual_mileage_km: Some(100_000.0),
    }
}

#[test]
fn full_flow_on_every_backend() {
    for backend in [
        StorageBackend::Memory,
        StorageBackend::Json,
        StorageBackend::Sqlite,
    ] {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(backend, dir.path());
        let store = open_fleet_store(&config).unwrap();
        let mut service = FleetService::new(store, CostParameters::default());

        let outcome = service.register_vehicle(sample_vehicle("MAN TGX"));
        assert!(outcome.persisted, "{backend}: vehicle not persisted");

        service
            .register_route(Route::new(outcome.id.clone(), 100.0, 20.0, 30.0))
            .unwrap();

        let analyses = service.analyze().unwrap();
        assert_eq!(analyses.len(), 1, "{backend}");
        assert!((analyses[0].costs.energy_cost_diesel - 51.9).abs() < 1e-9);
        assert!((analyses[0].costs.toll_cost_diesel - 17.6).abs() < 1e-9);
        assert!((analyses[0].costs.energy_cost_electric - 6.3).abs() < 1e-9);
    }
}

#[test]
fn json_backend_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(StorageBackend::Json, dir.path());

    let id = {
        let store = open_fleet_store(&config).unwrap();
        let mut service = FleetService::new(store, CostParameters::default());
        let id = service.register_vehicle(sample_vehicle("Volvo FH")).id;
        service
            .register_route(Route::new(id.clone(), 250.0, 18.0, 28.0))
            .unwrap();
        id
    };

    let store = open_fleet_store(&config).unwrap();
    let service = FleetService::new(store, CostParameters::default());
    let vehicles = service.vehicles();
    assert_eq!(vehicles.len(), 1);
    assert_eq!(vehicles[0].id, id);
    assert_eq!(vehicles[0].name, "Volvo FH");
    assert_eq!(vehicles[0].annual_mileage_km, Some(100_000.0));
    assert_eq!(service.routes(Some(&id)).len(), 1);
}

#[test]
fn compare_report_exports() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(StorageBackend::Memory, dir.path());
    let store = open_fleet_store(&config).unwrap();
    let mut service = FleetService::new(store, CostParameters::default());

    let id = service.register_vehicle(sample_vehicle("MAN TGX")).id;
    service
        .register_route(Route::new(id, 100.0, 20.0, 30.0))
        .unwrap();

    let analyses = service.analyze().unwrap();
    let path = dir.path().join("bericht.xlsx");
    export_to_excel(&analyses, service.params(), &path).unwrap();
    assert!(path.exists());
}
