//! Command handlers

use flotte_app::app::FleetService;
use flotte_app::config::{load_cost_parameters, Config};
use flotte_app::export::export_to_excel;
use flotte_app::repository::open_fleet_store;
use flotte_domain::model::{Route, VehicleData};
use flotte_infra::csv_import::load_vehicles_from_csv;
use flotte_types::{OutputFormat, Result};

use crate::cli::{Cli, Commands, RouteCommands, VehicleCommands};
use crate::output;

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    // Load config, then apply CLI overrides
    let mut config = Config::load()?;

    if let Some(backend) = cli.backend {
        config.backend = backend;
    }
    if let Some(ref data_dir) = cli.data_dir {
        config.data_dir = Some(data_dir.clone());
    }
    if let Some(format) = cli.format {
        config.output_format = format;
    }
    if let Some(ref costs_path) = cli.costs {
        config.costs = load_cost_parameters(costs_path)?;
    }
    let format = config.output_format;

    if let Commands::Config {
        show,
        set_backend,
        set_format,
        set_data_dir,
    } = cli.command
    {
        return handle_config(config, show, set_backend, set_format, set_data_dir);
    }

    let store = open_fleet_store(&config)?;
    let mut service = FleetService::new(store, config.costs.clone());

    match cli.command {
        Commands::Vehicle { command } => handle_vehicle(&mut service, command, format),
        Commands::Route { command } => handle_route(&mut service, command, format),
        Commands::Compare { vehicle, output } => {
            let mut analyses = service.analyze()?;
            if let Some(ref id) = vehicle {
                analyses.retain(|a| &a.vehicle.id == id);
            }
            if let Some(ref path) = output {
                export_to_excel(&analyses, service.params(), path)?;
                println!("Bericht geschrieben: {}", path.display());
            } else {
                output::print_analyses(format, &analyses, service.params())?;
            }
            Ok(())
        }
        Commands::Import { csv } => {
            let vehicles = load_vehicles_from_csv(&csv)?;
            let total = vehicles.len();
            let mut persisted = 0;
            for vehicle in vehicles {
                let outcome = service.register_vehicle_record(vehicle);
                if outcome.persisted {
                    persisted += 1;
                } else if let Some(message) = outcome.message {
                    eprintln!("Warnung: {}", message);
                }
            }
            println!("{persisted}/{total} Fahrzeuge importiert");
            Ok(())
        }
        Commands::Config { .. } => unreachable!("handled above"),
    }
}

fn handle_config(
    mut config: Config,
    show: bool,
    set_backend: Option<flotte_types::StorageBackend>,
    set_format: Option<OutputFormat>,
    set_data_dir: Option<std::path::PathBuf>,
) -> Result<()> {
    let mut changed = false;

    if let Some(backend) = set_backend {
        config.backend = backend;
        changed = true;
    }
    if let Some(format) = set_format {
        config.output_format = format;
        changed = true;
    }
    if let Some(data_dir) = set_data_dir {
        config.data_dir = Some(data_dir);
        changed = true;
    }

    if changed {
        config.save()?;
        println!("Konfiguration gespeichert");
    }

    if show || !changed {
        println!("backend:       {}", config.backend);
        println!("output_format: {}", config.output_format);
        match config.data_dir {
            Some(ref dir) => println!("data_dir:      {}", dir.display()),
            None => println!("data_dir:      (Standard: {})", config.data_dir()?.display()),
        }
        println!("\n[costs]");
        let costs = toml::to_string(&config.costs)
            .map_err(|e| flotte_types::Error::InvalidInput(e.to_string()))?;
        print!("{costs}");
    }

    Ok(())
}

fn handle_vehicle(
    service: &mut FleetService,
    command: VehicleCommands,
    format: OutputFormat,
) -> Result<()> {
    match command {
        VehicleCommands::Add {
            name,
            gross_weight,
            max_payload,
            purchase_price,
            residual_value,
            lifetime,
            insurance,
            tax,
            maintenance,
            toll,
            annual_mileage,
        } => {
            let outcome = service.register_vehicle(VehicleData {
                name,
                gross_weight_t: gross_weight,
                max_payload_t: max_payload,
                purchase_price_eur: purchase_price,
                residual_value_eur: residual_value,
                planned_lifetime: lifetime,
                insurance_cost_eur: insurance,
                vehicle_tax_eur: tax,
                maintenance_cost_eur: maintenance,
                toll_cost_eur: toll,
                annual_mileage_km: annual_mileage,
            });
            println!("Fahrzeug gespeichert: {}", outcome.id);
            if let Some(message) = outcome.message {
                eprintln!("Warnung: {}", message);
            }
            Ok(())
        }
        VehicleCommands::List => output::print_vehicles(format, &service.vehicles()),
        VehicleCommands::Remove { id } => {
            if service.remove_vehicle(&id)? {
                println!("Fahrzeug gelöscht: {}", id);
            } else {
                println!("Fahrzeug nicht gefunden: {}", id);
            }
            Ok(())
        }
    }
}

fn handle_route(
    service: &mut FleetService,
    command: RouteCommands,
    format: OutputFormat,
) -> Result<()> {
    match command {
        RouteCommands::Add {
            vehicle,
            distance,
            load,
            consumption,
            shift_times,
            depot_idle,
            depot_location,
        } => {
            let mut route = Route::new(vehicle, distance, load, consumption);
            route.shift_times = shift_times;
            route.depot_idle_hours = depot_idle;
            route.depot_location = depot_location;

            let outcome = service.register_route(route)?;
            println!("Route gespeichert für Fahrzeug {}", outcome.id);
            if let Some(message) = outcome.message {
                eprintln!("Warnung: {}", message);
            }
            Ok(())
        }
        RouteCommands::List { vehicle } => {
            output::print_routes(format, &service.routes(vehicle.as_deref()))
        }
    }
}
