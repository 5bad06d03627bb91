//! Output formatting module

use flotte_domain::model::{Route, Vehicle};
use flotte_domain::service::{CostParameters, RouteAnalysis};
use flotte_types::{OutputFormat, Result};

fn format_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "-".to_string(),
    }
}

pub fn print_vehicles(format: OutputFormat, vehicles: &[Vehicle]) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(vehicles)?);
        return Ok(());
    }

    if vehicles.is_empty() {
        println!("Keine Fahrzeuge vorhanden.");
        return Ok(());
    }

    println!("\nFahrzeuge ({})", vehicles.len());
    println!("{}", "-".repeat(100));
    println!(
        "{:<38} {:<20} {:>6} {:>8} {:>12} {:>12}",
        "ID", "Name", "zGG t", "Zul. t", "Wartung €/a", "Fahrl. km/a"
    );
    for vehicle in vehicles {
        println!(
            "{:<38} {:<20} {:>6.1} {:>8.1} {:>12.2} {:>12}",
            vehicle.id,
            vehicle.name,
            vehicle.gross_weight_t,
            vehicle.max_payload_t,
            vehicle.maintenance_cost_eur,
            vehicle
                .annual_mileage_km
                .map(|v| format!("{:.0}", v))
                .unwrap_or_else(|| "-".to_string()),
        );
    }
    Ok(())
}

pub fn print_routes(format: OutputFormat, routes: &[Route]) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(routes)?);
        return Ok(());
    }

    if routes.is_empty() {
        println!("Keine Routen vorhanden.");
        return Ok(());
    }

    println!("\nRouten ({})", routes.len());
    println!("{}", "-".repeat(90));
    println!(
        "{:<38} {:>10} {:>10} {:>14} {:<15}",
        "Fahrzeug", "km", "Beladung t", "Verbr./100km", "Depot"
    );
    for route in routes {
        println!(
            "{:<38} {:>10.1} {:>10.1} {:>14.1} {:<15}",
            route.vehicle_id,
            route.distance_km,
            route.load_t,
            route.consumption_per_100km,
            route.depot_location.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}

pub fn print_analyses(
    format: OutputFormat,
    analyses: &[RouteAnalysis],
    params: &CostParameters,
) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(analyses)?);
        return Ok(());
    }

    if analyses.is_empty() {
        println!("Keine Routen gefunden.");
        return Ok(());
    }

    for analysis in analyses {
        println!("\nFahrzeug: {}", analysis.vehicle.name);
        println!(
            "Route: {} km, Beladung {} t, Verbrauch {} /100km",
            analysis.route.distance_km, analysis.route.load_t, analysis.route.consumption_per_100km
        );
        println!("{}", "=".repeat(78));
        println!(
            "{:<32} {:>14} {:>14} {:<14}",
            "Parameter", "E-Lkw", "Diesel-Lkw", "Einheit"
        );
        println!("{}", "-".repeat(78));
        for row in analysis.costs.rows(params) {
            println!(
                "{:<32} {:>14} {:>14} {:<14}",
                row.label,
                format_opt(row.electric),
                format_opt(row.diesel),
                row.unit
            );
        }
    }
    Ok(())
}
