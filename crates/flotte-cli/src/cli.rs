//! CLI definition using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use flotte_types::{OutputFormat, StorageBackend};

#[derive(Parser)]
#[command(name = "flotten-rechner")]
#[command(version)]
#[command(about = "Diesel vs. electric truck fleet cost comparison")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Storage backend (memory, json, sqlite). Uses config value if not specified.
    #[arg(long, global = true)]
    pub backend: Option<StorageBackend>,

    /// Data directory override
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Cost parameter TOML file for this run
    #[arg(long, global = true)]
    pub costs: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage fleet vehicles
    Vehicle {
        #[command(subcommand)]
        command: VehicleCommands,
    },

    /// Manage routes
    Route {
        #[command(subcommand)]
        command: RouteCommands,
    },

    /// Cost comparison for every (vehicle, route) pair
    Compare {
        /// Restrict to one vehicle id
        #[arg(long)]
        vehicle: Option<String>,

        /// Write an Excel report instead of printing
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Import vehicles from a CSV file
    Import {
        /// Path to CSV file
        csv: PathBuf,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set default storage backend
        #[arg(long)]
        set_backend: Option<StorageBackend>,

        /// Set default output format
        #[arg(long)]
        set_format: Option<OutputFormat>,

        /// Set data directory
        #[arg(long)]
        set_data_dir: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum VehicleCommands {
    /// Register a new vehicle
    Add {
        /// Fahrzeugname
        #[arg(long)]
        name: String,

        /// Zulässiges Gesamtgewicht [t]
        #[arg(long)]
        gross_weight: f64,

        /// Maximale Zuladung [t]
        #[arg(long)]
        max_payload: f64,

        /// Kaufpreis [EUR]
        #[arg(long)]
        purchase_price: f64,

        /// Prognostizierter Restwert [EUR]
        #[arg(long)]
        residual_value: f64,

        /// Geplante Laufzeit [km oder Jahre]
        #[arg(long)]
        lifetime: f64,

        /// Versicherungskosten, jährlich [EUR]
        #[arg(long)]
        insurance: f64,

        /// Kraftfahrzeugsteuer, jährlich [EUR]
        #[arg(long)]
        tax: f64,

        /// Wartungskosten, jährlich [EUR]
        #[arg(long)]
        maintenance: f64,

        /// Mautkosten, jährlich [EUR]
        #[arg(long)]
        toll: f64,

        /// Jährliche Fahrleistung [km]; defaults to the configured value
        #[arg(long)]
        annual_mileage: Option<f64>,
    },

    /// List registered vehicles
    List,

    /// Remove a vehicle by id
    Remove {
        /// Vehicle identifier
        id: String,
    },
}

#[derive(Subcommand)]
pub enum RouteCommands {
    /// Register a new route for a vehicle
    Add {
        /// Vehicle identifier
        #[arg(long)]
        vehicle: String,

        /// Strecke [km]
        #[arg(long)]
        distance: f64,

        /// Beladung [t]
        #[arg(long)]
        load: f64,

        /// Verbrauch [kWh bzw. l / 100 km]
        #[arg(long)]
        consumption: f64,

        /// Schichtzeiten
        #[arg(long)]
        shift_times: Option<String>,

        /// Standzeiten am Depot [h]
        #[arg(long)]
        depot_idle: Option<f64>,

        /// Depot Standort
        #[arg(long)]
        depot_location: Option<String>,
    },

    /// List routes
    List {
        /// Restrict to one vehicle id
        #[arg(long)]
        vehicle: Option<String>,
    },
}
