//! Flotten-Rechner - diesel vs. electric truck cost comparison
//!
//! A CLI tool that manages fleet vehicle and route data and derives the
//! operating cost comparison per route.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
