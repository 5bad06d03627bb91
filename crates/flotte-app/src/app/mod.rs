//! Use cases

mod fleet_service;

pub use fleet_service::{FleetService, SaveOutcome};
