//! Storage backends
//!
//! Each backend implements the repository traits from `flotte-domain`; the
//! application layer picks one and works against `dyn FleetRepository`.

mod json;
mod memory;
mod sqlite;

pub use json::JsonFleetStore;
pub use memory::MemoryFleetStore;
pub use sqlite::SqliteFleetStore;

use flotte_domain::model::Vehicle;

/// Listing order shared by all backends: registration time, then name
pub(crate) fn sort_vehicles(vehicles: &mut [Vehicle]) {
    vehicles.sort_by(|a, b| {
        a.registered_at
            .cmp(&b.registered_at)
            .then_with(|| a.name.cmp(&b.name))
    });
}
