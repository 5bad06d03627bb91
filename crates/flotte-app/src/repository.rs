//! Store opening and backend dispatch

use flotte_domain::repository::FleetRepository;
use flotte_infra::{JsonFleetStore, MemoryFleetStore, SqliteFleetStore};
use flotte_types::{Result, StorageBackend};

use crate::config::Config;

/// Open the fleet store the configuration selects
pub fn open_fleet_store(config: &Config) -> Result<Box<dyn FleetRepository>> {
    match config.backend {
        StorageBackend::Memory => Ok(Box::new(MemoryFleetStore::new())),
        StorageBackend::Json => {
            let store = JsonFleetStore::open(config.data_dir()?)?;
            Ok(Box::new(store))
        }
        StorageBackend::Sqlite => {
            let dir = config.data_dir()?;
            std::fs::create_dir_all(&dir)?;
            let store = SqliteFleetStore::open(&dir.join("flotte.db"))?;
            Ok(Box::new(store))
        }
    }
}
