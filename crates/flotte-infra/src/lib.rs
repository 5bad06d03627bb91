//! Infrastructure layer - storage backends and import helpers

pub mod csv_import;
pub mod persistence;

pub use persistence::{JsonFleetStore, MemoryFleetStore, SqliteFleetStore};
