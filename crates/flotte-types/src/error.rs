//! Error types for flotten-rechner

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("CSV import error: {0}")]
    CsvImport(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown vehicle: {0}")]
    UnknownVehicle(String),

    #[error("No vehicle or route data available")]
    NoData,

    #[error("Excel export error: {0}")]
    Excel(String),
}

pub type Result<T> = std::result::Result<T, Error>;
