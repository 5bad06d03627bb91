//! Application service layer - use cases, config, store dispatch, export

pub mod app;
pub mod config;
pub mod export;
pub mod repository;
