//! Domain layer - models, repository traits, cost calculation

pub mod model;
pub mod repository;
pub mod service;
