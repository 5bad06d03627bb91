//! Domain services

pub mod cost;

pub use cost::{
    analyze_fleet, calculate_costs, CostComparison, CostParameters, CostRow, RouteAnalysis,
};
