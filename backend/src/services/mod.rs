//! Business logic services for the FloodSense Delhi backend

pub mod forecast;
pub mod prediction;
pub mod ward;

pub use forecast::{ConditionTable, ForecastAggregator};
pub use prediction::{FallbackModel, RiskModel, SimulatedModel};
pub use ward::WardRegistry;
