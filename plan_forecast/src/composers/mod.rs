//! Per-week building blocks composed by the forecast engine

pub mod costs;
pub mod growth;
pub mod revenue;

pub use costs::{CostComposer, CostContext, CostSource};
pub use growth::GrowthProjector;
pub use revenue::RevenueComposer;
