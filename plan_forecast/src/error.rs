//! Error types for the plan_forecast crate

use plan_math::MathError;
use thiserror::Error;
use uuid::Uuid;

/// Custom error types for the plan_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// The forecast horizon must be at least one week
    #[error("Invalid forecast horizon: {0} weeks (must be positive)")]
    InvalidHorizon(u32),

    /// A week index outside `1..=horizon`
    #[error("Week {week} is outside the forecast horizon of {horizon} weeks")]
    WeekOutOfRange { week: u32, horizon: u32 },

    /// Lookup of a scenario that does not exist
    #[error("Scenario not found: {0}")]
    ScenarioNotFound(Uuid),

    /// Error from the underlying plan arithmetic
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing JSON plan input
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error reading or writing CSV data
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
