//! # Plan Math
//!
//! Numeric building blocks for weekly business-plan projections.
//! This crate knows nothing about products, scenarios or actuals; it provides
//! the closed-form arithmetic the forecasting crate composes:
//!
//! - Compounding growth curves
//! - Budget depreciation curves with a floor
//! - Percentage helpers (modifiers, zero-safe percent change, clamping)

use thiserror::Error;

pub mod depreciation;
pub mod growth;
pub mod percent;

pub use depreciation::DepreciationCurve;
pub use growth::GrowthCurve;
pub use percent::{apply_modifier, clamp_percentage, percent_change, safe_ratio};

/// Errors that can occur in plan calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Week index must be at least 1, got {0}")]
    InvalidWeek(u32),
}

/// Result type for plan math operations
pub type Result<T> = std::result::Result<T, MathError>;

/// Reject NaN and infinite inputs before they reach any arithmetic.
pub(crate) fn ensure_finite(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(MathError::InvalidInput(format!(
            "{} must be a finite number, got {}",
            name, value
        )))
    }
}
