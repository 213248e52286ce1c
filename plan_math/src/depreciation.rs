//! Budget depreciation curves
//!
//! A recurring amount decays geometrically from a start week onwards and never
//! drops below a floor. Weeks before the start week pay the full amount.

use serde::{Deserialize, Serialize};

use crate::percent::clamp_percentage;
use crate::{ensure_finite, MathError, Result};

/// Geometric decay schedule for a recurring weekly amount
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepreciationCurve {
    start_week: u32,
    rate_percent: f64,
    floor: f64,
}

impl DepreciationCurve {
    /// Create a new depreciation curve.
    ///
    /// The weekly rate is a percentage and is clamped to `[0, 100]`; a
    /// negative floor is treated as zero.
    pub fn new(start_week: u32, rate_percent: f64, floor: f64) -> Result<Self> {
        ensure_finite("depreciation rate", rate_percent)?;
        ensure_finite("depreciation floor", floor)?;

        if start_week == 0 {
            return Err(MathError::InvalidWeek(start_week));
        }

        Ok(Self {
            start_week,
            rate_percent: clamp_percentage(rate_percent),
            floor: floor.max(0.0),
        })
    }

    pub fn start_week(&self) -> u32 {
        self.start_week
    }

    pub fn rate_percent(&self) -> f64 {
        self.rate_percent
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }

    /// Decay multiplier for a 1-based week (1.0 before the start week)
    pub fn factor_at(&self, week: u32) -> f64 {
        if week < self.start_week {
            return 1.0;
        }

        (1.0 - self.rate_percent / 100.0).powi((week - self.start_week) as i32)
    }

    /// Depreciated amount for a week.
    ///
    /// The floor never lifts an amount above its undepreciated base, so a base
    /// of zero stays zero.
    pub fn apply(&self, base: f64, week: u32) -> f64 {
        if week < self.start_week {
            return base;
        }

        let depreciated = base * self.factor_at(week);
        depreciated.max(self.floor.min(base))
    }
}
