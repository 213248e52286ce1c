//! Compounding growth curves
//!
//! A growth curve starts at a base volume in week 1 and compounds by a fixed
//! weekly rate: `volume(w) = base * (1 + rate)^(w - 1)`.

use serde::{Deserialize, Serialize};

use crate::{ensure_finite, MathError, Result};

/// Weekly compounding growth from a base volume
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthCurve {
    base: f64,
    rate: f64,
}

impl GrowthCurve {
    /// Create a new growth curve.
    ///
    /// `rate` is a fraction (0.05 for 5% per week). The base must be
    /// non-negative and the rate may not fall below -1 (a loss of more than
    /// the whole volume in one week).
    pub fn new(base: f64, rate: f64) -> Result<Self> {
        ensure_finite("base volume", base)?;
        ensure_finite("growth rate", rate)?;

        if base < 0.0 {
            return Err(MathError::InvalidInput(format!(
                "Base volume must be non-negative, got {}",
                base
            )));
        }

        if rate < -1.0 {
            return Err(MathError::InvalidInput(format!(
                "Growth rate cannot be below -100%, got {}",
                rate
            )));
        }

        Ok(Self { base, rate })
    }

    /// Create a growth curve from a percentage rate (5.0 for 5% per week)
    pub fn from_percent(base: f64, rate_percent: f64) -> Result<Self> {
        Self::new(base, rate_percent / 100.0)
    }

    /// Base volume in week 1
    pub fn base(&self) -> f64 {
        self.base
    }

    /// Weekly rate as a fraction
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Growth multiplier for a 1-based week index
    pub fn factor_at(&self, week: u32) -> Result<f64> {
        if week == 0 {
            return Err(MathError::InvalidWeek(week));
        }

        // Week 1 is always the unscaled base.
        Ok((1.0 + self.rate).powi(week as i32 - 1))
    }

    /// Unrounded volume for a 1-based week index
    pub fn value_at(&self, week: u32) -> Result<f64> {
        Ok(self.base * self.factor_at(week)?)
    }

    /// Volume rounded to a whole count. Steep decay may round to zero.
    pub fn volume_at(&self, week: u32) -> Result<f64> {
        Ok(self.value_at(week)?.round())
    }

    /// Rounded volumes for weeks `1..=horizon`
    pub fn project(&self, horizon: u32) -> Vec<f64> {
        (1..=horizon)
            .map(|week| (self.base * (1.0 + self.rate).powi(week as i32 - 1)).round())
            .collect()
    }
}
