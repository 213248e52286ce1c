//! Visitor volume projection

use crate::error::Result;
use crate::model::{ForecastMode, GrowthMetrics, ProductInfo};
use plan_math::GrowthCurve;

/// Projects weekly visitor volume from a base volume and a compounding rate
#[derive(Debug, Clone)]
pub struct GrowthProjector {
    curve: GrowthCurve,
    events_per_week: f64,
}

impl GrowthProjector {
    /// Build a projector for a product.
    ///
    /// In per-event mode the base volume is `visitors_per_event * events_per_week`.
    /// A negative or non-finite base is treated as zero and the weekly rate
    /// is limited to -100%.
    pub fn new(product: &ProductInfo, growth: &GrowthMetrics) -> Result<Self> {
        let events_per_week = product.effective_events_per_week();
        let base = match product.forecast_mode {
            ForecastMode::PerEvent => growth.visitors_per_event * events_per_week,
            ForecastMode::Continuous => growth.weekly_visitors,
        };

        let base = if base.is_finite() { base.max(0.0) } else { 0.0 };
        let rate = if growth.weekly_growth_rate.is_finite() {
            (growth.weekly_growth_rate / 100.0).max(-1.0)
        } else {
            0.0
        };

        Ok(Self {
            curve: GrowthCurve::new(base, rate)?,
            events_per_week,
        })
    }

    /// Base volume in week 1 before rounding
    pub fn base_volume(&self) -> f64 {
        self.curve.base()
    }

    /// Rounded visitors for a 1-based week
    pub fn visitors(&self, week: u32) -> Result<f64> {
        Ok(self.curve.volume_at(week)?)
    }

    /// Rounded visitors for weeks `1..=horizon`
    pub fn project(&self, horizon: u32) -> Vec<f64> {
        self.curve.project(horizon)
    }

    /// Average visitors per event for display; 0 without events
    pub fn average_per_event(&self, visitors: f64) -> f64 {
        if self.events_per_week > 0.0 {
            (visitors / self.events_per_week).round()
        } else {
            0.0
        }
    }
}
