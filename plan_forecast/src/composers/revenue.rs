//! Revenue composition across the four streams

use crate::model::{RevenueBreakdown, RevenueMetrics};

/// Turns visitor volume into per-stream revenue.
///
/// Each stream earns `visitors * rate * conversion_rate`. Rates and
/// conversions are expected to be non-negative; that is validated by the
/// caller, not here.
#[derive(Debug, Clone)]
pub struct RevenueComposer {
    metrics: RevenueMetrics,
}

impl RevenueComposer {
    pub fn new(metrics: &RevenueMetrics) -> Self {
        Self {
            metrics: metrics.clone(),
        }
    }

    pub fn metrics(&self) -> &RevenueMetrics {
        &self.metrics
    }

    /// Revenue per stream for a week with the given visitor volume
    pub fn compose(&self, visitors: f64) -> RevenueBreakdown {
        RevenueBreakdown {
            ticket: visitors * self.metrics.ticket.per_visitor(),
            food_and_beverage: visitors * self.metrics.food_and_beverage.per_visitor(),
            merchandise: visitors * self.metrics.merchandise.per_visitor(),
            digital: visitors * self.metrics.digital.per_visitor(),
        }
    }
}
