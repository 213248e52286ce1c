//! Forecast generation
//!
//! The engine walks weeks `1..=horizon`, projects visitors, composes revenue
//! and costs for each week and keeps a running cumulative profit. Generation
//! is a pure function of its inputs: identical inputs always produce an
//! identical sequence, which callers rely on to detect changes before saving.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::composers::{CostComposer, GrowthProjector, RevenueComposer};
use crate::data::PlanInputs;
use crate::error::{ForecastError, Result};
use crate::model::{CostBreakdown, ProductInfo, RevenueBreakdown, WeeklyProjection};

/// Builds weekly projections for one product
#[derive(Debug, Clone)]
pub struct ForecastEngine {
    product: ProductInfo,
    growth: GrowthProjector,
    revenue: RevenueComposer,
    costs: CostComposer,
}

impl ForecastEngine {
    /// Create an engine from a complete set of plan inputs.
    ///
    /// Missing growth, revenue or cost records are replaced by their zero
    /// defaults. A horizon of zero weeks is rejected.
    pub fn new(inputs: &PlanInputs) -> Result<Self> {
        let product = inputs.product.clone();
        if product.forecast_weeks == 0 {
            return Err(ForecastError::InvalidHorizon(product.forecast_weeks));
        }

        let growth = inputs.growth.clone().unwrap_or_default();
        let revenue = inputs.revenue.clone().unwrap_or_default();
        let costs = inputs.costs.clone().unwrap_or_default();

        Ok(Self {
            growth: GrowthProjector::new(&product, &growth)?,
            costs: CostComposer::new(&product, &costs, revenue.merchandise.rate)?,
            revenue: RevenueComposer::new(&revenue),
            product,
        })
    }

    pub fn product(&self) -> &ProductInfo {
        &self.product
    }

    pub fn horizon(&self) -> u32 {
        self.product.forecast_weeks
    }

    pub fn growth(&self) -> &GrowthProjector {
        &self.growth
    }

    /// Generate the full ordered sequence of weekly projections
    pub fn generate(&self) -> Forecast {
        let horizon = self.horizon();
        debug!(
            product = %self.product.name,
            horizon,
            mode = ?self.product.forecast_mode,
            "generating forecast"
        );

        let mut weeks = Vec::with_capacity(horizon as usize);
        let mut cumulative_profit = 0.0;

        for (week, visitors) in (1..=horizon).zip(self.growth.project(horizon)) {
            let revenue = self.revenue.compose(visitors);
            let costs = self.costs.compose(week, &revenue);
            let projection =
                WeeklyProjection::from_components(week, visitors, revenue, costs, cumulative_profit);
            cumulative_profit = projection.cumulative_profit;
            weeks.push(projection);
        }

        Forecast { weeks }
    }
}

/// Generate a forecast in one call
pub fn generate_forecast(inputs: &PlanInputs) -> Result<Forecast> {
    Ok(ForecastEngine::new(inputs)?.generate())
}

/// An ordered sequence of weekly projections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    weeks: Vec<WeeklyProjection>,
}

impl Forecast {
    pub fn weeks(&self) -> &[WeeklyProjection] {
        &self.weeks
    }

    pub fn into_weeks(self) -> Vec<WeeklyProjection> {
        self.weeks
    }

    pub fn horizon(&self) -> u32 {
        self.weeks.len() as u32
    }

    /// Projection for a 1-based week index
    pub fn week(&self, week: u32) -> Option<&WeeklyProjection> {
        week.checked_sub(1).and_then(|i| self.weeks.get(i as usize))
    }

    pub fn final_cumulative_profit(&self) -> f64 {
        self.weeks.last().map_or(0.0, |w| w.cumulative_profit)
    }

    /// First week whose cumulative profit is non-negative
    pub fn break_even_week(&self) -> Option<u32> {
        break_even_week(&self.weeks)
    }

    pub fn summary(&self) -> ForecastSummary {
        ForecastSummary::from_weeks(&self.weeks)
    }
}

fn break_even_week(weeks: &[WeeklyProjection]) -> Option<u32> {
    weeks
        .iter()
        .find(|w| w.cumulative_profit >= 0.0)
        .map(|w| w.week)
}

/// Totals over a sequence of projections
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSummary {
    pub weeks: u32,
    pub total_visitors: f64,
    pub total_revenue: f64,
    pub total_cost: f64,
    pub total_profit: f64,
    pub final_cumulative_profit: f64,
    pub average_weekly_profit: f64,
    pub break_even_week: Option<u32>,
    pub revenue_by_stream: RevenueBreakdown,
    pub cost_by_source: CostBreakdown,
}

impl ForecastSummary {
    pub fn from_weeks(weeks: &[WeeklyProjection]) -> Self {
        let mut summary = weeks.iter().fold(Self::default(), |mut acc, w| {
            acc.total_visitors += w.visitors;
            acc.total_revenue += w.total_revenue;
            acc.total_cost += w.total_cost;
            acc.total_profit += w.weekly_profit;
            acc.revenue_by_stream = acc.revenue_by_stream.add(&w.revenue);
            acc.cost_by_source = acc.cost_by_source.add(&w.costs);
            acc
        });

        summary.weeks = weeks.len() as u32;
        summary.final_cumulative_profit = weeks.last().map_or(0.0, |w| w.cumulative_profit);
        summary.average_weekly_profit = if weeks.is_empty() {
            0.0
        } else {
            summary.total_profit / weeks.len() as f64
        };
        summary.break_even_week = break_even_week(weeks);
        summary
    }
}

impl std::fmt::Display for ForecastSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Forecast Summary ({} weeks):", self.weeks)?;
        writeln!(f, "  Visitors:          {:.0}", self.total_visitors)?;
        writeln!(f, "  Revenue:           {:.2}", self.total_revenue)?;
        writeln!(f, "  Cost:              {:.2}", self.total_cost)?;
        writeln!(f, "  Profit:            {:.2}", self.total_profit)?;
        writeln!(f, "  Avg weekly profit: {:.2}", self.average_weekly_profit)?;
        match self.break_even_week {
            Some(week) => writeln!(f, "  Break-even week:   {}", week)?,
            None => writeln!(f, "  Break-even week:   never")?,
        }
        Ok(())
    }
}
