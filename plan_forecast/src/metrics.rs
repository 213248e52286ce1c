//! Metrics for evaluating plan performance
//!
//! - Accuracy of projections against recorded actuals
//! - Marketing channel performance from recorded actuals
//! - Cost structure ratios of a forecast

use std::collections::BTreeMap;

use plan_math::safe_ratio;
use serde::{Deserialize, Serialize};

use crate::actuals::{ReconciledForecast, ReconciledWeek, WeeklyActual};
use crate::engine::ForecastSummary;

/// Accuracy of one projected series against the recorded values
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastAccuracy {
    /// Number of recorded weeks compared
    pub weeks: u32,
    /// Mean Absolute Error
    pub mae: f64,
    /// Mean Absolute Percentage Error over weeks with a non-zero actual
    pub mape: f64,
    /// Mean signed error (actual minus projected); positive means the plan
    /// was too pessimistic
    pub bias: f64,
}

/// Calculate accuracy of projected values against actual values.
///
/// Pairs are `(projected, actual)`. Empty input yields all zeros.
pub fn forecast_accuracy(pairs: &[(f64, f64)]) -> ForecastAccuracy {
    if pairs.is_empty() {
        return ForecastAccuracy::default();
    }

    let n = pairs.len() as f64;

    let errors: Vec<f64> = pairs.iter().map(|&(p, a)| a - p).collect();

    let mae = errors.iter().map(|e| e.abs()).sum::<f64>() / n;
    let bias = errors.iter().sum::<f64>() / n;

    let nonzero: Vec<f64> = pairs
        .iter()
        .zip(errors.iter())
        .filter(|((_, a), _)| *a != 0.0)
        .map(|((_, a), e)| e.abs() / a.abs() * 100.0)
        .collect();
    let mape = safe_ratio(nonzero.iter().sum(), nonzero.len() as f64);

    ForecastAccuracy {
        weeks: pairs.len() as u32,
        mae,
        mape,
        bias,
    }
}

/// Accuracy of revenue, expenses and profit over the recorded weeks
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccuracyReport {
    pub revenue: ForecastAccuracy,
    pub expenses: ForecastAccuracy,
    pub profit: ForecastAccuracy,
}

/// Compare every actual-backed week of a reconciled forecast with its projection
pub fn evaluate_actuals(reconciled: &ReconciledForecast) -> AccuracyReport {
    let recorded: Vec<&ReconciledWeek> = reconciled
        .weeks
        .iter()
        .filter(|w| w.is_actual())
        .collect();

    let revenue: Vec<(f64, f64)> = recorded
        .iter()
        .map(|w| (w.projected_revenue, w.revenue))
        .collect();
    let expenses: Vec<(f64, f64)> = recorded
        .iter()
        .map(|w| (w.projected_cost, w.cost))
        .collect();
    let profit: Vec<(f64, f64)> = recorded
        .iter()
        .map(|w| (w.projected_profit, w.profit))
        .collect();

    AccuracyReport {
        revenue: forecast_accuracy(&revenue),
        expenses: forecast_accuracy(&expenses),
        profit: forecast_accuracy(&profit),
    }
}

impl std::fmt::Display for ForecastAccuracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Forecast Accuracy ({} weeks):", self.weeks)?;
        writeln!(f, "  MAE:   {:.4}", self.mae)?;
        writeln!(f, "  MAPE:  {:.4}%", self.mape)?;
        writeln!(f, "  Bias:  {:.4}", self.bias)?;
        Ok(())
    }
}

/// Aggregated performance of one marketing channel
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSummary {
    pub channel: String,
    pub weeks: u32,
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub spend: f64,
    pub revenue: f64,
}

impl ChannelSummary {
    /// Clicks per impression, as a percentage
    pub fn click_through_rate(&self) -> f64 {
        safe_ratio(self.clicks as f64, self.impressions as f64) * 100.0
    }

    /// Conversions per click, as a percentage
    pub fn conversion_rate(&self) -> f64 {
        safe_ratio(self.conversions as f64, self.clicks as f64) * 100.0
    }

    pub fn cost_per_acquisition(&self) -> f64 {
        safe_ratio(self.spend, self.conversions as f64)
    }

    /// Return on ad spend (revenue per unit of spend)
    pub fn return_on_ad_spend(&self) -> f64 {
        safe_ratio(self.revenue, self.spend)
    }
}

/// Sum channel performance across recorded weeks, one entry per channel name
/// in name order
pub fn summarize_channels(actuals: &[WeeklyActual]) -> Vec<ChannelSummary> {
    let mut by_channel: BTreeMap<&str, ChannelSummary> = BTreeMap::new();

    for actual in actuals {
        for perf in &actual.channels {
            let summary = by_channel
                .entry(perf.channel.as_str())
                .or_insert_with(|| ChannelSummary {
                    channel: perf.channel.clone(),
                    ..Default::default()
                });
            summary.weeks += 1;
            summary.impressions += perf.impressions;
            summary.clicks += perf.clicks;
            summary.conversions += perf.conversions;
            summary.spend += perf.spend;
            summary.revenue += perf.revenue;
        }
    }

    by_channel.into_values().collect()
}

/// Share of each cost source in total cost, and marketing relative to revenue.
/// All values are percentages; zero totals give zero shares.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostRatios {
    pub marketing_share: f64,
    pub staffing_share: f64,
    pub event_share: f64,
    pub setup_share: f64,
    pub cogs_share: f64,
    pub marketing_to_revenue: f64,
}

impl CostRatios {
    pub fn from_summary(summary: &ForecastSummary) -> Self {
        let costs = &summary.cost_by_source;
        let total = summary.total_cost;
        let share = |amount: f64| safe_ratio(amount, total) * 100.0;

        Self {
            marketing_share: share(costs.marketing),
            staffing_share: share(costs.staffing),
            event_share: share(costs.event),
            setup_share: share(costs.setup),
            cogs_share: share(costs.cogs()),
            marketing_to_revenue: safe_ratio(costs.marketing, summary.total_revenue) * 100.0,
        }
    }
}
