//! Reconciliation of recorded actuals against projected weeks
//!
//! A week with a recorded actual uses the actual's revenue, expenses and
//! profit everywhere; every other week falls back to its projection.
//! Cumulative profit is re-derived from week 1 on every reconciliation because
//! the projections' own running totals assume no actuals exist.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ForecastError, Result};
use crate::model::{CostBreakdown, RevenueBreakdown, WeeklyProjection};

/// Performance of one marketing channel during a recorded week
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChannelPerformance {
    pub channel: String,
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub spend: f64,
    pub revenue: f64,
}

/// Observed performance for one week
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WeeklyActual {
    /// 1-based week index
    pub week: u32,
    pub revenue: f64,
    pub expenses: f64,
    pub visitors: Option<f64>,
    pub revenue_breakdown: Option<RevenueBreakdown>,
    pub cost_breakdown: Option<CostBreakdown>,
    pub channels: Vec<ChannelPerformance>,
    pub notes: Option<String>,
    pub recorded_at: Option<DateTime<Utc>>,
}

impl WeeklyActual {
    pub fn new(week: u32, revenue: f64, expenses: f64) -> Self {
        Self {
            week,
            revenue,
            expenses,
            ..Default::default()
        }
    }

    pub fn profit(&self) -> f64 {
        self.revenue - self.expenses
    }
}

/// Where a reconciled week's figures come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeekSource {
    Actual,
    Projected,
}

/// Problems found while merging actuals; none of them stop reconciliation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ReconciliationIssue {
    /// No projected week matches the actual's week, so it was ignored
    OutOfHorizon { week: u32, horizon: u32 },
    /// A later actual for the same week replaced an earlier one
    Replaced { week: u32 },
}

impl ReconciliationIssue {
    pub fn week(&self) -> u32 {
        match self {
            ReconciliationIssue::OutOfHorizon { week, .. } => *week,
            ReconciliationIssue::Replaced { week } => *week,
        }
    }
}

/// One week of the reconciled view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciledWeek {
    pub week: u32,
    pub source: WeekSource,
    pub visitors: f64,
    pub revenue: f64,
    pub cost: f64,
    pub profit: f64,
    pub projected_revenue: f64,
    pub projected_cost: f64,
    pub projected_profit: f64,
    /// Running profit using actuals where present
    pub cumulative_profit: f64,
}

impl ReconciledWeek {
    pub fn is_actual(&self) -> bool {
        self.source == WeekSource::Actual
    }

    pub fn revenue_variance(&self) -> f64 {
        self.revenue - self.projected_revenue
    }

    pub fn cost_variance(&self) -> f64 {
        self.cost - self.projected_cost
    }

    pub fn profit_variance(&self) -> f64 {
        self.profit - self.projected_profit
    }
}

/// Actual-covered weeks and projected-only weeks, summed separately
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationTotals {
    pub actual_weeks: u32,
    pub projected_weeks: u32,
    pub actual_revenue: f64,
    pub actual_cost: f64,
    pub actual_profit: f64,
    pub projected_remaining_revenue: f64,
    pub projected_remaining_cost: f64,
    pub projected_remaining_profit: f64,
    pub combined_revenue: f64,
    pub combined_cost: f64,
    pub combined_profit: f64,
}

/// Result of overlaying actuals on a forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciledForecast {
    pub weeks: Vec<ReconciledWeek>,
    pub totals: ReconciliationTotals,
    pub issues: Vec<ReconciliationIssue>,
}

impl ReconciledForecast {
    pub fn week(&self, week: u32) -> Option<&ReconciledWeek> {
        self.weeks.iter().find(|w| w.week == week)
    }

    /// Cumulative profit series in week order
    pub fn cumulative_profit_series(&self) -> Vec<f64> {
        self.weeks.iter().map(|w| w.cumulative_profit).collect()
    }
}

/// Overlays recorded actuals on a projected sequence
#[derive(Debug, Clone)]
pub struct ActualsReconciler<'a> {
    projections: &'a [WeeklyProjection],
    actuals: BTreeMap<u32, WeeklyActual>,
    issues: Vec<ReconciliationIssue>,
}

impl<'a> ActualsReconciler<'a> {
    /// Projections are expected in ascending week order, normally a full
    /// forecast starting at week 1. Actuals are matched to projections by
    /// week number, and a slice starting later covers only its own weeks.
    pub fn new(projections: &'a [WeeklyProjection]) -> Self {
        Self {
            projections,
            actuals: BTreeMap::new(),
            issues: Vec::new(),
        }
    }

    /// Reconciler pre-loaded with actuals in submission order
    pub fn with_actuals<I>(projections: &'a [WeeklyProjection], actuals: I) -> Self
    where
        I: IntoIterator<Item = WeeklyActual>,
    {
        let mut reconciler = Self::new(projections);
        for actual in actuals {
            // Problems are kept on the reconciler and surface in the result
            let _ = reconciler.record(actual);
        }
        reconciler
    }

    /// Last projected week, or 0 without projections
    pub fn horizon(&self) -> u32 {
        self.projections.last().map_or(0, |p| p.week)
    }

    /// Index of the projection for a week. Every lookup goes through the
    /// projection's own week number, never its position in the slice.
    fn position(&self, week: u32) -> Option<usize> {
        self.projections.iter().position(|p| p.week == week)
    }

    /// Record one actual. The last actual submitted for a week wins.
    ///
    /// Returns the issue raised, if any; the same issue is also kept for the
    /// reconciled result.
    pub fn record(&mut self, actual: WeeklyActual) -> Option<ReconciliationIssue> {
        let horizon = self.horizon();
        let week = actual.week;

        let issue = if self.position(week).is_none() {
            warn!(week, horizon, "ignoring actual outside the forecast horizon");
            Some(ReconciliationIssue::OutOfHorizon { week, horizon })
        } else if self.actuals.insert(week, actual).is_some() {
            warn!(week, "replacing previously recorded actual");
            Some(ReconciliationIssue::Replaced { week })
        } else {
            None
        };

        if let Some(issue) = &issue {
            self.issues.push(issue.clone());
        }
        issue
    }

    pub fn actual(&self, week: u32) -> Option<&WeeklyActual> {
        self.actuals.get(&week)
    }

    /// Recorded actuals in week order
    pub fn actuals(&self) -> impl Iterator<Item = &WeeklyActual> {
        self.actuals.values()
    }

    pub fn issues(&self) -> &[ReconciliationIssue] {
        &self.issues
    }

    /// Profit used for a week: the actual's when recorded, else the projection's
    fn effective_profit(&self, projection: &WeeklyProjection) -> f64 {
        match self.actuals.get(&projection.week) {
            Some(actual) => actual.profit(),
            None => projection.weekly_profit,
        }
    }

    /// Cumulative profit through `week`, summed from the first projected week
    pub fn cumulative_profit_at(&self, week: u32) -> Result<f64> {
        let index = self
            .position(week)
            .ok_or(ForecastError::WeekOutOfRange {
                week,
                horizon: self.horizon(),
            })?;

        Ok(self.projections[..=index]
            .iter()
            .map(|p| self.effective_profit(p))
            .sum())
    }

    /// Build the reconciled view of every week
    pub fn reconcile(&self) -> ReconciledForecast {
        let mut totals = ReconciliationTotals::default();
        let mut cumulative_profit = 0.0;

        let weeks: Vec<ReconciledWeek> = self
            .projections
            .iter()
            .map(|projection| {
                let reconciled = match self.actuals.get(&projection.week) {
                    Some(actual) => {
                        totals.actual_weeks += 1;
                        totals.actual_revenue += actual.revenue;
                        totals.actual_cost += actual.expenses;
                        totals.actual_profit += actual.profit();
                        self.reconciled_week(projection, Some(actual))
                    }
                    None => {
                        totals.projected_weeks += 1;
                        totals.projected_remaining_revenue += projection.total_revenue;
                        totals.projected_remaining_cost += projection.total_cost;
                        totals.projected_remaining_profit += projection.weekly_profit;
                        self.reconciled_week(projection, None)
                    }
                };
                cumulative_profit += reconciled.profit;
                ReconciledWeek {
                    cumulative_profit,
                    ..reconciled
                }
            })
            .collect();

        totals.combined_revenue = totals.actual_revenue + totals.projected_remaining_revenue;
        totals.combined_cost = totals.actual_cost + totals.projected_remaining_cost;
        totals.combined_profit = totals.actual_profit + totals.projected_remaining_profit;

        ReconciledForecast {
            weeks,
            totals,
            issues: self.issues.clone(),
        }
    }

    fn reconciled_week(
        &self,
        projection: &WeeklyProjection,
        actual: Option<&WeeklyActual>,
    ) -> ReconciledWeek {
        let (source, visitors, revenue, cost, profit) = match actual {
            Some(actual) => (
                WeekSource::Actual,
                actual.visitors.unwrap_or(projection.visitors),
                actual.revenue,
                actual.expenses,
                actual.profit(),
            ),
            None => (
                WeekSource::Projected,
                projection.visitors,
                projection.total_revenue,
                projection.total_cost,
                projection.weekly_profit,
            ),
        };

        ReconciledWeek {
            week: projection.week,
            source,
            visitors,
            revenue,
            cost,
            profit,
            projected_revenue: projection.total_revenue,
            projected_cost: projection.total_cost,
            projected_profit: projection.weekly_profit,
            cumulative_profit: 0.0,
        }
    }
}

/// Overlay actuals on projections in one call
pub fn reconcile(projections: &[WeeklyProjection], actuals: &[WeeklyActual]) -> ReconciledForecast {
    ActualsReconciler::with_actuals(projections, actuals.iter().cloned()).reconcile()
}
