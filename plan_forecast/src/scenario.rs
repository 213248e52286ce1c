//! What-if scenarios over a baseline forecast
//!
//! A scenario is a set of percentage modifiers. Applying it scales each
//! revenue stream, each cost source and visitor volume of every baseline week
//! independently, then rebuilds totals and cumulative profit from the scaled
//! components.

use chrono::{DateTime, Utc};
use plan_math::{apply_modifier, percent_change};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{ForecastError, Result};
use crate::model::{CostBreakdown, RevenueBreakdown, WeeklyProjection};

/// Name given to the scenario created when a product has none
pub const DEFAULT_SCENARIO_NAME: &str = "Baseline";

/// Percentage deltas applied to a baseline week. Zero means unchanged;
/// anything below -100 is treated as -100.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScenarioModifiers {
    pub ticket_revenue: f64,
    pub fb_revenue: f64,
    pub merchandise_revenue: f64,
    pub digital_revenue: f64,
    pub marketing_cost: f64,
    pub staffing_cost: f64,
    pub event_cost: f64,
    pub setup_cost: f64,
    pub attendance: f64,
}

impl ScenarioModifiers {
    /// True when every modifier is zero
    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }

    /// Apply to one week's revenue.
    pub fn apply_revenue(&self, revenue: &RevenueBreakdown) -> RevenueBreakdown {
        RevenueBreakdown {
            ticket: apply_modifier(revenue.ticket, self.ticket_revenue),
            food_and_beverage: apply_modifier(revenue.food_and_beverage, self.fb_revenue),
            merchandise: apply_modifier(revenue.merchandise, self.merchandise_revenue),
            digital: apply_modifier(revenue.digital, self.digital_revenue),
        }
    }

    /// Apply to one week's costs. Cost of goods follows the modifier of the
    /// revenue stream it is derived from.
    pub fn apply_costs(&self, costs: &CostBreakdown) -> CostBreakdown {
        CostBreakdown {
            marketing: apply_modifier(costs.marketing, self.marketing_cost),
            staffing: apply_modifier(costs.staffing, self.staffing_cost),
            event: apply_modifier(costs.event, self.event_cost),
            setup: apply_modifier(costs.setup, self.setup_cost),
            fb_cogs: apply_modifier(costs.fb_cogs, self.fb_revenue),
            merchandise_cogs: apply_modifier(costs.merchandise_cogs, self.merchandise_revenue),
        }
    }

    /// Visitors stay whole counts
    pub fn apply_attendance(&self, visitors: f64) -> f64 {
        apply_modifier(visitors, self.attendance).round()
    }
}

/// Applies one set of modifiers to baseline sequences
#[derive(Debug, Clone, Default)]
pub struct ScenarioEngine {
    modifiers: ScenarioModifiers,
}

impl ScenarioEngine {
    pub fn new(modifiers: ScenarioModifiers) -> Self {
        Self { modifiers }
    }

    pub fn modifiers(&self) -> &ScenarioModifiers {
        &self.modifiers
    }

    /// Scenario sequence, summary and weekly variance for a baseline
    pub fn apply(&self, baseline: &[WeeklyProjection]) -> ScenarioResult {
        debug!(
            weeks = baseline.len(),
            neutral = self.modifiers.is_neutral(),
            "applying scenario"
        );

        let weeks = self.modify_weeks(baseline);
        let summary = ScenarioSummary::compare(baseline, &weeks);
        let weekly_variance = baseline
            .iter()
            .zip(&weeks)
            .map(|(base, scenario)| WeeklyVariance::between(base, scenario))
            .collect();

        ScenarioResult {
            weeks,
            summary,
            weekly_variance,
        }
    }

    /// Modified copy of the baseline with cumulative profit re-derived
    pub fn modify_weeks(&self, baseline: &[WeeklyProjection]) -> Vec<WeeklyProjection> {
        let mut cumulative_profit = 0.0;
        baseline
            .iter()
            .map(|week| {
                let modified = WeeklyProjection::from_components(
                    week.week,
                    self.modifiers.apply_attendance(week.visitors),
                    self.modifiers.apply_revenue(&week.revenue),
                    self.modifiers.apply_costs(&week.costs),
                    cumulative_profit,
                );
                cumulative_profit = modified.cumulative_profit;
                modified
            })
            .collect()
    }
}

/// Output of applying a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    pub weeks: Vec<WeeklyProjection>,
    pub summary: ScenarioSummary,
    pub weekly_variance: Vec<WeeklyVariance>,
}

/// Baseline vs scenario totals for one metric family
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricVariance {
    pub baseline: f64,
    pub scenario: f64,
    pub difference: f64,
    /// Percent change relative to the baseline; 0 when the baseline is 0
    pub percent_change: f64,
}

impl MetricVariance {
    pub fn new(baseline: f64, scenario: f64) -> Self {
        Self {
            baseline,
            scenario,
            difference: scenario - baseline,
            percent_change: percent_change(baseline, scenario),
        }
    }
}

/// Aggregate comparison of a scenario against its baseline
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioSummary {
    pub revenue: MetricVariance,
    pub cost: MetricVariance,
    pub profit: MetricVariance,
    pub attendance: MetricVariance,
}

impl ScenarioSummary {
    /// Sum each weekly series first, then difference the sums
    pub fn compare(baseline: &[WeeklyProjection], scenario: &[WeeklyProjection]) -> Self {
        let totals = |weeks: &[WeeklyProjection]| {
            weeks.iter().fold((0.0, 0.0, 0.0, 0.0), |acc, w| {
                (
                    acc.0 + w.total_revenue,
                    acc.1 + w.total_cost,
                    acc.2 + w.weekly_profit,
                    acc.3 + w.visitors,
                )
            })
        };

        let (base_revenue, base_cost, base_profit, base_visitors) = totals(baseline);
        let (revenue, cost, profit, visitors) = totals(scenario);

        Self {
            revenue: MetricVariance::new(base_revenue, revenue),
            cost: MetricVariance::new(base_cost, cost),
            profit: MetricVariance::new(base_profit, profit),
            attendance: MetricVariance::new(base_visitors, visitors),
        }
    }
}

/// Scenario minus baseline for one week
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyVariance {
    pub week: u32,
    pub revenue: f64,
    pub cost: f64,
    pub profit: f64,
    pub visitors: f64,
}

impl WeeklyVariance {
    pub fn between(baseline: &WeeklyProjection, scenario: &WeeklyProjection) -> Self {
        Self {
            week: baseline.week,
            revenue: scenario.total_revenue - baseline.total_revenue,
            cost: scenario.total_cost - baseline.total_cost,
            profit: scenario.weekly_profit - baseline.weekly_profit,
            visitors: scenario.visitors - baseline.visitors,
        }
    }
}

/// A named, addressable set of modifiers belonging to one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: Uuid,
    pub product_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub modifiers: ScenarioModifiers,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Scenario {
    /// New scenario with a fresh id and matching created/updated timestamps
    pub fn new(product_id: &str, name: &str, modifiers: ScenarioModifiers) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            product_id: product_id.to_string(),
            name: name.to_string(),
            description: None,
            modifiers,
            created_at: now,
            updated_at: now,
        }
    }

    /// All-zero scenario used when a product would otherwise have none
    pub fn default_for(product_id: &str) -> Self {
        Self::new(product_id, DEFAULT_SCENARIO_NAME, ScenarioModifiers::default())
    }

    /// Copy with a new identity and fresh timestamps
    pub fn duplicate(&self) -> Self {
        let mut copy = Self::new(
            &self.product_id,
            &format!("{} (Copy)", self.name),
            self.modifiers,
        );
        copy.description = self.description.clone();
        copy
    }

    pub fn engine(&self) -> ScenarioEngine {
        ScenarioEngine::new(self.modifiers)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// The scenarios of one product. Never empty: removing the last scenario
/// creates a default one in its place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioBook {
    product_id: String,
    scenarios: Vec<Scenario>,
}

impl ScenarioBook {
    /// A book holding only the default scenario
    pub fn new(product_id: &str) -> Self {
        Self::from_scenarios(product_id, Vec::new())
    }

    /// Wrap loaded scenarios, keeping only those that belong to the product
    pub fn from_scenarios(product_id: &str, scenarios: Vec<Scenario>) -> Self {
        let mut book = Self {
            product_id: product_id.to_string(),
            scenarios: scenarios
                .into_iter()
                .filter(|s| s.product_id == product_id)
                .collect(),
        };
        book.ensure_default();
        book
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Never true: the book always holds at least one scenario
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    fn get_mut(&mut self, id: Uuid) -> Result<&mut Scenario> {
        self.scenarios
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(ForecastError::ScenarioNotFound(id))
    }

    /// Add a new scenario and return it
    pub fn create(&mut self, name: &str, modifiers: ScenarioModifiers) -> &Scenario {
        let scenario = Scenario::new(&self.product_id, name, modifiers);
        self.push(scenario)
    }

    /// Copy an existing scenario under a new identity
    pub fn duplicate(&mut self, id: Uuid) -> Result<&Scenario> {
        let copy = self
            .get(id)
            .ok_or(ForecastError::ScenarioNotFound(id))?
            .duplicate();
        Ok(self.push(copy))
    }

    pub fn rename(&mut self, id: Uuid, name: &str) -> Result<()> {
        let scenario = self.get_mut(id)?;
        scenario.name = name.to_string();
        scenario.touch();
        Ok(())
    }

    pub fn update_modifiers(&mut self, id: Uuid, modifiers: ScenarioModifiers) -> Result<()> {
        let scenario = self.get_mut(id)?;
        scenario.modifiers = modifiers;
        scenario.touch();
        Ok(())
    }

    /// Remove a scenario and return it. Removing the last one creates a
    /// default all-zero scenario.
    pub fn delete(&mut self, id: Uuid) -> Result<Scenario> {
        let index = self
            .scenarios
            .iter()
            .position(|s| s.id == id)
            .ok_or(ForecastError::ScenarioNotFound(id))?;
        let removed = self.scenarios.remove(index);
        self.ensure_default();
        Ok(removed)
    }

    fn push(&mut self, scenario: Scenario) -> &Scenario {
        self.scenarios.push(scenario);
        &self.scenarios[self.scenarios.len() - 1]
    }

    fn ensure_default(&mut self) {
        if self.scenarios.is_empty() {
            warn!(product = %self.product_id, "no scenarios left, creating default");
            self.scenarios.push(Scenario::default_for(&self.product_id));
        }
    }
}
