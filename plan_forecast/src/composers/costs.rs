//! Weekly cost composition
//!
//! Five independent sources make up a week's cost: marketing, staffing,
//! fixed event costs, setup costs and cost of goods sold.

use crate::error::Result;
use crate::model::{
    CostBreakdown, CostMetrics, MarketingPlan, NamedAmount, ProductCategory, ProductInfo,
    RevenueBreakdown, RoleBasis, SetupCost, SimpleBudget, StaffingPlan,
};
use plan_math::{clamp_percentage, safe_ratio, DepreciationCurve};

/// Week-level facts a cost source may depend on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostContext {
    /// 1-based week index
    pub week: u32,
    pub horizon: u32,
    pub events_per_week: f64,
}

/// A recurring cost that can be evaluated for any week of the horizon
pub trait CostSource {
    fn weekly_cost(&self, ctx: &CostContext) -> f64;
}

impl CostSource for MarketingPlan {
    /// Undepreciated marketing spend
    fn weekly_cost(&self, ctx: &CostContext) -> f64 {
        match self {
            MarketingPlan::Simple {
                budget: SimpleBudget::Weekly { weekly_budget },
            } => *weekly_budget,
            MarketingPlan::Simple {
                budget:
                    SimpleBudget::Campaign {
                        campaign_budget,
                        campaign_duration_weeks,
                    },
            } => {
                if *campaign_duration_weeks > 0 && ctx.week <= *campaign_duration_weeks {
                    campaign_budget / *campaign_duration_weeks as f64
                } else {
                    0.0
                }
            }
            // Campaign duration does not apply to channels
            MarketingPlan::ChannelBased { channels } => {
                channels.iter().map(|c| c.weekly_budget).sum()
            }
        }
    }
}

impl CostSource for StaffingPlan {
    fn weekly_cost(&self, ctx: &CostContext) -> f64 {
        match self {
            StaffingPlan::Simple {
                weekly_staff_cost,
                additional_staffing_per_event,
                staffing_cost_per_person,
            } => {
                weekly_staff_cost
                    + ctx.events_per_week * additional_staffing_per_event * staffing_cost_per_person
            }
            StaffingPlan::Detailed { roles } => roles
                .iter()
                .map(|role| {
                    let per_week = role.headcount as f64 * role.cost_per_person;
                    match role.basis {
                        RoleBasis::FullTime => per_week,
                        RoleBasis::PerEvent => per_week * ctx.events_per_week,
                    }
                })
                .sum(),
        }
    }
}

impl CostSource for [NamedAmount] {
    fn weekly_cost(&self, _ctx: &CostContext) -> f64 {
        self.iter().map(|c| c.amount).sum()
    }
}

impl CostSource for [SetupCost] {
    fn weekly_cost(&self, ctx: &CostContext) -> f64 {
        self.iter()
            .map(|cost| {
                if cost.amortize {
                    safe_ratio(cost.amount, ctx.horizon as f64)
                } else if ctx.week == 1 {
                    cost.amount
                } else {
                    0.0
                }
            })
            .sum()
    }
}

/// Computes the cost breakdown for each week of a forecast
#[derive(Debug, Clone)]
pub struct CostComposer {
    costs: CostMetrics,
    category: ProductCategory,
    horizon: u32,
    events_per_week: f64,
    depreciation: Option<DepreciationCurve>,
    merchandise_spend_rate: f64,
}

impl CostComposer {
    /// Build a composer for a product.
    ///
    /// `merchandise_spend_rate` is the per-unit spend used to recover unit
    /// counts from merchandise revenue.
    pub fn new(
        product: &ProductInfo,
        costs: &CostMetrics,
        merchandise_spend_rate: f64,
    ) -> Result<Self> {
        let depreciation = match &costs.marketing.depreciation {
            Some(policy) => Some(DepreciationCurve::new(
                policy.start_week.max(1),
                policy.rate,
                policy.minimum_amount,
            )?),
            None => None,
        };

        Ok(Self {
            costs: costs.clone(),
            category: product.category,
            horizon: product.forecast_weeks,
            events_per_week: product.effective_events_per_week(),
            depreciation,
            merchandise_spend_rate,
        })
    }

    fn context(&self, week: u32) -> CostContext {
        CostContext {
            week,
            horizon: self.horizon,
            events_per_week: self.events_per_week,
        }
    }

    /// Marketing spend for a week, after depreciation
    pub fn marketing(&self, week: u32) -> f64 {
        let base = self.costs.marketing.plan.weekly_cost(&self.context(week));
        match &self.depreciation {
            Some(curve) => curve.apply(base, week),
            None => base,
        }
    }

    pub fn staffing(&self, week: u32) -> f64 {
        self.costs.staffing.weekly_cost(&self.context(week))
    }

    pub fn event_costs(&self, week: u32) -> f64 {
        self.costs.event_costs.weekly_cost(&self.context(week))
    }

    pub fn setup_costs(&self, week: u32) -> f64 {
        self.costs.setup_costs.weekly_cost(&self.context(week))
    }

    /// Whether the product category sells goods and so carries COGS
    fn carries_cogs(&self) -> bool {
        matches!(
            self.category,
            ProductCategory::FoodAndBeverage | ProductCategory::Merchandise
        )
    }

    /// Cost of goods for F&B revenue
    pub fn fb_cogs(&self, fb_revenue: f64) -> f64 {
        if !self.carries_cogs() {
            return 0.0;
        }
        fb_revenue * clamp_percentage(self.costs.fb_cog_percentage) / 100.0
    }

    /// Cost of goods for merchandise, priced per unit sold.
    ///
    /// Units are recovered as `revenue / spend_rate`; a zero spend rate means
    /// no units and no cost.
    pub fn merchandise_cogs(&self, merchandise_revenue: f64) -> f64 {
        if !self.carries_cogs() || self.merchandise_spend_rate == 0.0 {
            return 0.0;
        }
        let units = merchandise_revenue / self.merchandise_spend_rate;
        units * self.costs.merchandise_cog_per_unit
    }

    /// Full cost breakdown for a week given that week's revenue
    pub fn compose(&self, week: u32, revenue: &RevenueBreakdown) -> CostBreakdown {
        CostBreakdown {
            marketing: self.marketing(week),
            staffing: self.staffing(week),
            event: self.event_costs(week),
            setup: self.setup_costs(week),
            fb_cogs: self.fb_cogs(revenue.food_and_beverage),
            merchandise_cogs: self.merchandise_cogs(revenue.merchandise),
        }
    }
}
