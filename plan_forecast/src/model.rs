//! Input and output records for weekly business-plan forecasts
//!
//! Every input record implements `Default` as an explicit all-zero value and
//! deserializes with `#[serde(default)]`, so a missing record or field never
//! reaches the arithmetic as a null.

use serde::{Deserialize, Serialize};

/// How visitor volume is counted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ForecastMode {
    /// Visitors arrive at discrete events, several per week
    PerEvent,
    /// Visitors arrive continuously; volume is counted per week
    #[default]
    Continuous,
}

/// Product category; decides which cost-of-goods stream applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductCategory {
    #[default]
    Event,
    FoodAndBeverage,
    Merchandise,
    Digital,
    Other,
}

/// Identity and shape of a forecast
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductInfo {
    pub name: String,
    /// Forecast horizon in weeks; must be positive
    pub forecast_weeks: u32,
    pub forecast_mode: ForecastMode,
    /// Only meaningful in per-event mode
    pub events_per_week: u32,
    pub category: ProductCategory,
}

impl ProductInfo {
    pub fn new(name: &str, forecast_weeks: u32) -> Self {
        Self {
            name: name.to_string(),
            forecast_weeks,
            ..Default::default()
        }
    }

    /// Events per week as used by the arithmetic. Continuous products have no
    /// events, so per-event amounts contribute nothing.
    pub fn effective_events_per_week(&self) -> f64 {
        match self.forecast_mode {
            ForecastMode::PerEvent => self.events_per_week as f64,
            ForecastMode::Continuous => 0.0,
        }
    }
}

/// Visitor volume and growth parameters
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GrowthMetrics {
    /// Base weekly volume in continuous mode
    pub weekly_visitors: f64,
    /// Base volume per event in per-event mode
    pub visitors_per_event: f64,
    /// Weekly growth as a percentage; may be negative
    pub weekly_growth_rate: f64,
    /// Display only
    pub return_visit_rate: f64,
    /// Display only
    pub word_of_mouth_rate: f64,
}

/// Price (or spend) and conversion for one revenue stream.
///
/// Conversion is a fraction in `[0, 1]`. Neither value is validated here;
/// negative inputs are the caller's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StreamRate {
    pub rate: f64,
    pub conversion_rate: f64,
}

impl StreamRate {
    pub fn new(rate: f64, conversion_rate: f64) -> Self {
        Self {
            rate,
            conversion_rate,
        }
    }

    /// Revenue contributed by a single visitor
    pub fn per_visitor(&self) -> f64 {
        self.rate * self.conversion_rate
    }
}

/// One of the four independent revenue streams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RevenueStream {
    Ticket,
    FoodAndBeverage,
    Merchandise,
    Digital,
}

impl RevenueStream {
    pub const ALL: [RevenueStream; 4] = [
        RevenueStream::Ticket,
        RevenueStream::FoodAndBeverage,
        RevenueStream::Merchandise,
        RevenueStream::Digital,
    ];
}

/// Per-stream pricing
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RevenueMetrics {
    pub ticket: StreamRate,
    pub food_and_beverage: StreamRate,
    pub merchandise: StreamRate,
    pub digital: StreamRate,
}

impl RevenueMetrics {
    pub fn stream(&self, stream: RevenueStream) -> &StreamRate {
        match stream {
            RevenueStream::Ticket => &self.ticket,
            RevenueStream::FoodAndBeverage => &self.food_and_beverage,
            RevenueStream::Merchandise => &self.merchandise,
            RevenueStream::Digital => &self.digital,
        }
    }
}

/// Fixed budget used by simple marketing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum SimpleBudget {
    /// The same amount every week
    Weekly { weekly_budget: f64 },
    /// A budget spread evenly over the first `campaign_duration_weeks` weeks
    Campaign {
        campaign_budget: f64,
        campaign_duration_weeks: u32,
    },
}

impl Default for SimpleBudget {
    fn default() -> Self {
        SimpleBudget::Weekly { weekly_budget: 0.0 }
    }
}

/// A named marketing channel with its own weekly budget
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarketingChannel {
    pub name: String,
    pub weekly_budget: f64,
}

impl MarketingChannel {
    pub fn new(name: &str, weekly_budget: f64) -> Self {
        Self {
            name: name.to_string(),
            weekly_budget,
        }
    }
}

/// The active marketing mode. Switching modes replaces the whole value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum MarketingPlan {
    Simple { budget: SimpleBudget },
    ChannelBased { channels: Vec<MarketingChannel> },
}

impl Default for MarketingPlan {
    fn default() -> Self {
        MarketingPlan::Simple {
            budget: SimpleBudget::default(),
        }
    }
}

/// Scheduled decay of the marketing budget
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DepreciationPolicy {
    /// First week the decay applies to
    pub start_week: u32,
    /// Weekly decay as a percentage
    pub rate: f64,
    /// Amount the budget never decays below
    pub minimum_amount: f64,
}

impl Default for DepreciationPolicy {
    fn default() -> Self {
        Self {
            start_week: 1,
            rate: 0.0,
            minimum_amount: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarketingCosts {
    pub plan: MarketingPlan,
    /// `None` disables depreciation
    pub depreciation: Option<DepreciationPolicy>,
}

/// Whether a staff role is paid once per week or once per event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoleBasis {
    #[default]
    FullTime,
    PerEvent,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StaffRole {
    pub name: String,
    pub headcount: u32,
    /// Weekly cost per person (per event for per-event roles)
    pub cost_per_person: f64,
    pub basis: RoleBasis,
}

impl StaffRole {
    pub fn new(name: &str, headcount: u32, cost_per_person: f64, basis: RoleBasis) -> Self {
        Self {
            name: name.to_string(),
            headcount,
            cost_per_person,
            basis,
        }
    }
}

/// The active staffing mode. Switching modes replaces the whole value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum StaffingPlan {
    Simple {
        weekly_staff_cost: f64,
        /// Extra people needed per event
        additional_staffing_per_event: f64,
        staffing_cost_per_person: f64,
    },
    Detailed { roles: Vec<StaffRole> },
}

impl Default for StaffingPlan {
    fn default() -> Self {
        StaffingPlan::Simple {
            weekly_staff_cost: 0.0,
            additional_staffing_per_event: 0.0,
            staffing_cost_per_person: 0.0,
        }
    }
}

/// A named fixed amount charged every week
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NamedAmount {
    pub name: String,
    pub amount: f64,
}

impl NamedAmount {
    pub fn new(name: &str, amount: f64) -> Self {
        Self {
            name: name.to_string(),
            amount,
        }
    }
}

/// A one-time cost, either charged in week 1 or spread over the horizon
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SetupCost {
    pub name: String,
    pub amount: f64,
    pub amortize: bool,
}

impl SetupCost {
    pub fn new(name: &str, amount: f64, amortize: bool) -> Self {
        Self {
            name: name.to_string(),
            amount,
            amortize,
        }
    }
}

/// All cost structures for a product
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CostMetrics {
    pub marketing: MarketingCosts,
    pub staffing: StaffingPlan,
    pub event_costs: Vec<NamedAmount>,
    pub setup_costs: Vec<SetupCost>,
    /// Share of F&B revenue spent on goods, 0-100 (clamped)
    pub fb_cog_percentage: f64,
    pub merchandise_cog_per_unit: f64,
}

/// Revenue for one week, split by stream
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RevenueBreakdown {
    pub ticket: f64,
    pub food_and_beverage: f64,
    pub merchandise: f64,
    pub digital: f64,
}

impl RevenueBreakdown {
    pub fn total(&self) -> f64 {
        self.ticket + self.food_and_beverage + self.merchandise + self.digital
    }

    pub fn get(&self, stream: RevenueStream) -> f64 {
        match stream {
            RevenueStream::Ticket => self.ticket,
            RevenueStream::FoodAndBeverage => self.food_and_beverage,
            RevenueStream::Merchandise => self.merchandise,
            RevenueStream::Digital => self.digital,
        }
    }

    /// Component-wise sum
    pub fn add(&self, other: &Self) -> Self {
        Self {
            ticket: self.ticket + other.ticket,
            food_and_beverage: self.food_and_beverage + other.food_and_beverage,
            merchandise: self.merchandise + other.merchandise,
            digital: self.digital + other.digital,
        }
    }
}

/// Cost for one week, split by source
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CostBreakdown {
    pub marketing: f64,
    pub staffing: f64,
    pub event: f64,
    pub setup: f64,
    pub fb_cogs: f64,
    pub merchandise_cogs: f64,
}

impl CostBreakdown {
    pub fn total(&self) -> f64 {
        self.marketing
            + self.staffing
            + self.event
            + self.setup
            + self.fb_cogs
            + self.merchandise_cogs
    }

    pub fn cogs(&self) -> f64 {
        self.fb_cogs + self.merchandise_cogs
    }

    /// Component-wise sum
    pub fn add(&self, other: &Self) -> Self {
        Self {
            marketing: self.marketing + other.marketing,
            staffing: self.staffing + other.staffing,
            event: self.event + other.event,
            setup: self.setup + other.setup,
            fb_cogs: self.fb_cogs + other.fb_cogs,
            merchandise_cogs: self.merchandise_cogs + other.merchandise_cogs,
        }
    }
}

/// One projected week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyProjection {
    /// 1-based week index
    pub week: u32,
    pub visitors: f64,
    pub revenue: RevenueBreakdown,
    pub total_revenue: f64,
    pub costs: CostBreakdown,
    pub total_cost: f64,
    pub weekly_profit: f64,
    /// Running sum of weekly profit from week 1
    pub cumulative_profit: f64,
}

impl WeeklyProjection {
    /// Assemble a week from its components; totals and profit are derived,
    /// the cumulative profit continues from `previous_cumulative`.
    pub fn from_components(
        week: u32,
        visitors: f64,
        revenue: RevenueBreakdown,
        costs: CostBreakdown,
        previous_cumulative: f64,
    ) -> Self {
        let total_revenue = revenue.total();
        let total_cost = costs.total();
        let weekly_profit = total_revenue - total_cost;

        Self {
            week,
            visitors,
            revenue,
            total_revenue,
            costs,
            total_cost,
            weekly_profit,
            cumulative_profit: previous_cumulative + weekly_profit,
        }
    }

    /// Visitors per event for display; 0 when there are no events
    pub fn average_per_event(&self, events_per_week: f64) -> f64 {
        if events_per_week <= 0.0 {
            return 0.0;
        }
        (self.visitors / events_per_week).round()
    }
}
