//! # Venture Plan
//!
//! `venture_plan` bundles the business-plan crates of this workspace:
//!
//! - [`math`]: growth, depreciation and percentage arithmetic
//! - [`forecast`]: weekly forecasts, scenarios and actuals reconciliation
//!
//! ## Example
//!
//! ```
//! use venture_plan::prelude::*;
//!
//! let inputs = PlanInputs::new(ProductInfo::new("Pop-up Cinema", 4))
//!     .with_growth(GrowthMetrics {
//!         weekly_visitors: 200.0,
//!         ..Default::default()
//!     })
//!     .with_revenue(RevenueMetrics {
//!         ticket: StreamRate::new(9.0, 1.0),
//!         ..Default::default()
//!     });
//!
//! let forecast = generate_forecast(&inputs).unwrap();
//! assert_eq!(forecast.summary().total_revenue, 7200.0);
//! ```

pub use plan_forecast as forecast;
pub use plan_math as math;

/// Types needed for the common forecast, scenario and actuals workflow
pub mod prelude {
    pub use plan_forecast::model::{
        CostMetrics, ForecastMode, GrowthMetrics, MarketingPlan, ProductCategory, ProductInfo,
        RevenueMetrics, StaffingPlan, StreamRate,
    };
    pub use plan_forecast::{
        generate_forecast, reconcile, DataLoader, Forecast, ForecastError, PlanInputs,
        ScenarioBook, ScenarioEngine, ScenarioModifiers, WeeklyActual, WeeklyProjection,
    };
}
