//! # Plan Forecast
//!
//! Week-by-week financial forecasts for a business plan, what-if scenarios
//! over those forecasts, and reconciliation against recorded actuals.
//!
//! ## Features
//!
//! - Compounding visitor growth in per-event or continuous mode
//! - Four revenue streams (ticket, food & beverage, merchandise, digital)
//! - Marketing (simple, campaign or channel-based, with optional depreciation),
//!   staffing, fixed event costs, setup costs and cost of goods sold
//! - Percentage-modifier scenarios with aggregate and weekly variance
//! - Actuals overlay with re-derived cumulative profit
//!
//! Every engine is a pure function of its inputs: nothing is cached between
//! calls and no storage is touched, so calls may run concurrently.
//!
//! ## Quick Start
//!
//! ```rust
//! use plan_forecast::model::{GrowthMetrics, ProductInfo, RevenueMetrics, StreamRate};
//! use plan_forecast::{generate_forecast, PlanInputs, ScenarioEngine, ScenarioModifiers};
//!
//! let inputs = PlanInputs::new(ProductInfo::new("Night Market", 2))
//!     .with_growth(GrowthMetrics {
//!         weekly_visitors: 100.0,
//!         ..Default::default()
//!     })
//!     .with_revenue(RevenueMetrics {
//!         ticket: StreamRate::new(10.0, 1.0),
//!         ..Default::default()
//!     });
//!
//! let forecast = generate_forecast(&inputs)?;
//! assert_eq!(forecast.final_cumulative_profit(), 2000.0);
//!
//! let optimistic = ScenarioEngine::new(ScenarioModifiers {
//!     attendance: 10.0,
//!     ticket_revenue: 5.0,
//!     ..Default::default()
//! });
//! let result = optimistic.apply(forecast.weeks());
//! assert!(result.summary.revenue.difference > 0.0);
//! # Ok::<(), plan_forecast::ForecastError>(())
//! ```

pub mod actuals;
pub mod composers;
pub mod data;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod model;
pub mod scenario;

// Re-export commonly used types
pub use crate::actuals::{reconcile, ActualsReconciler, ReconciledForecast, WeeklyActual};
pub use crate::data::{DataLoader, PlanInputs};
pub use crate::engine::{generate_forecast, Forecast, ForecastEngine, ForecastSummary};
pub use crate::error::{ForecastError, Result};
pub use crate::model::WeeklyProjection;
pub use crate::scenario::{Scenario, ScenarioBook, ScenarioEngine, ScenarioModifiers};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
