//! Plan input loading and tabular data exchange
//!
//! Plan inputs are read from JSON; recorded actuals are read from CSV and
//! projections can be written back out as a flat CSV table.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::actuals::WeeklyActual;
use crate::error::Result;
use crate::model::{CostMetrics, GrowthMetrics, ProductInfo, RevenueMetrics, WeeklyProjection};

/// Everything the forecast engine needs for one product.
///
/// Growth, revenue and cost records may be absent (`null` or missing in
/// JSON); the engine then uses their all-zero defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlanInputs {
    pub product: ProductInfo,
    pub growth: Option<GrowthMetrics>,
    pub revenue: Option<RevenueMetrics>,
    pub costs: Option<CostMetrics>,
}

impl PlanInputs {
    pub fn new(product: ProductInfo) -> Self {
        Self {
            product,
            ..Default::default()
        }
    }

    pub fn with_growth(mut self, growth: GrowthMetrics) -> Self {
        self.growth = Some(growth);
        self
    }

    pub fn with_revenue(mut self, revenue: RevenueMetrics) -> Self {
        self.revenue = Some(revenue);
        self
    }

    pub fn with_costs(mut self, costs: CostMetrics) -> Self {
        self.costs = Some(costs);
        self
    }

    /// Parse plan inputs from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load plan inputs from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// One row of an actuals CSV file
#[derive(Debug, Deserialize)]
struct ActualRecord {
    week: u32,
    revenue: f64,
    expenses: f64,
    #[serde(default)]
    visitors: Option<f64>,
    #[serde(default)]
    notes: Option<String>,
}

impl From<ActualRecord> for WeeklyActual {
    fn from(record: ActualRecord) -> Self {
        WeeklyActual {
            visitors: record.visitors,
            notes: record.notes,
            ..WeeklyActual::new(record.week, record.revenue, record.expenses)
        }
    }
}

/// One flat row of a projection table
#[derive(Debug, Serialize)]
struct ProjectionRow {
    week: u32,
    visitors: f64,
    ticket_revenue: f64,
    fb_revenue: f64,
    merchandise_revenue: f64,
    digital_revenue: f64,
    total_revenue: f64,
    marketing_cost: f64,
    staffing_cost: f64,
    event_cost: f64,
    setup_cost: f64,
    fb_cogs: f64,
    merchandise_cogs: f64,
    total_cost: f64,
    weekly_profit: f64,
    cumulative_profit: f64,
}

impl From<&WeeklyProjection> for ProjectionRow {
    fn from(w: &WeeklyProjection) -> Self {
        Self {
            week: w.week,
            visitors: w.visitors,
            ticket_revenue: w.revenue.ticket,
            fb_revenue: w.revenue.food_and_beverage,
            merchandise_revenue: w.revenue.merchandise,
            digital_revenue: w.revenue.digital,
            total_revenue: w.total_revenue,
            marketing_cost: w.costs.marketing,
            staffing_cost: w.costs.staffing,
            event_cost: w.costs.event,
            setup_cost: w.costs.setup,
            fb_cogs: w.costs.fb_cogs,
            merchandise_cogs: w.costs.merchandise_cogs,
            total_cost: w.total_cost,
            weekly_profit: w.weekly_profit,
            cumulative_profit: w.cumulative_profit,
        }
    }
}

/// Loader for recorded data
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load weekly actuals from a CSV file with a header row.
    ///
    /// Required columns are `week`, `revenue` and `expenses`; `visitors` and
    /// `notes` are optional. Rows keep file order, which is the submission
    /// order used when the same week appears twice.
    pub fn actuals_from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<WeeklyActual>> {
        let file = File::open(path)?;
        Self::actuals_from_reader(file)
    }

    /// Read weekly actuals from any CSV source
    pub fn actuals_from_reader<R: Read>(reader: R) -> Result<Vec<WeeklyActual>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut actuals = Vec::new();
        for record in csv_reader.deserialize::<ActualRecord>() {
            actuals.push(WeeklyActual::from(record?));
        }
        Ok(actuals)
    }

    /// Write projections as a flat CSV table with a header row
    pub fn write_projections_csv<W: Write>(writer: W, weeks: &[WeeklyProjection]) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for week in weeks {
            csv_writer.serialize(ProjectionRow::from(week))?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
