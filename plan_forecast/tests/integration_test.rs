use assert_approx_eq::assert_approx_eq;
use plan_forecast::metrics::{evaluate_actuals, summarize_channels, CostRatios};
use plan_forecast::{
    generate_forecast, ActualsReconciler, DataLoader, PlanInputs, ScenarioBook, ScenarioModifiers,
};
use std::io::Write;
use tempfile::NamedTempFile;

// Helper function to create a plan file
fn create_plan_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "product": {{ "name": "Climbing Gym", "forecastWeeks": 6, "category": "other" }},
            "growth": {{ "weeklyVisitors": 500, "weeklyGrowthRate": 2 }},
            "revenue": {{
                "ticket": {{ "rate": 12, "conversionRate": 1 }},
                "merchandise": {{ "rate": 30, "conversionRate": 0.05 }}
            }},
            "costs": {{
                "marketing": {{
                    "plan": {{
                        "mode": "channel-based",
                        "channels": [
                            {{ "name": "Social", "weeklyBudget": 200 }},
                            {{ "name": "Flyers", "weeklyBudget": 100 }}
                        ]
                    }},
                    "depreciation": {{ "startWeek": 3, "rate": 10, "minimumAmount": 250 }}
                }},
                "staffing": {{ "mode": "simple", "weeklyStaffCost": 2500 }},
                "eventCosts": [{{ "name": "Lease", "amount": 1800 }}],
                "setupCosts": [
                    {{ "name": "Walls", "amount": 12000, "amortize": true }},
                    {{ "name": "Opening party", "amount": 900, "amortize": false }}
                ]
            }}
        }}"#
    )
    .unwrap();
    file
}

// Helper function to create an actuals file
fn create_actuals_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "week,revenue,expenses,visitors,notes").unwrap();
    writeln!(file, "1,6100,7400,480,soft opening").unwrap();
    writeln!(file, "2,6900,6700,530,").unwrap();
    writeln!(file, "8,9999,1,,after the plan").unwrap();
    file
}

#[test]
fn test_end_to_end_plan() {
    let plan_file = create_plan_file();
    let inputs = PlanInputs::from_json_file(plan_file.path()).unwrap();
    let forecast = generate_forecast(&inputs).unwrap();

    assert_eq!(forecast.horizon(), 6);

    let weeks = forecast.weeks();
    assert_eq!(weeks[0].visitors, 500.0);
    assert_eq!(weeks[1].visitors, 510.0);
    assert_approx_eq!(weeks[0].revenue.ticket, 6000.0);
    assert_approx_eq!(weeks[0].revenue.merchandise, 750.0);

    // Channels: full 300 through week 3, then 10% per week down to the 250 floor
    assert_approx_eq!(weeks[2].costs.marketing, 300.0);
    assert_approx_eq!(weeks[3].costs.marketing, 270.0);
    assert_approx_eq!(weeks[4].costs.marketing, 250.0);
    assert_approx_eq!(weeks[5].costs.marketing, 250.0);

    // Amortized walls every week, party only in week 1
    assert_approx_eq!(weeks[0].costs.setup, 2900.0);
    assert_approx_eq!(weeks[1].costs.setup, 2000.0);

    // Category "other" sells no goods, so no merchandise COGS
    assert!(weeks.iter().all(|w| w.costs.merchandise_cogs == 0.0));

    let summary = forecast.summary();
    assert_eq!(summary.weeks, 6);
    assert_approx_eq!(summary.final_cumulative_profit, forecast.final_cumulative_profit());
    assert_approx_eq!(summary.total_profit, summary.total_revenue - summary.total_cost);

    let ratios = CostRatios::from_summary(&summary);
    let shares = ratios.marketing_share
        + ratios.staffing_share
        + ratios.event_share
        + ratios.setup_share
        + ratios.cogs_share;
    assert_approx_eq!(shares, 100.0);

    // Scenarios over the same projection
    let mut book = ScenarioBook::new("climbing-gym");
    let busy_id = book
        .create(
            "Busy winter",
            ScenarioModifiers {
                attendance: 20.0,
                ticket_revenue: 20.0,
                staffing_cost: 10.0,
                ..Default::default()
            },
        )
        .id;
    let busy = book.get(busy_id).unwrap().engine().apply(weeks);
    assert!(busy.summary.revenue.difference > 0.0);
    assert!(busy.summary.cost.difference > 0.0);
    assert_approx_eq!(busy.summary.cost.difference, 1500.0);

    let baseline = book.scenarios()[0].engine().apply(weeks);
    assert_eq!(baseline.weeks, weeks.to_vec());

    // Actuals overlay
    let actuals_file = create_actuals_file();
    let actuals = DataLoader::actuals_from_csv(actuals_file.path()).unwrap();
    let reconciler = ActualsReconciler::with_actuals(weeks, actuals.clone());
    let reconciled = reconciler.reconcile();

    assert_eq!(reconciled.issues.len(), 1);
    assert_eq!(reconciled.issues[0].week(), 8);
    assert_eq!(reconciled.totals.actual_weeks, 2);
    assert_approx_eq!(reconciled.weeks[0].cumulative_profit, -1300.0);
    assert_approx_eq!(reconciled.weeks[1].cumulative_profit, -1100.0);
    assert_approx_eq!(
        reconciled.weeks[5].cumulative_profit,
        -1100.0 + weeks[2..].iter().map(|w| w.weekly_profit).sum::<f64>()
    );
    assert_approx_eq!(
        reconciled.totals.combined_profit,
        reconciled.weeks[5].cumulative_profit
    );

    let report = evaluate_actuals(&reconciled);
    assert_eq!(report.revenue.weeks, 2);
    assert!(summarize_channels(&actuals).is_empty());

    // Export the projection
    let mut output = Vec::new();
    DataLoader::write_projections_csv(&mut output, weeks).unwrap();
    assert_eq!(String::from_utf8(output).unwrap().lines().count(), 7);
}
