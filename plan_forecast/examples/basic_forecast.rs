use plan_forecast::metrics::{evaluate_actuals, summarize_channels, CostRatios};
use plan_forecast::model::{
    CostMetrics, DepreciationPolicy, ForecastMode, GrowthMetrics, MarketingChannel,
    MarketingCosts, MarketingPlan, NamedAmount, ProductCategory, ProductInfo, RevenueMetrics,
    RoleBasis, SetupCost, StaffRole, StaffingPlan, StreamRate,
};
use plan_forecast::{
    generate_forecast, reconcile, PlanInputs, ScenarioBook, ScenarioModifiers, WeeklyActual,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Plan Forecast: Basic Forecasting Example");
    println!("========================================\n");

    let inputs = sample_inputs();
    let forecast = generate_forecast(&inputs)?;

    println!("Week  Visitors    Revenue       Cost     Profit  Cumulative");
    for week in forecast.weeks() {
        println!(
            "{:>4}  {:>8.0}  {:>9.2}  {:>9.2}  {:>9.2}  {:>10.2}",
            week.week,
            week.visitors,
            week.total_revenue,
            week.total_cost,
            week.weekly_profit,
            week.cumulative_profit
        );
    }

    let summary = forecast.summary();
    println!("\n{}", summary);

    let ratios = CostRatios::from_summary(&summary);
    println!(
        "Marketing is {:.1}% of cost and {:.1}% of revenue\n",
        ratios.marketing_share, ratios.marketing_to_revenue
    );

    // Scenarios
    let mut book = ScenarioBook::new("night-market");
    let rainy = book
        .create(
            "Rainy season",
            ScenarioModifiers {
                attendance: -20.0,
                ticket_revenue: -20.0,
                fb_revenue: -30.0,
                ..Default::default()
            },
        )
        .clone();

    let result = rainy.engine().apply(forecast.weeks());
    println!("Scenario '{}':", rainy.name);
    println!(
        "  Revenue {:.2} -> {:.2} ({:+.1}%)",
        result.summary.revenue.baseline,
        result.summary.revenue.scenario,
        result.summary.revenue.percent_change
    );
    println!(
        "  Profit  {:.2} -> {:.2} ({:+.1}%)\n",
        result.summary.profit.baseline,
        result.summary.profit.scenario,
        result.summary.profit.percent_change
    );

    // Actuals for the first two weeks
    let mut week_one = WeeklyActual::new(1, 9_200.0, 7_100.0);
    week_one.channels = vec![plan_forecast::actuals::ChannelPerformance {
        channel: "Social".to_string(),
        impressions: 40_000,
        clicks: 1_200,
        conversions: 90,
        spend: 300.0,
        revenue: 1_350.0,
    }];
    let actuals = vec![week_one, WeeklyActual::new(2, 10_050.0, 6_900.0)];

    let reconciled = reconcile(forecast.weeks(), &actuals);
    println!("Reconciled cumulative profit:");
    for week in &reconciled.weeks {
        println!(
            "  Week {:>2} ({:?}): {:.2}",
            week.week, week.source, week.cumulative_profit
        );
    }

    let accuracy = evaluate_actuals(&reconciled);
    println!("\nRevenue {}", accuracy.revenue);

    for channel in summarize_channels(&actuals) {
        println!(
            "{}: CTR {:.2}%, CPA {:.2}, ROAS {:.2}",
            channel.channel,
            channel.click_through_rate(),
            channel.cost_per_acquisition(),
            channel.return_on_ad_spend()
        );
    }

    Ok(())
}

fn sample_inputs() -> PlanInputs {
    let product = ProductInfo {
        name: "Night Market".to_string(),
        forecast_weeks: 12,
        forecast_mode: ForecastMode::PerEvent,
        events_per_week: 2,
        category: ProductCategory::FoodAndBeverage,
    };

    let growth = GrowthMetrics {
        visitors_per_event: 400.0,
        weekly_growth_rate: 3.0,
        ..Default::default()
    };

    let revenue = RevenueMetrics {
        ticket: StreamRate::new(8.0, 0.9),
        food_and_beverage: StreamRate::new(12.0, 0.6),
        merchandise: StreamRate::new(20.0, 0.05),
        digital: StreamRate::default(),
    };

    let costs = CostMetrics {
        marketing: MarketingCosts {
            plan: MarketingPlan::ChannelBased {
                channels: vec![
                    MarketingChannel::new("Social", 300.0),
                    MarketingChannel::new("Radio", 200.0),
                ],
            },
            depreciation: Some(DepreciationPolicy {
                start_week: 4,
                rate: 10.0,
                minimum_amount: 150.0,
            }),
        },
        staffing: StaffingPlan::Detailed {
            roles: vec![
                StaffRole::new("Manager", 1, 1_200.0, RoleBasis::FullTime),
                StaffRole::new("Stall crew", 6, 150.0, RoleBasis::PerEvent),
            ],
        },
        event_costs: vec![NamedAmount::new("Venue hire", 1_500.0)],
        setup_costs: vec![
            SetupCost::new("Stalls", 6_000.0, true),
            SetupCost::new("Permits", 800.0, false),
        ],
        fb_cog_percentage: 35.0,
        merchandise_cog_per_unit: 0.0,
    };

    PlanInputs::new(product)
        .with_growth(growth)
        .with_revenue(revenue)
        .with_costs(costs)
}
