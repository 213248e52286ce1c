use plan_forecast::actuals::{ReconciliationIssue, WeekSource};
use plan_forecast::model::{
    CostMetrics, GrowthMetrics, NamedAmount, ProductInfo, RevenueMetrics, StreamRate,
};
use plan_forecast::{
    generate_forecast, reconcile, ActualsReconciler, ForecastError, PlanInputs, WeeklyActual,
    WeeklyProjection,
};
use pretty_assertions::assert_eq;

/// Projections earning 1000 and costing 700 every week (profit 300)
fn create_projections(weeks: u32) -> Vec<WeeklyProjection> {
    let inputs = PlanInputs::new(ProductInfo::new("Cafe", weeks))
        .with_growth(GrowthMetrics {
            weekly_visitors: 100.0,
            ..Default::default()
        })
        .with_revenue(RevenueMetrics {
            ticket: StreamRate::new(10.0, 1.0),
            ..Default::default()
        })
        .with_costs(CostMetrics {
            event_costs: vec![NamedAmount::new("Rent", 700.0)],
            ..Default::default()
        });

    generate_forecast(&inputs).unwrap().into_weeks()
}

#[test]
fn test_actual_replaces_projection_in_cumulative_profit() {
    let projections = create_projections(2);
    assert_eq!(projections[1].cumulative_profit, 600.0);

    let actuals = vec![WeeklyActual::new(1, 900.0, 400.0)];
    let reconciled = reconcile(&projections, &actuals);

    assert_eq!(reconciled.weeks[0].source, WeekSource::Actual);
    assert_eq!(reconciled.weeks[0].profit, 500.0);
    assert_eq!(reconciled.weeks[1].source, WeekSource::Projected);
    assert_eq!(reconciled.weeks[1].profit, 300.0);
    assert_eq!(reconciled.weeks[1].cumulative_profit, 800.0);
    assert!(reconciled.issues.is_empty());
}

#[test]
fn test_cumulative_matches_naive_rederivation() {
    let projections = create_projections(10);
    let reconciler = ActualsReconciler::with_actuals(
        &projections,
        vec![
            WeeklyActual::new(2, 1200.0, 650.0),
            WeeklyActual::new(5, 300.0, 900.0),
            WeeklyActual::new(6, 1010.5, 702.25),
        ],
    );
    let reconciled = reconciler.reconcile();

    for week in 1..=10 {
        let naive = reconciler.cumulative_profit_at(week).unwrap();
        assert_eq!(reconciled.week(week).unwrap().cumulative_profit, naive);
    }
    assert_eq!(
        reconciled.cumulative_profit_series().len(),
        projections.len()
    );
}

#[test]
fn test_cumulative_profit_at_out_of_range() {
    let projections = create_projections(3);
    let reconciler = ActualsReconciler::new(&projections);

    assert!(matches!(
        reconciler.cumulative_profit_at(0),
        Err(ForecastError::WeekOutOfRange { week: 0, horizon: 3 })
    ));
    assert!(matches!(
        reconciler.cumulative_profit_at(4),
        Err(ForecastError::WeekOutOfRange { week: 4, horizon: 3 })
    ));
}

#[test]
fn test_out_of_horizon_actual_is_reported() {
    let projections = create_projections(3);
    let actuals = vec![
        WeeklyActual::new(0, 1.0, 1.0),
        WeeklyActual::new(2, 2000.0, 500.0),
        WeeklyActual::new(9, 5000.0, 0.0),
    ];
    let reconciled = reconcile(&projections, &actuals);

    assert_eq!(
        reconciled.issues,
        vec![
            ReconciliationIssue::OutOfHorizon { week: 0, horizon: 3 },
            ReconciliationIssue::OutOfHorizon { week: 9, horizon: 3 },
        ]
    );

    // In-horizon weeks are unaffected
    assert_eq!(reconciled.weeks.len(), 3);
    assert_eq!(reconciled.weeks[0].profit, 300.0);
    assert_eq!(reconciled.weeks[1].profit, 1500.0);
    assert_eq!(reconciled.weeks[2].cumulative_profit, 2100.0);
    assert_eq!(reconciled.totals.actual_weeks, 1);
}

#[test]
fn test_last_submitted_actual_wins() {
    let projections = create_projections(2);
    let mut reconciler = ActualsReconciler::new(&projections);

    assert_eq!(reconciler.record(WeeklyActual::new(1, 800.0, 600.0)), None);
    assert_eq!(
        reconciler.record(WeeklyActual::new(1, 950.0, 500.0)),
        Some(ReconciliationIssue::Replaced { week: 1 })
    );

    assert_eq!(reconciler.actual(1).unwrap().revenue, 950.0);
    assert_eq!(reconciler.actuals().count(), 1);

    let reconciled = reconciler.reconcile();
    assert_eq!(reconciled.weeks[0].profit, 450.0);
    assert_eq!(reconciled.issues, vec![ReconciliationIssue::Replaced { week: 1 }]);
    assert_eq!(reconciled.issues[0].week(), 1);
}

#[test]
fn test_totals_partition_actual_and_projected_weeks() {
    let projections = create_projections(4);
    let actuals = vec![
        WeeklyActual::new(1, 1100.0, 650.0),
        WeeklyActual::new(3, 900.0, 720.0),
    ];
    let totals = reconcile(&projections, &actuals).totals;

    assert_eq!(totals.actual_weeks, 2);
    assert_eq!(totals.projected_weeks, 2);
    assert_eq!(totals.actual_revenue, 2000.0);
    assert_eq!(totals.actual_cost, 1370.0);
    assert_eq!(totals.actual_profit, 630.0);
    assert_eq!(totals.projected_remaining_revenue, 2000.0);
    assert_eq!(totals.projected_remaining_cost, 1400.0);
    assert_eq!(totals.projected_remaining_profit, 600.0);
    assert_eq!(totals.combined_revenue, 4000.0);
    assert_eq!(totals.combined_cost, 2770.0);
    assert_eq!(totals.combined_profit, 1230.0);
}

#[test]
fn test_reconciled_week_keeps_projection_for_variance() {
    let projections = create_projections(1);
    let mut actual = WeeklyActual::new(1, 1250.0, 640.0);
    actual.visitors = Some(118.0);

    let reconciled = reconcile(&projections, &[actual]);
    let week = &reconciled.weeks[0];

    assert!(week.is_actual());
    assert_eq!(week.visitors, 118.0);
    assert_eq!(week.projected_revenue, 1000.0);
    assert_eq!(week.revenue_variance(), 250.0);
    assert_eq!(week.cost_variance(), -60.0);
    assert_eq!(week.profit_variance(), 310.0);
}

#[test]
fn test_no_actuals_reproduces_projection() {
    let projections = create_projections(5);
    let reconciled = reconcile(&projections, &[]);

    for (projection, week) in projections.iter().zip(&reconciled.weeks) {
        assert_eq!(week.source, WeekSource::Projected);
        assert_eq!(week.cumulative_profit, projection.cumulative_profit);
        assert_eq!(week.visitors, projection.visitors);
    }
    assert_eq!(reconciled.totals.actual_weeks, 0);
}

#[test]
fn test_weeks_are_matched_by_number_not_position() {
    let projections = create_projections(5);
    // Weeks 3..=5 only
    let later_weeks = &projections[2..];
    let mut reconciler = ActualsReconciler::new(later_weeks);

    assert_eq!(reconciler.horizon(), 5);
    assert_eq!(
        reconciler.record(WeeklyActual::new(1, 900.0, 400.0)),
        Some(ReconciliationIssue::OutOfHorizon { week: 1, horizon: 5 })
    );
    assert_eq!(reconciler.record(WeeklyActual::new(3, 1500.0, 700.0)), None);

    let reconciled = reconciler.reconcile();
    assert_eq!(reconciled.weeks.len(), 3);
    assert_eq!(reconciled.week(3).unwrap().source, WeekSource::Actual);
    assert_eq!(reconciled.week(3).unwrap().cumulative_profit, 800.0);
    assert_eq!(reconciled.week(5).unwrap().cumulative_profit, 1400.0);
    assert!(reconciled.week(1).is_none());

    for week in 3..=5 {
        assert_eq!(
            reconciler.cumulative_profit_at(week).unwrap(),
            reconciled.week(week).unwrap().cumulative_profit
        );
    }
    assert!(matches!(
        reconciler.cumulative_profit_at(2),
        Err(ForecastError::WeekOutOfRange { week: 2, horizon: 5 })
    ));
}
