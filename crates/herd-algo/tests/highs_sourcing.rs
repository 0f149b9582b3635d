//! End-to-end sourcing solves with HiGHS.

#![cfg(feature = "solver-highs")]

mod common;

use common::{single_lane, two_zone_network, SINGLE_LANE_MEAT_PRICE, SINGLE_LANE_NET_VALUE};
use herd_algo::{run_sourcing, verify_plan, FleetConfig, HighsSolver, SourcingConfig, SourcingRun};
use herd_core::TableKind;
use herd_solver_common::SolveStatus;

fn config() -> SourcingConfig {
    SourcingConfig::default().with_time_budget(30.0)
}

#[test]
fn test_single_lane_optimum() {
    let outcome = run_sourcing(
        &single_lane().build(),
        SINGLE_LANE_MEAT_PRICE,
        config(),
        &HighsSolver::new(),
    )
    .unwrap();

    assert_eq!(outcome.status(), SolveStatus::Optimal);
    let report = &outcome.report;
    assert!((report.breakdown.net_value - SINGLE_LANE_NET_VALUE).abs() < 1e-3);
    assert!(report.breakdown.consistent);

    let row = &report.plan[0];
    assert_eq!(row.integrated_head, 10);
    assert_eq!(row.purchased_head, 0);
    assert_eq!(row.integrated_trips, 1);
    assert_eq!(report.plant_weeks[0].outbound_trips, 1);
    assert!(outcome.violations.is_empty());
}

#[test]
fn test_demand_beyond_supply_is_infeasible() {
    let tables = single_lane()
        .cleared(TableKind::Demand)
        .row(TableKind::Demand, &["27.2025"], 25.0)
        .build();
    let outcome = run_sourcing(&tables, SINGLE_LANE_MEAT_PRICE, config(), &HighsSolver::new()).unwrap();

    assert_eq!(outcome.status(), SolveStatus::Infeasible);
    assert!(outcome.report.plan.is_empty());
    assert_eq!(outcome.report.breakdown.net_value, 0.0);
}

#[test]
fn test_two_zone_plan_satisfies_every_rule() {
    let run = SourcingRun::prepare(&two_zone_network().build(), 22_000.0, config()).unwrap();
    let outcome = run.execute(&HighsSolver::new()).unwrap();
    assert_eq!(outcome.status(), SolveStatus::Optimal);
    assert!(outcome.violations.is_empty());

    let report = &outcome.report;
    for week in &report.weeks {
        assert_eq!(week.total_head as f64, week.demand);
    }
    for pw in &report.plant_weeks {
        assert!(pw.head as f64 <= pw.capacity);
        assert!(pw.head <= 84 * pw.outbound_trips);
    }
    for row in &report.plan {
        assert!(row.integrated_head <= 14 * row.integrated_trips);
        assert!(row.purchased_head <= 14 * row.purchased_trips);
    }
    assert!(report.breakdown.consistent);
}

#[test]
fn test_smaller_trucks_need_more_trips() {
    let fleet = FleetConfig {
        head_per_inbound_trip: 3,
        head_per_outbound_trip: 84,
    };
    let run = SourcingRun::prepare(
        &single_lane().build(),
        SINGLE_LANE_MEAT_PRICE,
        config().with_fleet(fleet),
    )
    .unwrap();
    let outcome = run.execute(&HighsSolver::new()).unwrap();

    assert_eq!(outcome.status(), SolveStatus::Optimal);
    // ceil(10 / 3)
    assert_eq!(outcome.report.plan[0].integrated_trips, 4);
    assert!((outcome.report.breakdown.net_value - (SINGLE_LANE_NET_VALUE - 1_500_000.0)).abs() < 1e-3);
    assert!(verify_plan(run.model(), &Default::default(), 1e-6)
        .iter()
        .any(|v| v.key == "27.2025"));
}
