//! Result aggregation: plan rows, cost lines and drill-down rollups.
//!
//! Everything here is a pure function of the solved assignment, the parameter
//! maps and the run's meat price. A variable without a value counts as zero.
//! Head and trip counts are read as rounded integers, and every cost figure is
//! computed from those integers, so the finer rollups always re-sum to the
//! coarser ones.

use herd_core::{PlantId, WeekId, ZoneId};
use herd_solver_common::{Assignment, SolveOutcome, SolveStatus};
use serde::{Deserialize, Serialize};

use super::builder::SourcingModel;
use super::data::SourcingData;

/// Head routed through one (zone, plant, week) lane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRow {
    pub week: WeekId,
    pub zone: ZoneId,
    pub plant: PlantId,
    pub integrated_head: u64,
    pub purchased_head: u64,
    pub total_head: u64,
    pub integrated_trips: u64,
    pub purchased_trips: u64,
}

/// Global cost and revenue lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub integrated_sourcing_cost: f64,
    pub purchased_sourcing_cost: f64,
    /// Integrated plus purchased sourcing.
    pub sourcing_cost: f64,
    pub slaughter_cost: f64,
    pub inbound_transport_cost: f64,
    pub outbound_transport_cost: f64,
    pub meat_revenue: f64,
    /// Revenue minus every cost line.
    pub net_value: f64,
    /// Model objective at the solved assignment, as carried on the outcome.
    pub solver_objective: Option<f64>,
    /// Whether `net_value` matches `solver_objective` within tolerance.
    ///
    /// This compares the builder's objective coefficients with the cost lines
    /// recomputed here from the parameter tables.
    pub consistent: bool,
}

impl CostBreakdown {
    pub fn transport_cost(&self) -> f64 {
        self.inbound_transport_cost + self.outbound_transport_cost
    }

    pub fn total_cost(&self) -> f64 {
        self.sourcing_cost + self.slaughter_cost + self.transport_cost()
    }

    /// Named lines in reporting order.
    pub fn line_items(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("integrated sourcing", self.integrated_sourcing_cost),
            ("purchased sourcing", self.purchased_sourcing_cost),
            ("sourcing", self.sourcing_cost),
            ("slaughter", self.slaughter_cost),
            ("inbound transport", self.inbound_transport_cost),
            ("outbound transport", self.outbound_transport_cost),
            ("meat revenue", self.meat_revenue),
            ("net value", self.net_value),
        ]
    }
}

/// Head and cost totals for any slice of the plan.
///
/// `total_cost` is sourcing plus inbound transport. Slaughter is carried
/// separately and is not part of it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourcingTotals {
    pub integrated_head: u64,
    pub purchased_head: u64,
    pub total_head: u64,
    pub integrated_trips: u64,
    pub purchased_trips: u64,
    pub integrated_sourcing_cost: f64,
    pub purchased_sourcing_cost: f64,
    pub sourcing_cost: f64,
    pub transport_cost: f64,
    pub total_cost: f64,
    pub slaughter_cost: f64,
    pub meat_revenue: f64,
}

impl SourcingTotals {
    fn add(&mut self, lane: &LaneFigures) {
        self.integrated_head = self.integrated_head.saturating_add(lane.integrated_head);
        self.purchased_head = self.purchased_head.saturating_add(lane.purchased_head);
        self.total_head = self.total_head.saturating_add(lane.head());
        self.integrated_trips = self.integrated_trips.saturating_add(lane.integrated_trips);
        self.purchased_trips = self.purchased_trips.saturating_add(lane.purchased_trips);
        self.integrated_sourcing_cost += lane.integrated_cost;
        self.purchased_sourcing_cost += lane.purchased_cost;
        self.sourcing_cost += lane.integrated_cost + lane.purchased_cost;
        self.transport_cost += lane.transport_cost;
        self.total_cost += lane.integrated_cost + lane.purchased_cost + lane.transport_cost;
        self.slaughter_cost += lane.slaughter_cost;
        self.meat_revenue += lane.revenue;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneRollup {
    pub zone: ZoneId,
    #[serde(flatten)]
    pub totals: SourcingTotals,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneWeekRollup {
    pub zone: ZoneId,
    pub week: WeekId,
    #[serde(flatten)]
    pub totals: SourcingTotals,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZonePlantRollup {
    pub zone: ZoneId,
    pub plant: PlantId,
    #[serde(flatten)]
    pub totals: SourcingTotals,
}

/// Throughput of one plant in one week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantWeekRollup {
    pub plant: PlantId,
    pub week: WeekId,
    pub head: u64,
    pub capacity: f64,
    /// `head / capacity`, or zero for a plant without capacity.
    pub utilization: f64,
    pub slaughter_cost: f64,
    pub outbound_trips: u64,
    pub outbound_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantRollup {
    pub plant: PlantId,
    pub head: u64,
    pub slaughter_cost: f64,
    pub outbound_trips: u64,
    pub outbound_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekRollup {
    pub week: WeekId,
    pub demand: f64,
    pub integrated_head: u64,
    pub purchased_head: u64,
    pub total_head: u64,
    pub sourcing_cost: f64,
    pub slaughter_cost: f64,
    pub inbound_transport_cost: f64,
    pub outbound_transport_cost: f64,
    pub meat_revenue: f64,
    pub net_value: f64,
}

/// Structured result of one sourcing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcingReport {
    pub status: SolveStatus,
    /// False for a timed-out incumbent; such a plan may not be the best one.
    pub proven_optimal: bool,
    pub meat_price: f64,
    /// Lanes with positive head, ordered by week, zone, plant.
    pub plan: Vec<AllocationRow>,
    pub breakdown: CostBreakdown,
    /// One entry per zone, including zones that supplied nothing.
    pub zones: Vec<ZoneRollup>,
    pub zone_weeks: Vec<ZoneWeekRollup>,
    pub zone_plants: Vec<ZonePlantRollup>,
    pub plants: Vec<PlantRollup>,
    /// One entry per (plant, week).
    pub plant_weeks: Vec<PlantWeekRollup>,
    pub weeks: Vec<WeekRollup>,
}

impl SourcingReport {
    /// A report with no plan and zeroed lines, for runs without a solution.
    pub fn empty(status: SolveStatus, meat_price: f64) -> Self {
        Self {
            status,
            proven_optimal: false,
            meat_price,
            plan: Vec::new(),
            breakdown: CostBreakdown {
                consistent: true,
                ..CostBreakdown::default()
            },
            zones: Vec::new(),
            zone_weeks: Vec::new(),
            zone_plants: Vec::new(),
            plants: Vec::new(),
            plant_weeks: Vec::new(),
            weeks: Vec::new(),
        }
    }

    pub fn has_plan(&self) -> bool {
        self.status.has_solution()
    }

    pub fn total_head(&self) -> u64 {
        self.plan
            .iter()
            .fold(0u64, |acc, row| acc.saturating_add(row.total_head))
    }

    /// Format a human-readable summary
    pub fn summary(&self) -> String {
        let b = &self.breakdown;
        let mut s = String::new();
        s.push_str(&format!("Sourcing Plan Summary\n{}\n", "=".repeat(40)));
        s.push_str(&format!("Status: {}", self.status));
        if self.status.has_solution() && !self.proven_optimal {
            s.push_str(" (not proven optimal)");
        }
        s.push('\n');
        if !self.has_plan() {
            s.push_str("No feasible plan.\n");
            return s;
        }
        s.push_str(&format!("Net Value: {:.2}\n", b.net_value));
        s.push_str(&format!("  Meat Revenue: {:.2}\n", b.meat_revenue));
        s.push_str(&format!("  Sourcing: {:.2}\n", b.sourcing_cost));
        s.push_str(&format!("  Slaughter: {:.2}\n", b.slaughter_cost));
        s.push_str(&format!(
            "  Transport: {:.2} (inbound {:.2}, outbound {:.2})\n",
            b.transport_cost(),
            b.inbound_transport_cost,
            b.outbound_transport_cost
        ));
        s.push_str(&format!(
            "Head Allocated: {} across {} lanes\n",
            self.total_head(),
            self.plan.len()
        ));
        if let Some(objective) = b.solver_objective {
            s.push_str(&format!("Solver Objective: {:.2}", objective));
            if !b.consistent {
                s.push_str(" [MISMATCH]");
            }
            s.push('\n');
        }
        s
    }
}

/// Per-lane integer quantities and the money they move.
#[derive(Debug, Clone, Copy, Default)]
struct LaneFigures {
    integrated_head: u64,
    purchased_head: u64,
    integrated_trips: u64,
    purchased_trips: u64,
    integrated_cost: f64,
    purchased_cost: f64,
    slaughter_cost: f64,
    transport_cost: f64,
    revenue: f64,
}

impl LaneFigures {
    fn read(model: &SourcingModel, assignment: &Assignment, z: usize, p: usize, t: usize) -> Self {
        let data: &SourcingData = &model.data;
        let layout = &model.layout;
        let zone = &data.sets.zones[z];
        let plant = &data.sets.plants[p];

        let integrated_head = assignment.integer_value(layout.alloc_integrated(z, p, t));
        let purchased_head = assignment.integer_value(layout.alloc_purchased(z, p, t));
        let integrated_trips = assignment.integer_value(layout.trips_integrated(z, p, t));
        let purchased_trips = assignment.integer_value(layout.trips_purchased(z, p, t));
        let head = integrated_head.saturating_add(purchased_head) as f64;

        Self {
            integrated_head,
            purchased_head,
            integrated_trips,
            purchased_trips,
            integrated_cost: integrated_head as f64 * data.integrated_price(zone),
            purchased_cost: purchased_head as f64 * data.purchased_price(zone),
            slaughter_cost: head * data.slaughter_cost(plant),
            transport_cost: integrated_trips as f64 * data.integrated_lane_cost(zone, plant)
                + purchased_trips as f64 * data.purchased_lane_cost(zone, plant),
            revenue: head * data.revenue_per_head(zone, plant),
        }
    }

    /// Head on the lane across both channels. Saturates on absurd solver values.
    fn head(&self) -> u64 {
        self.integrated_head.saturating_add(self.purchased_head)
    }

    fn has_head(&self) -> bool {
        self.head() > 0
    }

    fn has_activity(&self) -> bool {
        self.has_head() || self.integrated_trips > 0 || self.purchased_trips > 0
    }
}

/// Whether `a` and `b` agree to within `tolerance`, relative to their magnitude.
fn within_tolerance(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance * a.abs().max(b.abs()).max(1.0)
}

/// Aggregate a solved model into a [`SourcingReport`].
///
/// Outcomes without a solution (infeasible, unbounded) give
/// [`SourcingReport::empty`]. A timed-out incumbent is aggregated like an
/// optimal one but flagged `proven_optimal = false`.
pub fn aggregate(model: &SourcingModel, outcome: &SolveOutcome, tolerance: f64) -> SourcingReport {
    let data = &model.data;
    if !outcome.status.has_solution() {
        return SourcingReport::empty(outcome.status, data.meat_price);
    }

    let sets = &data.sets;
    let (nz, np, nt) = (sets.zones.len(), sets.plants.len(), sets.weeks.len());
    let assignment = &outcome.assignment;

    let mut zone_totals = vec![SourcingTotals::default(); nz];
    let mut zone_week = vec![SourcingTotals::default(); nz * nt];
    let mut zone_plant = vec![SourcingTotals::default(); nz * np];
    let mut week_totals = vec![SourcingTotals::default(); nt];
    let mut plant_week_head = vec![0u64; np * nt];
    let mut plant_week_slaughter = vec![0.0; np * nt];
    let mut plan = Vec::new();

    if !model.is_degenerate() {
        for t in 0..nt {
            for z in 0..nz {
                for p in 0..np {
                    let lane = LaneFigures::read(model, assignment, z, p, t);
                    if !lane.has_activity() {
                        continue;
                    }
                    zone_totals[z].add(&lane);
                    zone_week[z * nt + t].add(&lane);
                    zone_plant[z * np + p].add(&lane);
                    week_totals[t].add(&lane);
                    let cell = &mut plant_week_head[p * nt + t];
                    *cell = cell.saturating_add(lane.head());
                    plant_week_slaughter[p * nt + t] += lane.slaughter_cost;

                    if lane.has_head() {
                        plan.push(AllocationRow {
                            week: sets.weeks[t].clone(),
                            zone: sets.zones[z].clone(),
                            plant: sets.plants[p].clone(),
                            integrated_head: lane.integrated_head,
                            purchased_head: lane.purchased_head,
                            total_head: lane.head(),
                            integrated_trips: lane.integrated_trips,
                            purchased_trips: lane.purchased_trips,
                        });
                    }
                }
            }
        }
    }
    // Weeks, then zones, then plants; identifiers sort as text.
    plan.sort_by(|a, b| {
        (a.week.as_str(), a.zone.as_str(), a.plant.as_str()).cmp(&(
            b.week.as_str(),
            b.zone.as_str(),
            b.plant.as_str(),
        ))
    });

    let mut plant_weeks = Vec::with_capacity(np * nt);
    let mut plants = Vec::with_capacity(np);
    let mut week_outbound = vec![0.0; nt];
    for (p, plant) in sets.plants.iter().enumerate() {
        let capacity = data.capacity(plant);
        let outbound_rate = data.outbound_cost(plant);
        let mut rollup = PlantRollup {
            plant: plant.clone(),
            head: 0,
            slaughter_cost: 0.0,
            outbound_trips: 0,
            outbound_cost: 0.0,
        };
        for (t, week) in sets.weeks.iter().enumerate() {
            let head = plant_week_head[p * nt + t];
            let outbound_trips = if model.is_degenerate() {
                0
            } else {
                assignment.integer_value(model.layout.trips_outbound(p, t))
            };
            let outbound_cost = outbound_trips as f64 * outbound_rate;
            let slaughter_cost = plant_week_slaughter[p * nt + t];

            rollup.head = rollup.head.saturating_add(head);
            rollup.slaughter_cost += slaughter_cost;
            rollup.outbound_trips = rollup.outbound_trips.saturating_add(outbound_trips);
            rollup.outbound_cost += outbound_cost;
            week_outbound[t] += outbound_cost;

            plant_weeks.push(PlantWeekRollup {
                plant: plant.clone(),
                week: week.clone(),
                head,
                capacity,
                utilization: if capacity > 0.0 { head as f64 / capacity } else { 0.0 },
                slaughter_cost,
                outbound_trips,
                outbound_cost,
            });
        }
        plants.push(rollup);
    }

    let weeks: Vec<WeekRollup> = sets
        .weeks
        .iter()
        .enumerate()
        .map(|(t, week)| {
            let totals = &week_totals[t];
            WeekRollup {
                week: week.clone(),
                demand: data.demand(week),
                integrated_head: totals.integrated_head,
                purchased_head: totals.purchased_head,
                total_head: totals.total_head,
                sourcing_cost: totals.sourcing_cost,
                slaughter_cost: totals.slaughter_cost,
                inbound_transport_cost: totals.transport_cost,
                outbound_transport_cost: week_outbound[t],
                meat_revenue: totals.meat_revenue,
                net_value: totals.meat_revenue
                    - totals.sourcing_cost
                    - totals.slaughter_cost
                    - totals.transport_cost
                    - week_outbound[t],
            }
        })
        .collect();

    let breakdown = breakdown(&zone_totals, &plants, outcome.objective, tolerance);

    let zones = sets
        .zones
        .iter()
        .zip(zone_totals)
        .map(|(zone, totals)| ZoneRollup {
            zone: zone.clone(),
            totals,
        })
        .collect();

    let mut zone_weeks = Vec::new();
    let mut zone_plants = Vec::new();
    for (z, zone) in sets.zones.iter().enumerate() {
        for (t, week) in sets.weeks.iter().enumerate() {
            let totals = &zone_week[z * nt + t];
            if totals.total_head > 0 || totals.transport_cost != 0.0 {
                zone_weeks.push(ZoneWeekRollup {
                    zone: zone.clone(),
                    week: week.clone(),
                    totals: totals.clone(),
                });
            }
        }
        for (p, plant) in sets.plants.iter().enumerate() {
            let totals = &zone_plant[z * np + p];
            if totals.total_head > 0 || totals.transport_cost != 0.0 {
                zone_plants.push(ZonePlantRollup {
                    zone: zone.clone(),
                    plant: plant.clone(),
                    totals: totals.clone(),
                });
            }
        }
    }

    SourcingReport {
        status: outcome.status,
        proven_optimal: outcome.status.is_proven_optimal(),
        meat_price: data.meat_price,
        plan,
        breakdown,
        zones,
        zone_weeks,
        zone_plants,
        plants,
        plant_weeks,
        weeks,
    }
}

fn breakdown(
    zones: &[SourcingTotals],
    plants: &[PlantRollup],
    solver_objective: Option<f64>,
    tolerance: f64,
) -> CostBreakdown {
    let mut b = CostBreakdown::default();
    for totals in zones {
        b.integrated_sourcing_cost += totals.integrated_sourcing_cost;
        b.purchased_sourcing_cost += totals.purchased_sourcing_cost;
        b.slaughter_cost += totals.slaughter_cost;
        b.inbound_transport_cost += totals.transport_cost;
        b.meat_revenue += totals.meat_revenue;
    }
    b.outbound_transport_cost = plants.iter().map(|p| p.outbound_cost).sum();
    b.sourcing_cost = b.integrated_sourcing_cost + b.purchased_sourcing_cost;
    b.net_value = b.meat_revenue - b.total_cost();
    b.solver_objective = solver_objective;
    b.consistent = solver_objective.map_or(true, |obj| within_tolerance(b.net_value, obj, tolerance));
    b
}
