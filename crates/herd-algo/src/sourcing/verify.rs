//! Independent feasibility check of a solved plan.
//!
//! Recomputes each sourcing rule from the integer-rounded assignment rather
//! than trusting the backend's row activities.

use std::fmt;

use herd_solver_common::{Assignment, VarId};
use serde::{Deserialize, Serialize};

use super::builder::SourcingModel;

/// Which rule a plan breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Weekly head differs from demand.
    Demand,
    IntegratedSupply,
    PurchaseSupply,
    Capacity,
    /// Integrated head exceeds what the integrated trips can carry.
    InboundIntegrated,
    InboundPurchased,
    /// Plant output exceeds what the outbound trips can carry.
    Outbound,
}

/// One broken rule: `lhs` should relate to `rhs` as the rule says but does not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanViolation {
    pub kind: ViolationKind,
    /// Dimension members the rule applies to, e.g. `COSTA,27.2025`.
    pub key: String,
    pub lhs: f64,
    pub rhs: f64,
}

impl fmt::Display for PlanViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = if self.kind == ViolationKind::Demand { "==" } else { "<=" };
        write!(
            f,
            "{:?}[{}]: {} {} {} does not hold",
            self.kind, self.key, self.lhs, op, self.rhs
        )
    }
}

/// Check `assignment` against every sourcing rule of `model`.
///
/// Returns an empty list for a plan that meets demand exactly and stays within
/// supply, capacity and trip limits.
pub fn verify_plan(model: &SourcingModel, assignment: &Assignment, tolerance: f64) -> Vec<PlanViolation> {
    let mut violations = Vec::new();
    let data = &model.data;
    let sets = &data.sets;
    let layout = &model.layout;
    let (nz, np) = (sets.zones.len(), sets.plants.len());
    let inbound = f64::from(model.fleet.head_per_inbound_trip);
    let outbound = f64::from(model.fleet.head_per_outbound_trip);
    let live = !model.is_degenerate();

    let value = |var: VarId| assignment.integer_value(var) as f64;

    for (t, week) in sets.weeks.iter().enumerate() {
        let mut served = 0.0;
        if live {
            for z in 0..nz {
                for p in 0..np {
                    served += value(layout.alloc_integrated(z, p, t)) + value(layout.alloc_purchased(z, p, t));
                }
            }
        }
        let demand = data.demand(week);
        if (served - demand).abs() > tolerance {
            violations.push(PlanViolation {
                kind: ViolationKind::Demand,
                key: week.to_string(),
                lhs: served,
                rhs: demand,
            });
        }
    }

    if !live {
        return violations;
    }

    let mut check_le = |kind: ViolationKind, key: String, lhs: f64, rhs: f64| {
        if lhs > rhs + tolerance {
            violations.push(PlanViolation { kind, key, lhs, rhs });
        }
    };

    for (z, zone) in sets.zones.iter().enumerate() {
        for (t, week) in sets.weeks.iter().enumerate() {
            let integrated: f64 = (0..np).map(|p| value(layout.alloc_integrated(z, p, t))).sum();
            let purchased: f64 = (0..np).map(|p| value(layout.alloc_purchased(z, p, t))).sum();
            check_le(
                ViolationKind::IntegratedSupply,
                format!("{zone},{week}"),
                integrated,
                data.integrated_supply(zone, week),
            );
            check_le(
                ViolationKind::PurchaseSupply,
                format!("{zone},{week}"),
                purchased,
                data.purchase_supply(zone, week),
            );
        }
    }

    for (p, plant) in sets.plants.iter().enumerate() {
        for (t, week) in sets.weeks.iter().enumerate() {
            let head: f64 = (0..nz)
                .map(|z| value(layout.alloc_integrated(z, p, t)) + value(layout.alloc_purchased(z, p, t)))
                .sum();
            check_le(ViolationKind::Capacity, format!("{plant},{week}"), head, data.capacity(plant));
            check_le(
                ViolationKind::Outbound,
                format!("{plant},{week}"),
                head,
                outbound * value(layout.trips_outbound(p, t)),
            );
        }
    }

    for (z, zone) in sets.zones.iter().enumerate() {
        for (p, plant) in sets.plants.iter().enumerate() {
            for (t, week) in sets.weeks.iter().enumerate() {
                let key = format!("{zone},{plant},{week}");
                check_le(
                    ViolationKind::InboundIntegrated,
                    key.clone(),
                    value(layout.alloc_integrated(z, p, t)),
                    inbound * value(layout.trips_integrated(z, p, t)),
                );
                check_le(
                    ViolationKind::InboundPurchased,
                    key,
                    value(layout.alloc_purchased(z, p, t)),
                    inbound * value(layout.trips_purchased(z, p, t)),
                );
            }
        }
    }

    violations
}
