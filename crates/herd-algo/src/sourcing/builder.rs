//! Model builder: sets and parameters in, MILP out.

use herd_core::{InputTables, PlantId, WeekId, ZoneId};
use herd_solver_common::{CmpOp, Constraint, LinearExpr, MilpModel, Sense, VarDef, VarId};
use tracing::{debug, warn};

use super::config::FleetConfig;
use super::data::{Dimension, SourcingData};
use super::error::{SourcingError, SourcingResult};

/// Position of every decision variable in the model.
///
/// Variables are declared block by block, so a variable's id follows from its
/// block and its (zone, plant, week) or (plant, week) position:
///
/// ```text
/// [ alloc_integrated | alloc_purchased | trips_integrated | trips_purchased | trips_outbound ]
///   Z·P·T              Z·P·T             Z·P·T              Z·P·T             P·T
/// ```
///
/// Within a lane block the index of `(z, p, t)` is `(z·P + p)·T + t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableLayout {
    zones: usize,
    plants: usize,
    weeks: usize,
}

impl VariableLayout {
    pub fn new(zones: usize, plants: usize, weeks: usize) -> Self {
        Self {
            zones,
            plants,
            weeks,
        }
    }

    fn lanes(&self) -> usize {
        self.zones * self.plants * self.weeks
    }

    fn lane(&self, z: usize, p: usize, t: usize) -> usize {
        debug_assert!(z < self.zones && p < self.plants && t < self.weeks);
        (z * self.plants + p) * self.weeks + t
    }

    pub fn alloc_integrated(&self, z: usize, p: usize, t: usize) -> VarId {
        VarId(self.lane(z, p, t))
    }

    pub fn alloc_purchased(&self, z: usize, p: usize, t: usize) -> VarId {
        VarId(self.lanes() + self.lane(z, p, t))
    }

    pub fn trips_integrated(&self, z: usize, p: usize, t: usize) -> VarId {
        VarId(2 * self.lanes() + self.lane(z, p, t))
    }

    pub fn trips_purchased(&self, z: usize, p: usize, t: usize) -> VarId {
        VarId(3 * self.lanes() + self.lane(z, p, t))
    }

    pub fn trips_outbound(&self, p: usize, t: usize) -> VarId {
        debug_assert!(p < self.plants && t < self.weeks);
        VarId(4 * self.lanes() + p * self.weeks + t)
    }

    pub fn num_variables(&self) -> usize {
        4 * self.lanes() + self.plants * self.weeks
    }
}

/// A built sourcing model together with the data it was built from.
#[derive(Debug, Clone)]
pub struct SourcingModel {
    pub data: SourcingData,
    pub layout: VariableLayout,
    pub fleet: FleetConfig,
    pub milp: MilpModel,
    empty_sets: Vec<Dimension>,
}

impl SourcingModel {
    /// Dimensions that had no members when the model was built.
    pub fn empty_sets(&self) -> &[Dimension] {
        &self.empty_sets
    }

    /// True when some dimension is empty and the model has no variables.
    pub fn is_degenerate(&self) -> bool {
        !self.empty_sets.is_empty()
    }
}

/// Build the sourcing MILP from `tables`.
///
/// A missing required table fails with `MissingParameterTable` before any
/// variable is declared. An empty index set is not an error: it is logged and
/// yields a model with no variables and an empty objective.
pub fn build_model(
    tables: &InputTables,
    meat_price: f64,
    fleet: FleetConfig,
) -> SourcingResult<SourcingModel> {
    if !meat_price.is_finite() {
        return Err(SourcingError::Config(format!(
            "meat price must be finite, got {meat_price}"
        )));
    }
    if fleet.head_per_inbound_trip == 0 || fleet.head_per_outbound_trip == 0 {
        return Err(SourcingError::Config(
            "fleet trip capacities must be at least one head".to_string(),
        ));
    }

    let data = SourcingData::from_tables(tables, meat_price)?;
    Ok(build_from_data(data, fleet))
}

pub(crate) fn build_from_data(data: SourcingData, fleet: FleetConfig) -> SourcingModel {
    let empty_sets = data.sets.empty_dimensions();
    for dim in &empty_sets {
        warn!(dimension = %dim, "index set is empty; model has no variables");
    }

    let sets = &data.sets;
    let (nz, np, nt) = (sets.zones.len(), sets.plants.len(), sets.weeks.len());
    let layout = VariableLayout::new(nz, np, nt);
    let mut milp = MilpModel::new("livestock_sourcing", Sense::Maximize);

    if empty_sets.is_empty() {
        declare_variables(&mut milp, &data);
        debug_assert_eq!(milp.num_variables(), layout.num_variables());

        milp.objective = objective(&data, &layout);
        add_demand_constraints(&mut milp, &data, &layout);
        add_supply_constraints(&mut milp, &data, &layout);
        add_plant_constraints(&mut milp, &data, &layout, fleet);
        add_inbound_linkage(&mut milp, &data, &layout, fleet);
    } else {
        // No variables, but weekly demand still has to be met by nothing.
        for week in &data.sets.weeks {
            milp.add_constraint(Constraint::new(
                format!("demand[{week}]"),
                LinearExpr::new(),
                CmpOp::Eq,
                data.demand(week),
            ));
        }
    }

    debug!(
        zones = nz,
        plants = np,
        weeks = nt,
        variables = milp.num_variables(),
        constraints = milp.num_constraints(),
        "built sourcing model"
    );

    SourcingModel {
        data,
        layout,
        fleet,
        milp,
        empty_sets,
    }
}

fn lane_name(block: &str, zone: &ZoneId, plant: &PlantId, week: &WeekId) -> String {
    format!("{block}[{zone},{plant},{week}]")
}

fn declare_variables(milp: &mut MilpModel, data: &SourcingData) {
    let sets = &data.sets;
    for block in ["alloc_integrated", "alloc_purchased", "trips_integrated", "trips_purchased"] {
        for zone in &sets.zones {
            for plant in &sets.plants {
                for week in &sets.weeks {
                    milp.add_variable(VarDef::non_negative_integer(lane_name(block, zone, plant, week)));
                }
            }
        }
    }
    for plant in &sets.plants {
        for week in &sets.weeks {
            milp.add_variable(VarDef::non_negative_integer(format!(
                "trips_outbound[{plant},{week}]"
            )));
        }
    }
}

fn objective(data: &SourcingData, layout: &VariableLayout) -> LinearExpr {
    let sets = &data.sets;
    let mut expr = LinearExpr::new();

    for (z, zone) in sets.zones.iter().enumerate() {
        let integrated_price = data.integrated_price(zone);
        let purchased_price = data.purchased_price(zone);
        for (p, plant) in sets.plants.iter().enumerate() {
            // Margin per head before transport.
            let margin = data.revenue_per_head(zone, plant) - data.slaughter_cost(plant);
            let lane_integrated = data.integrated_lane_cost(zone, plant);
            let lane_purchased = data.purchased_lane_cost(zone, plant);
            for t in 0..sets.weeks.len() {
                expr.add_term(layout.alloc_integrated(z, p, t), margin - integrated_price);
                expr.add_term(layout.alloc_purchased(z, p, t), margin - purchased_price);
                expr.add_term(layout.trips_integrated(z, p, t), -lane_integrated);
                expr.add_term(layout.trips_purchased(z, p, t), -lane_purchased);
            }
        }
    }

    for (p, plant) in sets.plants.iter().enumerate() {
        let outbound = data.outbound_cost(plant);
        for t in 0..sets.weeks.len() {
            expr.add_term(layout.trips_outbound(p, t), -outbound);
        }
    }

    expr
}

/// Head processed at plant `p` in week `t`, both channels.
fn plant_head(layout: &VariableLayout, nz: usize, p: usize, t: usize) -> LinearExpr {
    LinearExpr::sum(
        (0..nz).flat_map(|z| [layout.alloc_integrated(z, p, t), layout.alloc_purchased(z, p, t)]),
    )
}

fn add_demand_constraints(milp: &mut MilpModel, data: &SourcingData, layout: &VariableLayout) {
    let sets = &data.sets;
    let (nz, np) = (sets.zones.len(), sets.plants.len());
    for (t, week) in sets.weeks.iter().enumerate() {
        let mut served = LinearExpr::new();
        for p in 0..np {
            served.terms.extend(plant_head(layout, nz, p, t).terms);
        }
        milp.add_constraint(Constraint::new(
            format!("demand[{week}]"),
            served,
            CmpOp::Eq,
            data.demand(week),
        ));
    }
}

fn add_supply_constraints(milp: &mut MilpModel, data: &SourcingData, layout: &VariableLayout) {
    let sets = &data.sets;
    let np = sets.plants.len();
    for (z, zone) in sets.zones.iter().enumerate() {
        for (t, week) in sets.weeks.iter().enumerate() {
            let integrated = LinearExpr::sum((0..np).map(|p| layout.alloc_integrated(z, p, t)));
            milp.add_constraint(Constraint::new(
                format!("integrated_supply[{zone},{week}]"),
                integrated,
                CmpOp::Le,
                data.integrated_supply(zone, week),
            ));

            let purchased = LinearExpr::sum((0..np).map(|p| layout.alloc_purchased(z, p, t)));
            milp.add_constraint(Constraint::new(
                format!("purchase_supply[{zone},{week}]"),
                purchased,
                CmpOp::Le,
                data.purchase_supply(zone, week),
            ));
        }
    }
}

/// Capacity and outbound trip linkage, both per (plant, week).
fn add_plant_constraints(
    milp: &mut MilpModel,
    data: &SourcingData,
    layout: &VariableLayout,
    fleet: FleetConfig,
) {
    let sets = &data.sets;
    let nz = sets.zones.len();
    let per_trip = f64::from(fleet.head_per_outbound_trip);
    for (p, plant) in sets.plants.iter().enumerate() {
        for (t, week) in sets.weeks.iter().enumerate() {
            milp.add_constraint(Constraint::new(
                format!("capacity[{plant},{week}]"),
                plant_head(layout, nz, p, t),
                CmpOp::Le,
                data.capacity(plant),
            ));

            // Σ_z head − h_out·trips ≤ 0
            let outbound = plant_head(layout, nz, p, t).with_term(layout.trips_outbound(p, t), -per_trip);
            milp.add_constraint(Constraint::new(
                format!("outbound[{plant},{week}]"),
                outbound,
                CmpOp::Le,
                0.0,
            ));
        }
    }
}

fn add_inbound_linkage(
    milp: &mut MilpModel,
    data: &SourcingData,
    layout: &VariableLayout,
    fleet: FleetConfig,
) {
    let sets = &data.sets;
    let per_trip = f64::from(fleet.head_per_inbound_trip);
    for (z, zone) in sets.zones.iter().enumerate() {
        for (p, plant) in sets.plants.iter().enumerate() {
            for (t, week) in sets.weeks.iter().enumerate() {
                let integrated = LinearExpr::new()
                    .with_term(layout.alloc_integrated(z, p, t), 1.0)
                    .with_term(layout.trips_integrated(z, p, t), -per_trip);
                milp.add_constraint(Constraint::new(
                    lane_name("inbound_integrated", zone, plant, week),
                    integrated,
                    CmpOp::Le,
                    0.0,
                ));

                let purchased = LinearExpr::new()
                    .with_term(layout.alloc_purchased(z, p, t), 1.0)
                    .with_term(layout.trips_purchased(z, p, t), -per_trip);
                milp.add_constraint(Constraint::new(
                    lane_name("inbound_purchased", zone, plant, week),
                    purchased,
                    CmpOp::Le,
                    0.0,
                ));
            }
        }
    }
}
