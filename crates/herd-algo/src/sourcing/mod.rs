//! Livestock sourcing and allocation
//!
//! This module implements a weekly sourcing MILP: how many head to take from
//! each zone, through which channel, to which plant, so that every week's
//! demand is met at the highest net value.
//!
//! ## Problem Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  LIVESTOCK SOURCING                                                      │
//! │  ──────────────────                                                      │
//! │                                                                          │
//! │  Given:                                                                  │
//! │    • Zones with integrated and open-market supply per week              │
//! │    • Plants with slaughter cost, weekly capacity, outbound trip cost    │
//! │    • Weekly demand (head) that must be met exactly                      │
//! │    • Per-trip lane costs, unit prices, live weight and yield            │
//! │                                                                          │
//! │  Decide:                                                                 │
//! │    • Head per (zone, plant, week) and channel (integer)                 │
//! │    • Inbound trips per lane and channel (integer)                       │
//! │    • Outbound trips per (plant, week) (integer)                         │
//! │                                                                          │
//! │  Maximize:                                                               │
//! │    Meat revenue − sourcing − slaughter − transport                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## MILP Formulation
//!
//! ```text
//! maximize  Σ_zpt (xI + xP)·w_z·y_zp·m − xI·cI_z − xP·cP_z − (xI + xP)·s_p
//!                 − nI·lI_zp − nP·lP_zp
//!           − Σ_pt nO_pt·o_p
//!
//! subject to:
//!   Σ_zp (xI + xP)[z,p,t] = D_t              demand, every week
//!   Σ_p  xI[z,p,t] ≤ SI_zt                   integrated availability
//!   Σ_p  xP[z,p,t] ≤ SP_zt                   purchase availability
//!   Σ_z  (xI + xP)[z,p,t] ≤ K_p              plant capacity
//!   xI ≤ h_in·nI,  xP ≤ h_in·nP              inbound trip linkage
//!   Σ_z  (xI + xP)[z,p,t] ≤ h_out·nO[p,t]    outbound trip linkage
//!   all variables ∈ ℤ≥0
//! ```
//!
//! `h_in` and `h_out` are the fleet capacities from [`FleetConfig`]
//! (14 and 84 head by default). A parameter absent from its table reads as
//! zero: a missing lane cost is a free lane, a missing supply entry is no
//! supply.

mod aggregate;
mod builder;
mod config;
mod data;
mod error;
#[cfg(feature = "solver-highs")]
mod highs;
mod run;
mod verify;

#[cfg(test)]
pub(crate) mod test_support;

pub use aggregate::{
    aggregate, AllocationRow, CostBreakdown, PlantRollup, PlantWeekRollup, SourcingReport,
    SourcingTotals, WeekRollup, ZonePlantRollup, ZoneRollup, ZoneWeekRollup,
};
pub use builder::{build_model, SourcingModel, VariableLayout};
pub use config::{FleetConfig, SourcingConfig};
pub use data::{Dimension, IndexSets, ParameterSet, SourcingData};
pub use error::{SourcingError, SourcingResult};
#[cfg(feature = "solver-highs")]
pub use highs::HighsSolver;
pub use run::{default_solver, run_sourcing, RunOutcome, SourcingRun};
pub use verify::{verify_plan, PlanViolation, ViolationKind};
