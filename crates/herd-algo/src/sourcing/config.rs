//! Run configuration.
//!
//! Loaded from TOML with every field optional:
//!
//! ```toml
//! time_budget_secs = 60.0
//! objective_tolerance = 1e-6
//! mip_gap = 0.01
//!
//! [fleet]
//! head_per_inbound_trip = 14
//! head_per_outbound_trip = 84
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{SourcingError, SourcingResult};

/// Vehicle carrying capacities that link head counts to trip counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    /// Head of livestock one truck carries from a zone to a plant.
    pub head_per_inbound_trip: u32,
    /// Head-equivalents of processed output one truck carries from a plant.
    pub head_per_outbound_trip: u32,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            head_per_inbound_trip: 14,
            head_per_outbound_trip: 84,
        }
    }
}

/// Configuration for one sourcing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcingConfig {
    /// Wall-clock budget handed to the solver (seconds).
    pub time_budget_secs: f64,
    /// Relative tolerance of the net-value vs. solver-objective cross-check.
    pub objective_tolerance: f64,
    /// Optional relative MIP gap at which the backend may stop.
    pub mip_gap: Option<f64>,
    pub fleet: FleetConfig,
}

impl Default for SourcingConfig {
    fn default() -> Self {
        Self {
            time_budget_secs: 60.0,
            objective_tolerance: 1e-6,
            mip_gap: None,
            fleet: FleetConfig::default(),
        }
    }
}

impl SourcingConfig {
    pub fn from_toml_str(contents: &str) -> SourcingResult<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific path.
    pub fn load(path: &Path) -> SourcingResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(herd_core::HerdError::from)?;
        Self::from_toml_str(&contents)
    }

    pub fn with_time_budget(mut self, secs: f64) -> Self {
        self.time_budget_secs = secs;
        self
    }

    pub fn with_fleet(mut self, fleet: FleetConfig) -> Self {
        self.fleet = fleet;
        self
    }

    /// The budget as a [`Duration`]. Budgets too large to represent read as
    /// [`Duration::MAX`]; [`validate`](Self::validate) rejects them.
    pub fn time_budget(&self) -> Duration {
        Duration::try_from_secs_f64(self.time_budget_secs).unwrap_or(Duration::MAX)
    }

    pub fn validate(&self) -> SourcingResult<()> {
        if !self.time_budget_secs.is_finite() || self.time_budget_secs <= 0.0 {
            return Err(SourcingError::Config(format!(
                "time budget must be positive, got {}",
                self.time_budget_secs
            )));
        }
        if Duration::try_from_secs_f64(self.time_budget_secs).is_err() {
            return Err(SourcingError::Config(format!(
                "time budget of {} seconds is too large",
                self.time_budget_secs
            )));
        }
        if !self.objective_tolerance.is_finite() || self.objective_tolerance < 0.0 {
            return Err(SourcingError::Config(format!(
                "objective tolerance must be non-negative, got {}",
                self.objective_tolerance
            )));
        }
        if let Some(gap) = self.mip_gap {
            if !(0.0..1.0).contains(&gap) {
                return Err(SourcingError::Config(format!(
                    "mip gap must be in [0, 1), got {gap}"
                )));
            }
        }
        if self.fleet.head_per_inbound_trip == 0 || self.fleet.head_per_outbound_trip == 0 {
            return Err(SourcingError::Config(
                "fleet trip capacities must be at least one head".to_string(),
            ));
        }
        Ok(())
    }
}
