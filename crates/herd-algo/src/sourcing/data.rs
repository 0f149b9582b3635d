//! Index sets and parameter maps resolved from the input tables.

use std::fmt;

use herd_core::{build_index, HerdResult, InputTables, ParamIndex, PlantId, TableKind, WeekId, ZoneId};
use serde::{Deserialize, Serialize};

/// One dimension of the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Zone,
    Plant,
    Week,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Zone => write!(f, "zones"),
            Dimension::Plant => write!(f, "plants"),
            Dimension::Week => write!(f, "weeks"),
        }
    }
}

/// Zones, plants and weeks of one run, each sorted by identifier.
///
/// Zones come from the integrated-supply table, plants from the slaughter-cost
/// table and weeks from the demand table. Other tables never add members.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSets {
    pub zones: Vec<ZoneId>,
    pub plants: Vec<PlantId>,
    pub weeks: Vec<WeekId>,
}

impl IndexSets {
    pub fn from_tables(tables: &InputTables) -> HerdResult<Self> {
        let zones = tables
            .require(TableKind::IntegratedSupply)?
            .distinct_keys("zone")?
            .into_iter()
            .map(ZoneId::from)
            .collect();
        let plants = tables
            .require(TableKind::SlaughterCost)?
            .distinct_keys("plant")?
            .into_iter()
            .map(PlantId::from)
            .collect();
        let weeks = tables
            .require(TableKind::Demand)?
            .distinct_keys("week")?
            .into_iter()
            .map(WeekId::from)
            .collect();

        Ok(Self {
            zones,
            plants,
            weeks,
        })
    }

    /// Dimensions with no members.
    pub fn empty_dimensions(&self) -> Vec<Dimension> {
        let mut empty = Vec::new();
        if self.zones.is_empty() {
            empty.push(Dimension::Zone);
        }
        if self.plants.is_empty() {
            empty.push(Dimension::Plant);
        }
        if self.weeks.is_empty() {
            empty.push(Dimension::Week);
        }
        empty
    }

    /// Number of (zone, plant, week) lanes.
    pub fn lane_count(&self) -> usize {
        self.zones.len() * self.plants.len() * self.weeks.len()
    }
}

/// One [`ParamIndex`] per input table.
#[derive(Debug, Clone)]
pub struct ParameterSet {
    pub integrated_supply: ParamIndex,
    pub purchase_supply: ParamIndex,
    pub demand: ParamIndex,
    pub slaughter_cost: ParamIndex,
    pub integrated_lane_cost: ParamIndex,
    pub purchased_lane_cost: ParamIndex,
    pub outbound_cost: ParamIndex,
    pub plant_capacity: ParamIndex,
    pub integrated_price: ParamIndex,
    pub purchased_price: ParamIndex,
    pub yield_fraction: ParamIndex,
    pub live_weight: ParamIndex,
}

impl ParameterSet {
    /// Index every required table.
    ///
    /// Fails with `MissingParameterTable` naming the first absent table before
    /// any index is built.
    pub fn from_tables(tables: &InputTables) -> HerdResult<Self> {
        tables.ensure_complete()?;

        let index = |kind: TableKind| -> HerdResult<ParamIndex> {
            let schema = kind.schema();
            build_index(tables.require(kind)?, schema.key_columns, schema.value_column)
        };

        Ok(Self {
            integrated_supply: index(TableKind::IntegratedSupply)?,
            purchase_supply: index(TableKind::PurchaseSupply)?,
            demand: index(TableKind::Demand)?,
            slaughter_cost: index(TableKind::SlaughterCost)?,
            integrated_lane_cost: index(TableKind::IntegratedLaneCost)?,
            purchased_lane_cost: index(TableKind::PurchasedLaneCost)?,
            outbound_cost: index(TableKind::OutboundCost)?,
            plant_capacity: index(TableKind::PlantCapacity)?,
            integrated_price: index(TableKind::IntegratedPrice)?,
            purchased_price: index(TableKind::PurchasedPrice)?,
            yield_fraction: index(TableKind::Yield)?,
            live_weight: index(TableKind::LiveWeight)?,
        })
    }
}

/// Everything the model and the aggregator read: sets, parameters and the
/// run's meat price.
///
/// All accessors default to zero for combinations absent from the tables.
#[derive(Debug, Clone)]
pub struct SourcingData {
    pub sets: IndexSets,
    pub params: ParameterSet,
    /// Commercial meat price per kilogram for this run.
    pub meat_price: f64,
}

impl SourcingData {
    pub fn from_tables(tables: &InputTables, meat_price: f64) -> HerdResult<Self> {
        let params = ParameterSet::from_tables(tables)?;
        let sets = IndexSets::from_tables(tables)?;
        Ok(Self {
            sets,
            params,
            meat_price,
        })
    }

    pub fn demand(&self, week: &WeekId) -> f64 {
        self.params.demand.get_or_zero(week.as_str())
    }

    pub fn integrated_supply(&self, zone: &ZoneId, week: &WeekId) -> f64 {
        self.params
            .integrated_supply
            .get_or_zero((zone.as_str(), week.as_str()))
    }

    pub fn purchase_supply(&self, zone: &ZoneId, week: &WeekId) -> f64 {
        self.params
            .purchase_supply
            .get_or_zero((zone.as_str(), week.as_str()))
    }

    pub fn capacity(&self, plant: &PlantId) -> f64 {
        self.params.plant_capacity.get_or_zero(plant.as_str())
    }

    pub fn slaughter_cost(&self, plant: &PlantId) -> f64 {
        self.params.slaughter_cost.get_or_zero(plant.as_str())
    }

    pub fn outbound_cost(&self, plant: &PlantId) -> f64 {
        self.params.outbound_cost.get_or_zero(plant.as_str())
    }

    pub fn integrated_price(&self, zone: &ZoneId) -> f64 {
        self.params.integrated_price.get_or_zero(zone.as_str())
    }

    pub fn purchased_price(&self, zone: &ZoneId) -> f64 {
        self.params.purchased_price.get_or_zero(zone.as_str())
    }

    pub fn integrated_lane_cost(&self, zone: &ZoneId, plant: &PlantId) -> f64 {
        self.params
            .integrated_lane_cost
            .get_or_zero((zone.as_str(), plant.as_str()))
    }

    pub fn purchased_lane_cost(&self, zone: &ZoneId, plant: &PlantId) -> f64 {
        self.params
            .purchased_lane_cost
            .get_or_zero((zone.as_str(), plant.as_str()))
    }

    pub fn live_weight(&self, zone: &ZoneId) -> f64 {
        self.params.live_weight.get_or_zero(zone.as_str())
    }

    pub fn yield_fraction(&self, zone: &ZoneId, plant: &PlantId) -> f64 {
        self.params
            .yield_fraction
            .get_or_zero((zone.as_str(), plant.as_str()))
    }

    /// Meat revenue of one head from `zone` processed at `plant`.
    pub fn revenue_per_head(&self, zone: &ZoneId, plant: &PlantId) -> f64 {
        self.live_weight(zone) * self.yield_fraction(zone, plant) * self.meat_price
    }
}
