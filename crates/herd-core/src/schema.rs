//! Schemas of the twelve input tables a sourcing model is built from.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Column layout of one input table: which columns form the key and which
/// column holds the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub name: &'static str,
    pub key_columns: &'static [&'static str],
    pub value_column: &'static str,
    pub description: &'static str,
}

impl TableSchema {
    /// All columns in file order: keys first, then the value.
    pub fn columns(&self) -> Vec<&'static str> {
        let mut cols = self.key_columns.to_vec();
        cols.push(self.value_column);
        cols
    }
}

/// Required input tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    IntegratedSupply,
    PurchaseSupply,
    Demand,
    SlaughterCost,
    IntegratedLaneCost,
    PurchasedLaneCost,
    OutboundCost,
    PlantCapacity,
    IntegratedPrice,
    PurchasedPrice,
    Yield,
    LiveWeight,
}

impl TableKind {
    pub const ALL: [TableKind; 12] = [
        TableKind::IntegratedSupply,
        TableKind::PurchaseSupply,
        TableKind::Demand,
        TableKind::SlaughterCost,
        TableKind::IntegratedLaneCost,
        TableKind::PurchasedLaneCost,
        TableKind::OutboundCost,
        TableKind::PlantCapacity,
        TableKind::IntegratedPrice,
        TableKind::PurchasedPrice,
        TableKind::Yield,
        TableKind::LiveWeight,
    ];

    pub fn name(&self) -> &'static str {
        self.schema().name
    }

    pub fn schema(&self) -> TableSchema {
        match self {
            TableKind::IntegratedSupply => TableSchema {
                name: "integrated_supply",
                key_columns: &["zone", "week"],
                value_column: "supply",
                description: "Head available per zone and week through the integrated channel",
            },
            TableKind::PurchaseSupply => TableSchema {
                name: "purchase_supply",
                key_columns: &["zone", "week"],
                value_column: "available",
                description: "Head available per zone and week for open-market purchase",
            },
            TableKind::Demand => TableSchema {
                name: "demand",
                key_columns: &["week"],
                value_column: "demand",
                description: "Head that must be processed each week",
            },
            TableKind::SlaughterCost => TableSchema {
                name: "slaughter_cost",
                key_columns: &["plant"],
                value_column: "cost",
                description: "Variable slaughter cost per head at each plant",
            },
            TableKind::IntegratedLaneCost => TableSchema {
                name: "integrated_lane_cost",
                key_columns: &["zone", "plant"],
                value_column: "trip_cost",
                description: "Cost per trip from zone to plant for integrated head",
            },
            TableKind::PurchasedLaneCost => TableSchema {
                name: "purchased_lane_cost",
                key_columns: &["zone", "plant"],
                value_column: "trip_cost",
                description: "Cost per trip from zone to plant for purchased head",
            },
            TableKind::OutboundCost => TableSchema {
                name: "outbound_cost",
                key_columns: &["plant"],
                value_column: "trip_cost",
                description: "Cost per trip of processed output from plant to distribution",
            },
            TableKind::PlantCapacity => TableSchema {
                name: "plant_capacity",
                key_columns: &["plant"],
                value_column: "capacity",
                description: "Weekly slaughter capacity per plant (head)",
            },
            TableKind::IntegratedPrice => TableSchema {
                name: "integrated_price",
                key_columns: &["zone"],
                value_column: "price",
                description: "Unit price of an integrated head per zone",
            },
            TableKind::PurchasedPrice => TableSchema {
                name: "purchased_price",
                key_columns: &["zone"],
                value_column: "price",
                description: "Unit price of a purchased head per zone",
            },
            TableKind::Yield => TableSchema {
                name: "yield",
                key_columns: &["zone", "plant"],
                value_column: "yield",
                description: "Fraction of live weight sold as meat per zone and plant",
            },
            TableKind::LiveWeight => TableSchema {
                name: "live_weight",
                key_columns: &["zone"],
                value_column: "weight",
                description: "Average live weight of an animal per zone (kg)",
            },
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
