//! Table fixtures for the integration tests.

#![allow(dead_code)]

use herd_core::{Cell, InputTables, Table, TableKind};

/// Builder for a full set of input tables, one row at a time.
pub struct Scenario {
    tables: InputTables,
}

impl Scenario {
    /// All twelve tables, each with no rows.
    pub fn empty() -> Self {
        let mut tables = InputTables::new();
        for kind in TableKind::ALL {
            let schema = kind.schema();
            tables.insert(Table::new(schema.name, schema.columns()));
        }
        Self { tables }
    }

    pub fn row(mut self, kind: TableKind, keys: &[&str], value: f64) -> Self {
        let mut table = self.tables.get(kind.name()).cloned().unwrap();
        let mut cells: Vec<Cell> = keys.iter().map(|k| Cell::text(*k)).collect();
        cells.push(Cell::number(value));
        table.push_row(cells).unwrap();
        self.tables.insert(table);
        self
    }

    pub fn without(mut self, kind: TableKind) -> Self {
        let mut kept = InputTables::new();
        for table in self.tables.iter().filter(|t| t.name != kind.name()) {
            kept.insert(table.clone());
        }
        self.tables = kept;
        self
    }

    /// Keep the table but drop all of its rows.
    pub fn cleared(mut self, kind: TableKind) -> Self {
        let schema = kind.schema();
        self.tables.insert(Table::new(schema.name, schema.columns()));
        self
    }

    pub fn build(self) -> InputTables {
        self.tables
    }
}

/// 1 zone, 1 plant, 1 week. Optimal net value at a meat price of 20,000 is
/// 27,500,000 with 10 integrated head on one trip each way.
pub fn single_lane() -> Scenario {
    let (z, p, w) = ("COSTA", "COROZAL", "27.2025");
    Scenario::empty()
        .row(TableKind::IntegratedSupply, &[z, w], 20.0)
        .row(TableKind::PurchaseSupply, &[z, w], 0.0)
        .row(TableKind::Demand, &[w], 10.0)
        .row(TableKind::SlaughterCost, &[p], 100_000.0)
        .row(TableKind::IntegratedLaneCost, &[z, p], 500_000.0)
        .row(TableKind::PurchasedLaneCost, &[z, p], 500_000.0)
        .row(TableKind::OutboundCost, &[p], 1_000_000.0)
        .row(TableKind::PlantCapacity, &[p], 50.0)
        .row(TableKind::IntegratedPrice, &[z], 1_000_000.0)
        .row(TableKind::PurchasedPrice, &[z], 1_200_000.0)
        .row(TableKind::Yield, &[z, p], 0.5)
        .row(TableKind::LiveWeight, &[z], 400.0)
}

pub const SINGLE_LANE_MEAT_PRICE: f64 = 20_000.0;
pub const SINGLE_LANE_NET_VALUE: f64 = 27_500_000.0;

/// Two zones feeding two plants over two weeks.
///
/// NORTE is cheap but has little purchase supply; SUR has more purchase
/// supply. Plant capacity forces both plants to be used in W1.
pub fn two_zone_network() -> Scenario {
    let mut s = Scenario::empty();
    for w in ["W1", "W2"] {
        s = s
            .row(TableKind::IntegratedSupply, &["NORTE", w], 25.0)
            .row(TableKind::IntegratedSupply, &["SUR", w], 10.0)
            .row(TableKind::PurchaseSupply, &["NORTE", w], 5.0)
            .row(TableKind::PurchaseSupply, &["SUR", w], 20.0);
    }
    s.row(TableKind::Demand, &["W1"], 45.0)
        .row(TableKind::Demand, &["W2"], 20.0)
        .row(TableKind::SlaughterCost, &["P1"], 100_000.0)
        .row(TableKind::SlaughterCost, &["P2"], 120_000.0)
        .row(TableKind::IntegratedLaneCost, &["NORTE", "P1"], 400_000.0)
        .row(TableKind::IntegratedLaneCost, &["NORTE", "P2"], 900_000.0)
        .row(TableKind::IntegratedLaneCost, &["SUR", "P1"], 800_000.0)
        .row(TableKind::IntegratedLaneCost, &["SUR", "P2"], 300_000.0)
        .row(TableKind::PurchasedLaneCost, &["NORTE", "P1"], 450_000.0)
        .row(TableKind::PurchasedLaneCost, &["SUR", "P2"], 350_000.0)
        .row(TableKind::OutboundCost, &["P1"], 2_000_000.0)
        .row(TableKind::OutboundCost, &["P2"], 2_500_000.0)
        .row(TableKind::PlantCapacity, &["P1"], 30.0)
        .row(TableKind::PlantCapacity, &["P2"], 30.0)
        .row(TableKind::IntegratedPrice, &["NORTE"], 1_000_000.0)
        .row(TableKind::IntegratedPrice, &["SUR"], 1_050_000.0)
        .row(TableKind::PurchasedPrice, &["NORTE"], 1_300_000.0)
        .row(TableKind::PurchasedPrice, &["SUR"], 1_250_000.0)
        .row(TableKind::Yield, &["NORTE", "P1"], 0.55)
        .row(TableKind::Yield, &["NORTE", "P2"], 0.55)
        .row(TableKind::Yield, &["SUR", "P1"], 0.54)
        .row(TableKind::Yield, &["SUR", "P2"], 0.56)
        .row(TableKind::LiveWeight, &["NORTE"], 420.0)
        .row(TableKind::LiveWeight, &["SUR"], 400.0)
}
