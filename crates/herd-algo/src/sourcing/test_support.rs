//! Small table sets shared by the unit tests.

use herd_core::{Cell, InputTables, Table, TableKind};

/// Build the table for `kind` from `(keys, value)` rows.
pub(crate) fn table(kind: TableKind, rows: &[(&[&str], f64)]) -> Table {
    let schema = kind.schema();
    let mut table = Table::new(schema.name, schema.columns());
    for (keys, value) in rows {
        let mut cells: Vec<Cell> = keys.iter().map(|k| Cell::text(*k)).collect();
        cells.push(Cell::number(*value));
        table.push_row(cells).unwrap();
    }
    table
}

/// 1 zone, 1 plant, 1 week: demand 10, integrated supply 20, capacity 50.
///
/// With a meat price of 20,000 the optimum takes 10 integrated head on one
/// inbound and one outbound trip for a net value of 27,500,000.
pub(crate) fn single_lane_tables() -> InputTables {
    let z = "COSTA";
    let p = "COROZAL";
    let w = "27.2025";
    InputTables::new()
        .with_table(table(TableKind::IntegratedSupply, &[(&[z, w], 20.0)]))
        .with_table(table(TableKind::PurchaseSupply, &[(&[z, w], 0.0)]))
        .with_table(table(TableKind::Demand, &[(&[w], 10.0)]))
        .with_table(table(TableKind::SlaughterCost, &[(&[p], 100_000.0)]))
        .with_table(table(TableKind::IntegratedLaneCost, &[(&[z, p], 500_000.0)]))
        .with_table(table(TableKind::PurchasedLaneCost, &[(&[z, p], 500_000.0)]))
        .with_table(table(TableKind::OutboundCost, &[(&[p], 1_000_000.0)]))
        .with_table(table(TableKind::PlantCapacity, &[(&[p], 50.0)]))
        .with_table(table(TableKind::IntegratedPrice, &[(&[z], 1_000_000.0)]))
        .with_table(table(TableKind::PurchasedPrice, &[(&[z], 1_200_000.0)]))
        .with_table(table(TableKind::Yield, &[(&[z, p], 0.5)]))
        .with_table(table(TableKind::LiveWeight, &[(&[z], 400.0)]))
}

/// 2 zones (NORTE, SUR), 2 plants (P1, P2), 2 weeks (W1, W2).
pub(crate) fn two_by_two_tables() -> InputTables {
    InputTables::new()
        .with_table(table(
            TableKind::IntegratedSupply,
            &[
                (&["NORTE", "W1"], 30.0),
                (&["NORTE", "W2"], 30.0),
                (&["SUR", "W1"], 10.0),
                (&["SUR", "W2"], 10.0),
            ],
        ))
        .with_table(table(
            TableKind::PurchaseSupply,
            &[(&["NORTE", "W1"], 5.0), (&["SUR", "W1"], 20.0), (&["SUR", "W2"], 20.0)],
        ))
        .with_table(table(TableKind::Demand, &[(&["W1"], 40.0), (&["W2"], 20.0)]))
        .with_table(table(TableKind::SlaughterCost, &[(&["P1"], 100.0), (&["P2"], 150.0)]))
        .with_table(table(
            TableKind::IntegratedLaneCost,
            &[
                (&["NORTE", "P1"], 1_000.0),
                (&["NORTE", "P2"], 2_000.0),
                (&["SUR", "P1"], 1_500.0),
                (&["SUR", "P2"], 500.0),
            ],
        ))
        .with_table(table(
            TableKind::PurchasedLaneCost,
            &[(&["NORTE", "P1"], 1_100.0), (&["SUR", "P2"], 600.0)],
        ))
        .with_table(table(TableKind::OutboundCost, &[(&["P1"], 3_000.0), (&["P2"], 2_500.0)]))
        .with_table(table(TableKind::PlantCapacity, &[(&["P1"], 30.0), (&["P2"], 30.0)]))
        .with_table(table(
            TableKind::IntegratedPrice,
            &[(&["NORTE"], 2_000.0), (&["SUR"], 1_800.0)],
        ))
        .with_table(table(
            TableKind::PurchasedPrice,
            &[(&["NORTE"], 2_400.0), (&["SUR"], 2_100.0)],
        ))
        .with_table(table(
            TableKind::Yield,
            &[
                (&["NORTE", "P1"], 0.5),
                (&["NORTE", "P2"], 0.55),
                (&["SUR", "P1"], 0.52),
                (&["SUR", "P2"], 0.5),
            ],
        ))
        .with_table(table(TableKind::LiveWeight, &[(&["NORTE"], 400.0), (&["SUR"], 380.0)]))
}
