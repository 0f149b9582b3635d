//! Sample input set for a new sourcing study.
//!
//! Every value is uniform so the file set is easy to edit by hand: 25 head of
//! integrated and purchase supply per zone and week, 100 head of demand per
//! week, and the same lane costs everywhere.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use herd_core::{Cell, InputTables, Table, TableKind};

use crate::csv_dir::{table_path, write_table};

const SUPPLY: f64 = 25.0;
const PURCHASE: f64 = 25.0;
const DEMAND: f64 = 100.0;
const SLAUGHTER_COST: f64 = 130_000.0;
const LANE_COST: f64 = 1_200_000.0;
const OUTBOUND_COST: f64 = 4_000_000.0;
const CAPACITY: f64 = 50.0;
const INTEGRATED_PRICE: f64 = 3_500_000.0;
const PURCHASED_PRICE: f64 = 3_800_000.0;
const YIELD: f64 = 0.55;
const LIVE_WEIGHT: f64 = 400.0;

/// Dimension members the template is written for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateShape {
    pub zones: Vec<String>,
    pub plants: Vec<String>,
    pub weeks: Vec<String>,
}

impl Default for TemplateShape {
    fn default() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            zones: owned(&[
                "ANTIOQUIA",
                "VALLEDUPAR",
                "COSTA",
                "MAGDALENA MEDIO",
                "LLANOS",
                "SUR DEL CESAR",
                "MAGDALENA MEDIO NORTE",
            ]),
            plants: owned(&["AGUACHICA", "FRIGOSINU", "CENTRAL GANADERA", "FRIOGAN DORADA", "COROZAL"]),
            weeks: owned(&["27.2025", "28.2025", "29.2025", "30.2025"]),
        }
    }
}

/// All twelve tables filled for `shape`.
pub fn sample_tables(shape: &TemplateShape) -> InputTables {
    let zone_week = pairs(&shape.zones, &shape.weeks);
    let zone_plant = pairs(&shape.zones, &shape.plants);
    let zones: Vec<Vec<&str>> = shape.zones.iter().map(|z| vec![z.as_str()]).collect();
    let plants: Vec<Vec<&str>> = shape.plants.iter().map(|p| vec![p.as_str()]).collect();
    let weeks: Vec<Vec<&str>> = shape.weeks.iter().map(|w| vec![w.as_str()]).collect();

    let mut tables = InputTables::new();
    for kind in TableKind::ALL {
        let (keys, value) = match kind {
            TableKind::IntegratedSupply => (&zone_week, SUPPLY),
            TableKind::PurchaseSupply => (&zone_week, PURCHASE),
            TableKind::Demand => (&weeks, DEMAND),
            TableKind::SlaughterCost => (&plants, SLAUGHTER_COST),
            TableKind::IntegratedLaneCost | TableKind::PurchasedLaneCost => (&zone_plant, LANE_COST),
            TableKind::OutboundCost => (&plants, OUTBOUND_COST),
            TableKind::PlantCapacity => (&plants, CAPACITY),
            TableKind::IntegratedPrice => (&zones, INTEGRATED_PRICE),
            TableKind::PurchasedPrice => (&zones, PURCHASED_PRICE),
            TableKind::Yield => (&zone_plant, YIELD),
            TableKind::LiveWeight => (&zones, LIVE_WEIGHT),
        };
        tables.insert(uniform_table(kind, keys, value));
    }
    tables
}

/// Write the default template into `dir`, creating it if needed.
///
/// Returns the files written, in table order.
pub fn write_template(dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let tables = sample_tables(&TemplateShape::default());

    let mut written = Vec::with_capacity(TableKind::ALL.len());
    for kind in TableKind::ALL {
        let table = tables.require(kind)?;
        let path = table_path(dir, kind);
        write_table(&path, table)?;
        written.push(path);
    }
    Ok(written)
}

fn pairs<'a>(outer: &'a [String], inner: &'a [String]) -> Vec<Vec<&'a str>> {
    outer
        .iter()
        .flat_map(|a| inner.iter().map(move |b| vec![a.as_str(), b.as_str()]))
        .collect()
}

fn uniform_table(kind: TableKind, keys: &[Vec<&str>], value: f64) -> Table {
    let schema = kind.schema();
    let mut table = Table::new(schema.name, schema.columns());
    table.rows = keys
        .iter()
        .map(|key| {
            key.iter()
                .map(|k| Cell::text(*k))
                .chain(std::iter::once(Cell::number(value)))
                .collect()
        })
        .collect();
    table
}
