//! `herd validate`

use std::io::{self, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use herd_algo::SourcingData;
use herd_core::TableKind;
use tabwriter::TabWriter;

/// Report which tables are present, then check that their values resolve.
pub fn handle(dir: &Path) -> Result<()> {
    let tables = herd_io::load_tables_dir(dir)
        .with_context(|| format!("loading tables from {}", dir.display()))?;

    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "TABLE\tSTATUS\tROWS\tCONTENTS")?;
    for kind in TableKind::ALL {
        let description = kind.schema().description;
        match tables.get(kind.name()) {
            Some(table) => writeln!(writer, "{kind}\tok\t{}\t{description}", table.len())?,
            None => writeln!(writer, "{kind}\tmissing\t-\t{description}")?,
        }
    }
    writer.flush()?;

    let missing = tables.missing();
    println!(
        "{}/{} required tables present",
        TableKind::ALL.len() - missing.len(),
        TableKind::ALL.len()
    );
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(|k| k.name()).collect();
        bail!("missing required tables: {}", names.join(", "));
    }

    // Meat price does not affect validation.
    let data = SourcingData::from_tables(&tables, 0.0).context("resolving table values")?;
    let sets = &data.sets;
    println!(
        "Sets: {} zones, {} plants, {} weeks ({} lanes)",
        sets.zones.len(),
        sets.plants.len(),
        sets.weeks.len(),
        sets.lane_count()
    );
    for dim in sets.empty_dimensions() {
        println!("  Warning: no {dim} found; the model will be degenerate");
    }
    Ok(())
}
