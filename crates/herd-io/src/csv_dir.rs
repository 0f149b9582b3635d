//! CSV reader and writer for single tables.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use herd_core::{Cell, InputTables, Table, TableKind};
use tracing::{debug, warn};

/// Where the CSV file for `kind` lives inside `dir`.
pub fn table_path(dir: &Path, kind: TableKind) -> PathBuf {
    dir.join(format!("{}.csv", kind.name()))
}

/// Read one table from a CSV file with a header row.
///
/// Key columns keep their raw text so that a week such as `30.2020` is not
/// turned into the number `30.202`. Every other column is parsed as a number
/// where possible.
pub fn load_table(path: &Path, kind: TableKind) -> Result<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers: Vec<String> = rdr
        .headers()
        .with_context(|| format!("reading header of {}", path.display()))?
        .iter()
        .map(str::to_string)
        .collect();
    let schema = kind.schema();
    let is_key: Vec<bool> = headers
        .iter()
        .map(|h| schema.key_columns.iter().any(|k| k.eq_ignore_ascii_case(h)))
        .collect();

    let mut table = Table::new(kind.name(), headers);
    for (line, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("parsing {} record {}", path.display(), line + 1))?;
        let cells = record.iter().zip(&is_key).map(|(raw, key)| match (*key, raw.is_empty()) {
            (_, true) => Cell::Empty,
            (true, false) => Cell::text(raw),
            (false, false) => Cell::parse(raw),
        });
        table
            .push_row(cells)
            .with_context(|| format!("{} record {}", path.display(), line + 1))?;
    }
    Ok(table)
}

/// Load every table found in `dir`.
pub fn load_tables_dir(dir: &Path) -> Result<InputTables> {
    if !dir.is_dir() {
        anyhow::bail!("table directory '{}' does not exist", dir.display());
    }

    let mut tables = InputTables::new();
    for kind in TableKind::ALL {
        let path = table_path(dir, kind);
        if !path.exists() {
            warn!(table = kind.name(), path = %path.display(), "table file not found");
            continue;
        }
        let table = load_table(&path, kind)?;
        debug!(table = kind.name(), rows = table.len(), "loaded table");
        tables.insert(table);
    }
    Ok(tables)
}

/// Write `table` as CSV with a header row.
pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("creating CSV writer for {}", path.display()))?;
    wtr.write_record(&table.columns)
        .context("writing CSV header")?;
    for row in &table.rows {
        wtr.write_record(row.iter().map(cell_field))
            .context("writing CSV record")?;
    }
    wtr.flush().context("flushing CSV writer")?;
    Ok(())
}

fn cell_field(cell: &Cell) -> String {
    match cell {
        Cell::Number(v) => v.to_string(),
        Cell::Text(s) => s.clone(),
        Cell::Empty => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_week_keys_stay_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("demand.csv");
        fs::write(&path, "week,demand\n30.2020,100\n 27.2025 , \n").unwrap();

        let table = load_table(&path, TableKind::Demand).unwrap();
        assert_eq!(table.rows[0], vec![Cell::text("30.2020"), Cell::number(100.0)]);
        assert_eq!(table.rows[1], vec![Cell::text("27.2025"), Cell::Empty]);
    }

    #[test]
    fn test_value_text_survives_for_later_validation() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plant_capacity.csv");
        fs::write(&path, "plant,capacity\nCOROZAL,lots\n").unwrap();

        let table = load_table(&path, TableKind::PlantCapacity).unwrap();
        assert_eq!(table.rows[0][1], Cell::text("lots"));
        assert!(table.number_at(0, 1).is_err());
    }

    #[test]
    fn test_ragged_row_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("yield.csv");
        fs::write(&path, "zone,plant,yield\nCOSTA,COROZAL\n").unwrap();
        assert!(load_table(&path, TableKind::Yield).is_err());
    }

    #[test]
    fn test_missing_files_leave_tables_absent() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("demand.csv"), "week,demand\n27.2025,10\n").unwrap();

        let tables = load_tables_dir(dir.path()).unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables.missing().len(), 11);
        assert!(tables.require(TableKind::Demand).is_ok());
    }

    #[test]
    fn test_missing_directory_is_error() {
        let dir = tempdir().unwrap();
        let err = load_tables_dir(&dir.path().join("nope")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_written_table_reads_back() {
        let dir = tempdir().unwrap();
        let mut table = Table::new("live_weight", ["zone", "weight"]);
        table.push_row([Cell::text("LLANOS"), Cell::number(410.5)]).unwrap();
        let path = table_path(dir.path(), TableKind::LiveWeight);
        write_table(&path, &table).unwrap();

        let back = load_table(&path, TableKind::LiveWeight).unwrap();
        assert_eq!(back, table);
    }
}
