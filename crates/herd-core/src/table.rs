//! Raw tabular records as handed over by the ingestion layer.
//!
//! A [`Table`] is a named list of rows over named columns. Cells carry either
//! text or numbers because spreadsheet exports mix both freely (a week column
//! may arrive as `27` in one file and `"27"` in another).

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{HerdError, HerdResult};
use crate::schema::TableKind;

/// One cell of an input table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn number(value: f64) -> Self {
        Cell::Number(value)
    }

    /// Parse a raw field, preferring a number when the text reads as one.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Cell::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(value) => Cell::Number(value),
            Err(_) => Cell::Text(trimmed.to_string()),
        }
    }

    /// Text form used when the cell is part of a key.
    ///
    /// Integral numbers print without a fractional part so `27.0` and `"27"`
    /// address the same key. Empty cells have no key form.
    pub fn key_text(&self) -> Option<String> {
        match self {
            Cell::Text(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
            Cell::Number(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 => {
                Some(format!("{}", *v as i64))
            }
            Cell::Number(v) => Some(v.to_string()),
            Cell::Empty => None,
        }
    }

    /// Numeric value of the cell. Empty cells read as zero; `None` means the
    /// cell holds text that is not a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            Cell::Empty => Some(0.0),
            Cell::Text(s) if s.trim().is_empty() => Some(0.0),
            Cell::Text(s) => s.trim().parse().ok(),
        }
    }

    fn display(&self) -> String {
        match self {
            Cell::Number(v) => v.to_string(),
            Cell::Text(s) => s.clone(),
            Cell::Empty => String::new(),
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

/// A named table of records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a record. The record must have one cell per column.
    pub fn push_row<I>(&mut self, cells: I) -> HerdResult<()>
    where
        I: IntoIterator,
        I::Item: Into<Cell>,
    {
        let row: Vec<Cell> = cells.into_iter().map(Into::into).collect();
        if row.len() != self.columns.len() {
            return Err(HerdError::RowWidth {
                table: self.name.clone(),
                expected: self.columns.len(),
                got: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column, matched case-insensitively.
    pub fn column_index(&self, column: &str) -> HerdResult<usize> {
        self.columns
            .iter()
            .position(|c| c.trim().eq_ignore_ascii_case(column))
            .ok_or_else(|| HerdError::MissingColumn {
                table: self.name.clone(),
                column: column.to_string(),
            })
    }

    /// Sorted distinct key values of one column. Empty cells are skipped.
    pub fn distinct_keys(&self, column: &str) -> HerdResult<Vec<String>> {
        let idx = self.column_index(column)?;
        let keys: BTreeSet<String> = self
            .rows
            .iter()
            .filter_map(|row| row[idx].key_text())
            .collect();
        Ok(keys.into_iter().collect())
    }

    /// Numeric value of `column` in row `row`, or [`HerdError::InvalidValue`].
    pub fn number_at(&self, row: usize, column: usize) -> HerdResult<f64> {
        let cell = &self.rows[row][column];
        cell.as_number().ok_or_else(|| HerdError::InvalidValue {
            table: self.name.clone(),
            row: row + 1,
            column: self.columns[column].clone(),
            value: cell.display(),
        })
    }
}

/// Snapshot of every input table supplied for one run, keyed by table name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputTables {
    tables: BTreeMap<String, Table>,
}

impl InputTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a table, replacing any earlier table with the same name.
    pub fn insert(&mut self, table: Table) {
        self.tables.insert(table.name.clone(), table);
    }

    pub fn with_table(mut self, table: Table) -> Self {
        self.insert(table);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// The table for `kind`, or [`HerdError::MissingParameterTable`].
    pub fn require(&self, kind: TableKind) -> HerdResult<&Table> {
        self.get(kind.name())
            .ok_or_else(|| HerdError::missing_table(kind.name()))
    }

    /// Required tables that are absent from this snapshot.
    pub fn missing(&self) -> Vec<TableKind> {
        TableKind::ALL
            .iter()
            .copied()
            .filter(|kind| !self.tables.contains_key(kind.name()))
            .collect()
    }

    /// Fail with the first missing required table, if any.
    pub fn ensure_complete(&self) -> HerdResult<()> {
        match self.missing().first() {
            Some(kind) => Err(HerdError::missing_table(kind.name())),
            None => Ok(()),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
