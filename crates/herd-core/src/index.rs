//! Parameter index: keyed numeric lookups built from input tables.
//!
//! A single key column gives a bare key, several columns give a tuple key in
//! column order. Both are represented by [`ParamKey`], an ordered list of the
//! key cells' text forms.

use std::collections::HashMap;
use std::fmt;

use crate::error::{HerdError, HerdResult};
use crate::table::Table;

/// Composite key of a parameter lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamKey(Vec<String>);

impl ParamKey {
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ParamKey(parts.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.len() == 1 {
            f.write_str(&self.0[0])
        } else {
            write!(f, "({})", self.0.join(", "))
        }
    }
}

impl From<&str> for ParamKey {
    fn from(key: &str) -> Self {
        ParamKey(vec![key.to_string()])
    }
}

impl From<&String> for ParamKey {
    fn from(key: &String) -> Self {
        ParamKey(vec![key.clone()])
    }
}

impl From<(&str, &str)> for ParamKey {
    fn from((a, b): (&str, &str)) -> Self {
        ParamKey(vec![a.to_string(), b.to_string()])
    }
}

impl From<(&str, &str, &str)> for ParamKey {
    fn from((a, b, c): (&str, &str, &str)) -> Self {
        ParamKey(vec![a.to_string(), b.to_string(), c.to_string()])
    }
}

/// Mapping from composite key to value with a zero default.
#[derive(Debug, Clone, Default)]
pub struct ParamIndex {
    key_columns: Vec<String>,
    values: HashMap<ParamKey, f64>,
}

impl ParamIndex {
    pub fn new<I, S>(key_columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key_columns: key_columns.into_iter().map(Into::into).collect(),
            values: HashMap::new(),
        }
    }

    /// Insert a value, overwriting any earlier value for the same key.
    pub fn insert(&mut self, key: impl Into<ParamKey>, value: f64) {
        self.values.insert(key.into(), value);
    }

    /// Value for `key`, or zero when the combination is absent.
    pub fn get_or_zero(&self, key: impl Into<ParamKey>) -> f64 {
        self.values.get(&key.into()).copied().unwrap_or(0.0)
    }

    pub fn get(&self, key: impl Into<ParamKey>) -> Option<f64> {
        self.values.get(&key.into()).copied()
    }

    pub fn contains(&self, key: impl Into<ParamKey>) -> bool {
        self.values.contains_key(&key.into())
    }

    pub fn key_columns(&self) -> &[String] {
        &self.key_columns
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ParamKey, f64)> {
        self.values.iter().map(|(k, v)| (k, *v))
    }
}

/// Build a [`ParamIndex`] from `table`.
///
/// Rows are read in order, so a later duplicate key overwrites an earlier one.
/// Rows with an empty key cell are skipped. Empty value cells read as zero;
/// text that is not a number is [`HerdError::InvalidValue`].
pub fn build_index(table: &Table, key_columns: &[&str], value_column: &str) -> HerdResult<ParamIndex> {
    if key_columns.is_empty() {
        return Err(HerdError::EmptyKeyColumns {
            table: table.name.clone(),
        });
    }

    let key_idx = key_columns
        .iter()
        .map(|col| table.column_index(col))
        .collect::<HerdResult<Vec<_>>>()?;
    let value_idx = table.column_index(value_column)?;

    let mut index = ParamIndex::new(key_columns.iter().copied());
    'rows: for (row_no, row) in table.rows.iter().enumerate() {
        let mut parts = Vec::with_capacity(key_idx.len());
        for &i in &key_idx {
            match row[i].key_text() {
                Some(part) => parts.push(part),
                None => continue 'rows,
            }
        }
        let value = table.number_at(row_no, value_idx)?;
        index.values.insert(ParamKey(parts), value);
    }

    Ok(index)
}
