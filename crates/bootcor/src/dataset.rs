//! In-memory numeric dataset keyed by column name.

use indexmap::IndexMap;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{BootcorError, Result};
use crate::input::DataTable;

/// Named numeric columns of equal length.
///
/// Rows are implied by position: row `i` is the `i`-th value of every
/// column. Column order is insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    columns: IndexMap<String, Vec<f64>>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Dataset::insert_column`].
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<f64>) -> Result<Self> {
        self.insert_column(name, values)?;
        Ok(self)
    }

    /// Add or replace a column. Its length must match the existing columns.
    pub fn insert_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        let name = name.into();
        let others = self.columns.iter().find(|(n, _)| **n != name);
        if let Some((other, existing)) = others {
            if existing.len() != values.len() {
                return Err(BootcorError::InvalidInput(format!(
                    "column '{}' has {} rows but '{}' has {}",
                    name,
                    values.len(),
                    other,
                    existing.len()
                )));
            }
        }
        self.columns.insert(name, values);
        Ok(())
    }

    /// Number of observations.
    pub fn row_count(&self) -> usize {
        self.columns.values().next().map_or(0, Vec::len)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn column(&self, name: &str) -> Result<&[f64]> {
        self.columns
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| BootcorError::UnknownColumn(name.to_string()))
    }

    /// Both columns of an analysis pair.
    pub fn pair(&self, col_x: &str, col_y: &str) -> Result<(&[f64], &[f64])> {
        Ok((self.column(col_x)?, self.column(col_y)?))
    }

    /// Convert the named columns of a parsed table to numbers.
    ///
    /// Rows with a missing value in any requested column are dropped
    /// (listwise deletion), so the result has no gaps. Any other cell that
    /// does not parse as a finite number (including `inf`) is an error.
    pub fn from_table(table: &DataTable, names: &[&str]) -> Result<Self> {
        let mut selected: Vec<(&str, usize)> = Vec::with_capacity(names.len());
        for &name in names {
            if selected.iter().any(|(n, _)| *n == name) {
                continue;
            }
            let index = table
                .column_index(name)
                .ok_or_else(|| BootcorError::UnknownColumn(name.to_string()))?;
            selected.push((name, index));
        }

        let mut values: Vec<Vec<f64>> = vec![Vec::with_capacity(table.row_count()); selected.len()];
        let mut dropped = 0usize;

        'rows: for (row_idx, row) in table.rows.iter().enumerate() {
            let mut parsed = Vec::with_capacity(selected.len());
            for &(name, index) in &selected {
                let cell = row.get(index).map(String::as_str).unwrap_or("");
                if DataTable::is_null_value(cell) {
                    dropped += 1;
                    continue 'rows;
                }
                let value = cell
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| BootcorError::Parse {
                        row: row_idx + 1,
                        column: name.to_string(),
                        message: format!("'{cell}' is not a finite number"),
                    })?;
                parsed.push(value);
            }
            for (column, value) in values.iter_mut().zip(parsed) {
                column.push(value);
            }
        }

        if dropped > 0 {
            warn!(
                "dropped {} of {} rows with missing values in {:?}",
                dropped,
                table.row_count(),
                names
            );
        }

        let mut dataset = Dataset::new();
        for ((name, _), column) in selected.into_iter().zip(values) {
            dataset.insert_column(name, column)?;
        }
        Ok(dataset)
    }
}
