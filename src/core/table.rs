//! NumericTable data structure for labeled two-dimensional numeric data.

use crate::core::NumericSeries;
use crate::error::{Result, ScalerError};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction along which a table is cut into independent slices.
///
/// `Row` treats every row as one slice, so statistics are computed across
/// the columns of that row. `Column` treats every column as one slice.
///
/// The default is `Column`. Configs ported from pandas-style scalers that
/// relied on `axis=1` (one slice per row) must select `Axis::Row`
/// explicitly, e.g. `Axis::from_code(1)` or `"row"` in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Each row is a slice.
    Row,
    /// Each column is a slice.
    #[default]
    Column,
}

impl Axis {
    /// Map a dataframe-style axis code: 0 walks down the index (one slice
    /// per column), 1 walks across the columns (one slice per row).
    pub fn from_code(code: usize) -> Result<Self> {
        match code {
            0 => Ok(Axis::Column),
            1 => Ok(Axis::Row),
            other => Err(ScalerError::InvalidArgument(format!(
                "axis must be 0 or 1, got {}",
                other
            ))),
        }
    }

    /// The other axis.
    pub fn transpose(self) -> Self {
        match self {
            Axis::Row => Axis::Column,
            Axis::Column => Axis::Row,
        }
    }
}

impl FromStr for Axis {
    type Err = ScalerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "row" | "row-wise" | "row_wise" | "1" => Ok(Axis::Row),
            "column" | "column-wise" | "column_wise" | "index" | "0" => Ok(Axis::Column),
            other => Err(ScalerError::InvalidArgument(format!(
                "unknown axis '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
        }
    }
}

/// Layout of nested input vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueLayout {
    /// Each inner vector is a row.
    #[default]
    Row,
    /// Each inner vector is a column.
    Column,
}

/// A labeled rows x columns matrix of `f64`, `NaN` marks a missing value.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericTable {
    /// Values stored row-major: values[row * n_cols + col]
    values: Vec<f64>,
    n_rows: usize,
    n_cols: usize,
    row_labels: Vec<String>,
    column_labels: Vec<String>,
}

/// Builder for constructing NumericTable.
#[derive(Debug, Clone, Default)]
pub struct NumericTableBuilder {
    values: Vec<Vec<f64>>,
    layout: ValueLayout,
    row_labels: Vec<String>,
    column_labels: Vec<String>,
}

impl NumericTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set values with the given layout.
    pub fn values(mut self, values: Vec<Vec<f64>>, layout: ValueLayout) -> Self {
        self.values = values;
        self.layout = layout;
        self
    }

    pub fn row_labels<S: Into<String>>(mut self, labels: Vec<S>) -> Self {
        self.row_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn column_labels<S: Into<String>>(mut self, labels: Vec<S>) -> Self {
        self.column_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Result<NumericTable> {
        let mut table = match self.layout {
            ValueLayout::Row => NumericTable::from_rows(self.values)?,
            ValueLayout::Column => NumericTable::from_columns(self.values)?,
        };
        if !self.row_labels.is_empty() {
            table.set_row_labels(self.row_labels)?;
        }
        if !self.column_labels.is_empty() {
            table.set_column_labels(self.column_labels)?;
        }
        Ok(table)
    }
}

fn default_labels(n: usize) -> Vec<String> {
    (0..n).map(|i| i.to_string()).collect()
}

impl NumericTable {
    pub fn builder() -> NumericTableBuilder {
        NumericTableBuilder::new()
    }

    /// Create a table from row vectors. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map(|r| r.len()).unwrap_or(0);

        let mut values = Vec::with_capacity(n_rows * n_cols);
        for row in rows {
            if row.len() != n_cols {
                return Err(ScalerError::DimensionMismatch {
                    expected: n_cols,
                    got: row.len(),
                });
            }
            values.extend(row);
        }

        Ok(Self {
            values,
            n_rows,
            n_cols,
            row_labels: default_labels(n_rows),
            column_labels: default_labels(n_cols),
        })
    }

    /// Create a table from column vectors. All columns must have the same length.
    pub fn from_columns(columns: Vec<Vec<f64>>) -> Result<Self> {
        let n_cols = columns.len();
        let n_rows = columns.first().map(|c| c.len()).unwrap_or(0);

        for col in &columns {
            if col.len() != n_rows {
                return Err(ScalerError::DimensionMismatch {
                    expected: n_rows,
                    got: col.len(),
                });
            }
        }

        let mut values = vec![f64::NAN; n_rows * n_cols];
        for (j, col) in columns.iter().enumerate() {
            for (i, &v) in col.iter().enumerate() {
                values[i * n_cols + j] = v;
            }
        }

        Ok(Self {
            values,
            n_rows,
            n_cols,
            row_labels: default_labels(n_rows),
            column_labels: default_labels(n_cols),
        })
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Row-major view of all values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    pub fn column_labels(&self) -> &[String] {
        &self.column_labels
    }

    pub fn set_row_labels(&mut self, labels: Vec<String>) -> Result<()> {
        if labels.len() != self.n_rows {
            return Err(ScalerError::DimensionMismatch {
                expected: self.n_rows,
                got: labels.len(),
            });
        }
        self.row_labels = labels;
        Ok(())
    }

    pub fn set_column_labels(&mut self, labels: Vec<String>) -> Result<()> {
        if labels.len() != self.n_cols {
            return Err(ScalerError::DimensionMismatch {
                expected: self.n_cols,
                got: labels.len(),
            });
        }
        self.column_labels = labels;
        Ok(())
    }

    /// Value at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        if row >= self.n_rows {
            return Err(ScalerError::IndexOutOfBounds {
                index: row,
                size: self.n_rows,
            });
        }
        if col >= self.n_cols {
            return Err(ScalerError::IndexOutOfBounds {
                index: col,
                size: self.n_cols,
            });
        }
        Ok(self.values[row * self.n_cols + col])
    }

    /// Values of one row.
    pub fn row(&self, index: usize) -> Result<&[f64]> {
        if index >= self.n_rows {
            return Err(ScalerError::IndexOutOfBounds {
                index,
                size: self.n_rows,
            });
        }
        let start = index * self.n_cols;
        Ok(&self.values[start..start + self.n_cols])
    }

    /// Values of one column (copied, storage is row-major).
    pub fn column(&self, index: usize) -> Result<Vec<f64>> {
        if index >= self.n_cols {
            return Err(ScalerError::IndexOutOfBounds {
                index,
                size: self.n_cols,
            });
        }
        Ok((0..self.n_rows)
            .map(|i| self.values[i * self.n_cols + index])
            .collect())
    }

    /// Number of slices along `axis`.
    pub fn n_slices(&self, axis: Axis) -> usize {
        match axis {
            Axis::Row => self.n_rows,
            Axis::Column => self.n_cols,
        }
    }

    /// Length of each slice along `axis`.
    pub fn slice_len(&self, axis: Axis) -> usize {
        self.n_slices(axis.transpose())
    }

    fn slice_values(&self, axis: Axis) -> Vec<Vec<f64>> {
        match axis {
            Axis::Row => (0..self.n_rows)
                .map(|i| self.values[i * self.n_cols..(i + 1) * self.n_cols].to_vec())
                .collect(),
            Axis::Column => (0..self.n_cols)
                .map(|j| {
                    (0..self.n_rows)
                        .map(|i| self.values[i * self.n_cols + j])
                        .collect()
                })
                .collect(),
        }
    }

    /// Cut the table into labeled series along `axis`.
    ///
    /// A row slice is indexed by the column labels, a column slice by the
    /// row labels.
    pub fn slices(&self, axis: Axis) -> Vec<NumericSeries> {
        let index = match axis {
            Axis::Row => &self.column_labels,
            Axis::Column => &self.row_labels,
        };
        self.slice_values(axis)
            .into_iter()
            .map(|values| NumericSeries::from_parts(index.clone(), values))
            .collect()
    }

    /// Apply `f` to every slice along `axis` and reassemble a table with the
    /// same shape and labels.
    ///
    /// Slices are independent. The first error aborts the whole call and no
    /// partially transformed table is returned.
    pub fn map_slices<F>(&self, axis: Axis, f: F) -> Result<NumericTable>
    where
        F: Fn(&[f64]) -> Result<Vec<f64>> + Send + Sync,
    {
        let slices = self.slice_values(axis);
        let expected = self.slice_len(axis);

        let run = |slice: &Vec<f64>| -> Result<Vec<f64>> {
            let out = f(slice)?;
            if out.len() != expected {
                return Err(ScalerError::DimensionMismatch {
                    expected,
                    got: out.len(),
                });
            }
            Ok(out)
        };

        #[cfg(feature = "parallel")]
        let mapped: Result<Vec<Vec<f64>>> = slices.par_iter().map(run).collect();
        #[cfg(not(feature = "parallel"))]
        let mapped: Result<Vec<Vec<f64>>> = slices.iter().map(run).collect();

        self.with_slices(axis, mapped?)
    }

    /// Rebuild a table of this table's shape and labels from slices.
    fn with_slices(&self, axis: Axis, slices: Vec<Vec<f64>>) -> Result<NumericTable> {
        let mut table = match axis {
            // an empty slice list loses the other dimension
            Axis::Row if slices.is_empty() => {
                NumericTable::from_columns(vec![Vec::new(); self.n_cols])?
            }
            Axis::Row => NumericTable::from_rows(slices)?,
            Axis::Column if slices.is_empty() => {
                NumericTable::from_rows(vec![Vec::new(); self.n_rows])?
            }
            Axis::Column => NumericTable::from_columns(slices)?,
        };
        table.row_labels = self.row_labels.clone();
        table.column_labels = self.column_labels.clone();
        Ok(table)
    }
}
