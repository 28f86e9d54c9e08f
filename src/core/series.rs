//! NumericSeries: one labeled row or column slice.

use crate::core::NumericTable;
use crate::error::{Result, ScalerError};
use crate::utils::count_valid;

/// An ordered, labeled sequence of `f64` values. `NaN` marks a missing value.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericSeries {
    index: Vec<String>,
    values: Vec<f64>,
}

impl NumericSeries {
    /// Create a series with a positional index ("0", "1", ...).
    pub fn new(values: Vec<f64>) -> Self {
        let index = (0..values.len()).map(|i| i.to_string()).collect();
        Self { index, values }
    }

    /// Create a series with explicit index labels.
    pub fn with_index<S: Into<String>>(index: Vec<S>, values: Vec<f64>) -> Result<Self> {
        if index.len() != values.len() {
            return Err(ScalerError::DimensionMismatch {
                expected: values.len(),
                got: index.len(),
            });
        }
        Ok(Self {
            index: index.into_iter().map(Into::into).collect(),
            values,
        })
    }

    pub(crate) fn from_parts(index: Vec<String>, values: Vec<f64>) -> Self {
        debug_assert_eq!(index.len(), values.len());
        Self { index, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn index(&self) -> &[String] {
        &self.index
    }

    /// Number of non-missing values.
    pub fn count(&self) -> usize {
        count_valid(&self.values)
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Same index, new values.
    pub(crate) fn with_values(&self, values: Vec<f64>) -> Self {
        Self::from_parts(self.index.clone(), values)
    }
}

impl From<Vec<f64>> for NumericSeries {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

/// A table converts to a series only when it is a single row or a single
/// column. Anything two-dimensional is rejected rather than flattened.
impl TryFrom<&NumericTable> for NumericSeries {
    type Error = ScalerError;

    fn try_from(table: &NumericTable) -> Result<Self> {
        let (rows, cols) = table.shape();
        if cols == 1 {
            Ok(Self::from_parts(
                table.row_labels().to_vec(),
                table.values().to_vec(),
            ))
        } else if rows == 1 {
            Ok(Self::from_parts(
                table.column_labels().to_vec(),
                table.values().to_vec(),
            ))
        } else {
            Err(ScalerError::InvalidArgument(format!(
                "only series are allowed, got a {}x{} table",
                rows, cols
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_index_by_default() {
        let s = NumericSeries::new(vec![1.0, f64::NAN, 3.0]);
        assert_eq!(s.len(), 3);
        assert_eq!(s.count(), 2);
        assert_eq!(s.index(), &["0", "1", "2"]);
    }

    #[test]
    fn explicit_index_length_is_checked() {
        let s = NumericSeries::with_index(vec!["a", "b"], vec![1.0, 2.0]).unwrap();
        assert_eq!(s.index(), &["a", "b"]);

        let err = NumericSeries::with_index(vec!["a"], vec![1.0, 2.0]).unwrap_err();
        assert_eq!(err, ScalerError::DimensionMismatch { expected: 2, got: 1 });
    }

    #[test]
    fn single_column_table_becomes_series() {
        let table = NumericTable::builder()
            .values(vec![vec![1.0, 2.0, 3.0]], crate::core::ValueLayout::Column)
            .row_labels(vec!["x", "y", "z"])
            .build()
            .unwrap();
        let s = NumericSeries::try_from(&table).unwrap();
        assert_eq!(s.values(), &[1.0, 2.0, 3.0]);
        assert_eq!(s.index(), &["x", "y", "z"]);
    }

    #[test]
    fn single_row_table_becomes_series() {
        let table = NumericTable::from_rows(vec![vec![4.0, 5.0]]).unwrap();
        let s = NumericSeries::try_from(&table).unwrap();
        assert_eq!(s.values(), &[4.0, 5.0]);
    }

    #[test]
    fn two_dimensional_table_is_invalid_argument() {
        let table = NumericTable::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert!(matches!(
            NumericSeries::try_from(&table),
            Err(ScalerError::InvalidArgument(_))
        ));
    }
}
