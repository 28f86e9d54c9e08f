//! Gaussian rank scaling.
//!
//! Each slice is ranked (average ranks for ties), the ranks are mapped to
//! `rank / (count + 1)` in the open unit interval, pushed through the
//! standard normal quantile function and finally z-scored again so the
//! slice has zero mean and unit sample standard deviation.

use crate::core::{Axis, NumericTable};
use crate::error::Result;
use crate::transform::scale::zscore;
use crate::transform::traits::{Scaler, ScalerConfig};
use crate::utils::{count_valid, quantile_normal, rank_average};
use serde::{Deserialize, Serialize};

/// Gaussian rank transform of one slice.
///
/// # Example
/// ```
/// use anofox_scaler::transform::gauss_rank;
///
/// let z = gauss_rank(&[1.0, 6.0, 11.0]);
/// assert!((z[0] + 1.0).abs() < 1e-12);
/// assert!(z[1].abs() < 1e-12);
/// assert!((z[2] - 1.0).abs() < 1e-12);
/// ```
pub fn gauss_rank(slice: &[f64]) -> Vec<f64> {
    let ranks = rank_average(slice);
    // +1 keeps the top rank strictly below 1.0
    let denom = count_valid(slice) as f64 + 1.0;
    let normal: Vec<f64> = ranks
        .iter()
        .map(|&r| quantile_normal(r / denom))
        .collect();
    zscore(&normal)
}

/// Configuration for [`GaussRankScaler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GaussRankConfig {
    pub axis: Axis,
}

impl GaussRankConfig {
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }
}

/// Partial [`GaussRankConfig`] for per-call overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GaussRankOverrides {
    pub axis: Option<Axis>,
}

impl ScalerConfig for GaussRankConfig {
    type Overrides = GaussRankOverrides;

    fn merge(&self, overrides: &GaussRankOverrides) -> Self {
        Self {
            axis: overrides.axis.unwrap_or(self.axis),
        }
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Rank-to-normal scaler over a table.
#[derive(Debug, Clone, Default)]
pub struct GaussRankScaler {
    config: GaussRankConfig,
}

impl GaussRankScaler {
    pub fn new(config: GaussRankConfig) -> Self {
        Self { config }
    }

    /// Scaler working along `axis`.
    pub fn along(axis: Axis) -> Self {
        Self::new(GaussRankConfig { axis })
    }
}

impl Scaler for GaussRankScaler {
    type Input = NumericTable;
    type Output = NumericTable;
    type Config = GaussRankConfig;

    fn config(&self) -> &GaussRankConfig {
        &self.config
    }

    fn apply(&self, input: &NumericTable, config: &GaussRankConfig) -> Result<NumericTable> {
        tracing::debug!(
            axis = %config.axis,
            slices = input.n_slices(config.axis),
            "gauss rank scaling"
        );
        input.map_slices(config.axis, |slice| Ok(gauss_rank(slice)))
    }

    fn name(&self) -> &str {
        "GaussRankScaler"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ValueLayout;
    use crate::utils::{nan_mean, nan_std_dev};
    use approx::assert_relative_eq;

    fn sample() -> NumericTable {
        NumericTable::builder()
            .values(
                vec![
                    vec![1.0, 2.0, 3.0, 4.0, 5.0],
                    vec![6.0, 7.0, 8.0, 9.0, 10.0],
                    vec![11.0, 12.0, 13.0, 14.0, 15.0],
                ],
                ValueLayout::Column,
            )
            .column_labels(vec!["A", "B", "C"])
            .build()
            .unwrap()
    }

    fn assert_standardized(values: &[f64]) {
        assert_relative_eq!(nan_mean(values), 0.0, epsilon = 1e-9);
        assert_relative_eq!(nan_std_dev(values), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn row_wise_rows_are_standardized() {
        let table = sample();
        let out = GaussRankScaler::along(Axis::Row).call(&table).unwrap();

        assert_eq!(out.shape(), table.shape());
        assert_eq!(out.column_labels(), table.column_labels());
        for i in 0..out.n_rows() {
            let row = out.row(i).unwrap();
            assert_standardized(row);
            assert_relative_eq!(row[0], -1.0, epsilon = 1e-12);
            assert_relative_eq!(row[2], 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn column_wise_is_the_default() {
        let table = sample();
        let out = GaussRankScaler::default().call(&table).unwrap();
        assert_eq!(out.shape(), (5, 3));
        for j in 0..out.n_cols() {
            assert_standardized(&out.column(j).unwrap());
        }
        // every column is 1..5 in order, so all columns agree
        assert_eq!(out.column(0).unwrap(), out.column(2).unwrap());
    }

    #[test]
    fn output_depends_only_on_order() {
        let a = gauss_rank(&[1.0, 2.0, 3.0, 4.0]);
        let b = gauss_rank(&[-100.0, 0.5, 0.6, 1e9]);
        for (x, y) in a.iter().zip(&b) {
            assert_relative_eq!(*x, *y, epsilon = 1e-12);
        }
    }

    #[test]
    fn ties_share_a_value() {
        let z = gauss_rank(&[3.0, 1.0, 3.0, 2.0]);
        assert_eq!(z[0], z[2]);
        assert!(z[1] < z[3] && z[3] < z[0]);
        assert_standardized(&z);
    }

    #[test]
    fn missing_values_are_skipped() {
        let z = gauss_rank(&[4.0, f64::NAN, 1.0, 9.0]);
        assert!(z[1].is_nan());
        assert_standardized(&z);
        // the three valid values map to ranks 1..3 over a count of 3
        let expected = gauss_rank(&[4.0, 1.0, 9.0]);
        assert_relative_eq!(z[0], expected[0], epsilon = 1e-12);
        assert_relative_eq!(z[3], expected[2], epsilon = 1e-12);
    }

    #[test]
    fn single_value_slice_is_nan() {
        let z = gauss_rank(&[f64::NAN, 5.0]);
        assert!(z.iter().all(|x| x.is_nan()));
    }

    #[test]
    fn axis_override_is_per_call() {
        let table = sample();
        let scaler = GaussRankScaler::default();
        let out = scaler
            .call_with(
                &table,
                &GaussRankOverrides {
                    axis: Some(Axis::Row),
                },
            )
            .unwrap();
        assert_relative_eq!(out.get(0, 0).unwrap(), -1.0, epsilon = 1e-12);
        assert_eq!(scaler.config().axis, Axis::Column);
    }
}
