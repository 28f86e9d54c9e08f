//! Z-score standardization of a single slice.
//!
//! Missing values are omitted from the mean and the sample standard
//! deviation (n-1 denominator) and stay missing in the output.

use crate::utils::{nan_mean, nan_std_dev};

/// Z-scores of a slice.
///
/// x_scaled = (x - mean) / std
///
/// No guard is applied to the divisor: a slice with fewer than two valid
/// values, or with zero spread, comes back as `NaN`.
pub fn zscore(series: &[f64]) -> Vec<f64> {
    let center = nan_mean(series);
    let scale = nan_std_dev(series);
    series.iter().map(|&x| (x - center) / scale).collect()
}
