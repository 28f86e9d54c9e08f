//! Statistical utility functions.
//!
//! Every function here treats `NaN` as a missing value: missing entries are
//! skipped when computing statistics and stay `NaN` in element-wise outputs.

use statrs::distribution::{ContinuousCDF, Normal};
use std::cmp::Ordering;

/// Count the non-missing values of a slice.
pub fn count_valid(values: &[f64]) -> usize {
    values.iter().filter(|x| !x.is_nan()).count()
}

/// Sum of the non-missing values (0.0 for an empty or all-missing slice).
pub fn nan_sum(values: &[f64]) -> f64 {
    values.iter().filter(|x| !x.is_nan()).sum()
}

/// Mean of the non-missing values.
pub fn nan_mean(values: &[f64]) -> f64 {
    let n = count_valid(values);
    if n == 0 {
        return f64::NAN;
    }
    nan_sum(values) / n as f64
}

/// Sample variance (n-1 denominator) of the non-missing values.
pub fn nan_variance(values: &[f64]) -> f64 {
    let n = count_valid(values);
    if n < 2 {
        return f64::NAN;
    }
    let m = nan_mean(values);
    let sum_sq: f64 = values
        .iter()
        .filter(|x| !x.is_nan())
        .map(|x| (x - m).powi(2))
        .sum();
    sum_sq / (n - 1) as f64
}

/// Sample standard deviation of the non-missing values.
pub fn nan_std_dev(values: &[f64]) -> f64 {
    nan_variance(values).sqrt()
}

/// Fractional ranks (1-based), ties receive the average of the ranks they span.
///
/// # Example
/// ```
/// use anofox_scaler::utils::rank_average;
///
/// let ranks = rank_average(&[10.0, 30.0, 20.0, 20.0]);
/// assert_eq!(ranks, vec![1.0, 4.0, 2.5, 2.5]);
/// ```
pub fn rank_average(values: &[f64]) -> Vec<f64> {
    let mut ranks = vec![f64::NAN; values.len()];

    let mut indexed: Vec<(usize, f64)> = values
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, x)| !x.is_nan())
        .collect();
    indexed.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

    let n = indexed.len();
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && indexed[j + 1].1 == indexed[i].1 {
            j += 1;
        }
        // positions i..=j share the mean of ranks i+1..=j+1
        let avg_rank = (i + j + 2) as f64 / 2.0;
        for &(original, _) in &indexed[i..=j] {
            ranks[original] = avg_rank;
        }
        i = j + 1;
    }

    ranks
}

/// Quantile function of the standard normal distribution.
///
/// Uses the exact `statrs` inverse CDF rather than a rational
/// approximation, so the result carries full double precision.
///
/// # Example
/// ```
/// use anofox_scaler::utils::quantile_normal;
///
/// let z = quantile_normal(0.975);
/// assert!((z - 1.959963984540054).abs() < 1e-9);
/// ```
pub fn quantile_normal(p: f64) -> f64 {
    if p.is_nan() {
        return f64::NAN;
    }
    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }
    Normal::new(0.0, 1.0)
        .map(|normal| normal.inverse_cdf(p))
        .unwrap_or(f64::NAN)
}
