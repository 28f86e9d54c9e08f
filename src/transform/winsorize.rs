//! Winsorization: clamping extreme values before standardization.
//!
//! Two policies are provided:
//!
//! - **Recursive**: repeatedly clamp values lying more than `max_score`
//!   sample standard deviations from the mean, recomputing mean and standard
//!   deviation from the clamped data each round, until the largest
//!   standardized distance is within `max_score + eps` or the clamp bounds
//!   stop moving.
//! - **Fixed quantile**: clip a fixed proportion of the sorted values at each
//!   tail to the nearest surviving value.
//!
//! Missing values (`NaN`) never take part in the statistics and are returned
//! unchanged.
//!
//! # Example
//!
//! ```
//! use anofox_scaler::transform::{winsorize_recursive, WinsorizeConfig};
//!
//! let mut values: Vec<f64> = (1..20).map(f64::from).collect();
//! values.push(1000.0);
//!
//! let clamped = winsorize_recursive(&values, &WinsorizeConfig::default()).unwrap();
//! assert!(clamped[19] < 40.0);
//! assert_eq!(clamped[0], 1.0);
//! ```

use crate::core::NumericSeries;
use crate::error::{Result, ScalerError};
use crate::transform::traits::{Scaler, ScalerConfig};
use crate::utils::{count_valid, nan_mean, nan_std_dev, nan_sum};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Upper bound on clamping rounds before recursive winsorization gives up.
pub const MAX_ITERATIONS: usize = 50_000;

/// Thresholds for recursive winsorization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WinsorizeConfig {
    /// Clamp distance, in sample standard deviations from the mean.
    pub max_score: f64,
    /// Slack added to `max_score` when deciding the series is settled.
    pub eps: f64,
}

impl Default for WinsorizeConfig {
    fn default() -> Self {
        Self {
            max_score: 2.8,
            eps: 0.3,
        }
    }
}

impl WinsorizeConfig {
    pub fn new(max_score: f64, eps: f64) -> Self {
        Self { max_score, eps }
    }

    pub fn with_max_score(mut self, max_score: f64) -> Self {
        self.max_score = max_score;
        self
    }

    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    /// `max_score + eps`: the stop threshold, and the replacement value in
    /// the single-value regime.
    pub fn threshold(&self) -> f64 {
        self.max_score + self.eps
    }
}

/// Partial [`WinsorizeConfig`] for per-call overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WinsorizeOverrides {
    pub max_score: Option<f64>,
    pub eps: Option<f64>,
}

impl ScalerConfig for WinsorizeConfig {
    type Overrides = WinsorizeOverrides;

    fn merge(&self, overrides: &WinsorizeOverrides) -> Self {
        Self {
            max_score: overrides.max_score.unwrap_or(self.max_score),
            eps: overrides.eps.unwrap_or(self.eps),
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.max_score.is_finite() || self.max_score <= 0.0 {
            return Err(ScalerError::InvalidParameter(format!(
                "max_score must be positive and finite, got {}",
                self.max_score
            )));
        }
        if !self.eps.is_finite() || self.eps < 0.0 {
            return Err(ScalerError::InvalidParameter(format!(
                "eps must be non-negative and finite, got {}",
                self.eps
            )));
        }
        Ok(())
    }
}

/// Why recursive winsorization stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// At most one non-missing value; no standard deviation exists.
    Degenerate,
    /// Largest standardized distance is within `max_score + eps`.
    WithinThreshold,
    /// Clamp bounds equal those of the previous round.
    BoundsStable,
}

/// Diagnostics from one recursive winsorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinsorizeReport {
    /// Clamping rounds performed.
    pub iterations: usize,
    pub stop: StopReason,
}

/// Recursively winsorize one slice with the default iteration bound.
///
/// Returns [`ScalerError::ConvergenceFailure`] if the bound is exhausted.
pub fn winsorize_recursive(values: &[f64], config: &WinsorizeConfig) -> Result<Vec<f64>> {
    winsorize_recursive_bounded(values, config, MAX_ITERATIONS).map(|(out, _)| out)
}

/// Recursively winsorize one slice, giving up after `max_iterations` rounds.
///
/// An out-of-range `config` is rejected with
/// [`ScalerError::InvalidParameter`] before any iteration runs.
pub fn winsorize_recursive_bounded(
    values: &[f64],
    config: &WinsorizeConfig,
    max_iterations: usize,
) -> Result<(Vec<f64>, WinsorizeReport)> {
    config.validate()?;
    let mut out = values.to_vec();
    let threshold = config.threshold();

    if count_valid(&out) <= 1 {
        // The replacement is unsigned even when the sum is negative.
        if nan_sum(&out).abs() > threshold {
            for v in out.iter_mut().filter(|v| !v.is_nan()) {
                *v = threshold;
            }
        }
        tracing::debug!(len = out.len(), "degenerate slice, skipped iteration");
        return Ok((
            out,
            WinsorizeReport {
                iterations: 0,
                stop: StopReason::Degenerate,
            },
        ));
    }

    let mut previous: Option<(f64, f64)> = None;

    for iteration in 0..max_iterations {
        let mean = nan_mean(&out);
        let sd = nan_std_dev(&out);
        let lower = mean - config.max_score * sd;
        let upper = mean + config.max_score * sd;

        // NaN when sd is zero, which then falls through to the bounds check
        let z_max = out
            .iter()
            .filter(|v| !v.is_nan())
            .map(|v| ((v - mean) / sd).abs())
            .fold(f64::NAN, f64::max);

        let stop = if z_max <= threshold {
            Some(StopReason::WithinThreshold)
        } else if previous == Some((lower, upper)) {
            Some(StopReason::BoundsStable)
        } else {
            None
        };
        if let Some(stop) = stop {
            tracing::debug!(iterations = iteration, ?stop, "winsorization converged");
            return Ok((
                out,
                WinsorizeReport {
                    iterations: iteration,
                    stop,
                },
            ));
        }

        for v in out.iter_mut() {
            if *v > upper {
                *v = upper;
            } else if *v < lower {
                *v = lower;
            }
        }
        previous = Some((lower, upper));
    }

    tracing::warn!(max_iterations, "winsorization did not converge");
    Err(ScalerError::ConvergenceFailure {
        iterations: max_iterations,
    })
}

/// Recursive winsorizer over a single series.
///
/// The input must be one-dimensional: convert a table with
/// `NumericSeries::try_from(&table)`, which rejects anything that is not a
/// single row or column.
#[derive(Debug, Clone)]
pub struct RecursiveWinsorizer {
    config: WinsorizeConfig,
    max_iterations: usize,
}

impl Default for RecursiveWinsorizer {
    fn default() -> Self {
        Self::new(WinsorizeConfig::default())
    }
}

impl RecursiveWinsorizer {
    pub fn new(config: WinsorizeConfig) -> Self {
        Self {
            config,
            max_iterations: MAX_ITERATIONS,
        }
    }

    /// Lower or raise the iteration bound.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Winsorize raw values with the stored configuration, returning diagnostics.
    pub fn run(&self, values: &[f64]) -> Result<(Vec<f64>, WinsorizeReport)> {
        winsorize_recursive_bounded(values, &self.config, self.max_iterations)
    }
}

impl Scaler for RecursiveWinsorizer {
    type Input = NumericSeries;
    type Output = NumericSeries;
    type Config = WinsorizeConfig;

    fn config(&self) -> &WinsorizeConfig {
        &self.config
    }

    fn apply(&self, input: &NumericSeries, config: &WinsorizeConfig) -> Result<NumericSeries> {
        let (values, _) = winsorize_recursive_bounded(input.values(), config, self.max_iterations)?;
        Ok(input.with_values(values))
    }

    fn name(&self) -> &str {
        "RecursiveWinsorizer"
    }
}

/// Proportions clipped from each tail by fixed-quantile winsorization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QuantileLimits {
    /// Proportion of the smallest values raised to the next value up.
    #[serde(alias = "lower_limit")]
    pub lower: f64,
    /// Proportion of the largest values lowered to the next value down.
    #[serde(alias = "upper_limit")]
    pub upper: f64,
}

impl Default for QuantileLimits {
    fn default() -> Self {
        Self {
            lower: 0.05,
            upper: 0.05,
        }
    }
}

impl QuantileLimits {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("lower", self.lower), ("upper", self.upper)] {
            if !(0.0..1.0).contains(&value) {
                return Err(ScalerError::InvalidParameter(format!(
                    "{} limit must lie in [0, 1), got {}",
                    name, value
                )));
            }
        }
        if self.lower + self.upper >= 1.0 {
            return Err(ScalerError::InvalidParameter(format!(
                "limits must sum to less than 1, got {} + {}",
                self.lower, self.upper
            )));
        }
        Ok(())
    }
}

/// Fixed-quantile winsorization of one slice.
///
/// With `n` non-missing values sorted ascending, the `floor(lower * n)`
/// smallest are replaced by the smallest survivor and the
/// `floor(upper * n)` largest by the largest survivor.
///
/// # Example
/// ```
/// use anofox_scaler::transform::{winsorize_limits, QuantileLimits};
///
/// let values: Vec<f64> = (1..=10).map(f64::from).collect();
/// let out = winsorize_limits(&values, &QuantileLimits::new(0.1, 0.2)).unwrap();
/// assert_eq!(out, vec![2.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 8.0, 8.0]);
/// ```
pub fn winsorize_limits(values: &[f64], limits: &QuantileLimits) -> Result<Vec<f64>> {
    limits.validate()?;
    let mut out = values.to_vec();

    let mut order: Vec<usize> = (0..out.len()).filter(|&i| !out[i].is_nan()).collect();
    let n = order.len();
    if n == 0 {
        return Ok(out);
    }
    order.sort_by(|&a, &b| out[a].partial_cmp(&out[b]).unwrap_or(Ordering::Equal));

    let low_count = (limits.lower * n as f64).floor() as usize;
    let high_count = (limits.upper * n as f64).floor() as usize;

    if low_count > 0 {
        let floor_value = out[order[low_count]];
        for &i in &order[..low_count] {
            out[i] = floor_value;
        }
    }
    if high_count > 0 {
        let keep = n - high_count;
        let ceiling_value = out[order[keep - 1]];
        for &i in &order[keep..] {
            out[i] = ceiling_value;
        }
    }

    Ok(out)
}

/// Winsorization policy applied before z-scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinsorizeMethod {
    /// Recursive clamping at `max_score` standard deviations.
    #[default]
    Recursive,
    /// Clip fixed tail proportions.
    #[serde(alias = "scipy", alias = "limits")]
    FixedQuantile,
    /// Leave values as they are.
    None,
}

impl FromStr for WinsorizeMethod {
    type Err = ScalerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recursive" => Ok(WinsorizeMethod::Recursive),
            "fixed_quantile" | "fixed-quantile" | "scipy" | "limits" => {
                Ok(WinsorizeMethod::FixedQuantile)
            }
            "none" => Ok(WinsorizeMethod::None),
            other => Err(ScalerError::InvalidArgument(format!(
                "unknown winsorize method '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for WinsorizeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WinsorizeMethod::Recursive => write!(f, "recursive"),
            WinsorizeMethod::FixedQuantile => write!(f, "fixed_quantile"),
            WinsorizeMethod::None => write!(f, "none"),
        }
    }
}
