//! Outlier-robust z-scores.
//!
//! Every slice along the configured axis is first winsorized on its own,
//! with the recursive policy, the fixed-quantile policy or not at all. The
//! winsorized table is then z-scored along the same axis.
//!
//! # Example
//!
//! ```
//! use anofox_scaler::core::{Axis, NumericTable};
//! use anofox_scaler::transform::{Scaler, ZscoreConfig, ZscoreScaler};
//!
//! let table = NumericTable::from_rows(vec![
//!     vec![1.0, 6.0, 11.0],
//!     vec![2.0, 7.0, 12.0],
//! ])
//! .unwrap();
//!
//! let scaler = ZscoreScaler::new(ZscoreConfig::default().with_axis(Axis::Row));
//! let out = scaler.call(&table).unwrap();
//! assert_eq!(out.shape(), (2, 3));
//! assert!((out.get(0, 0).unwrap() + 1.0).abs() < 1e-12);
//! ```

use crate::core::{Axis, NumericTable};
use crate::error::Result;
use crate::transform::scale::zscore;
use crate::transform::traits::{Scaler, ScalerConfig};
use crate::transform::winsorize::{
    winsorize_limits, winsorize_recursive_bounded, QuantileLimits, WinsorizeConfig,
    WinsorizeMethod, WinsorizeOverrides, MAX_ITERATIONS,
};
use serde::{Deserialize, Serialize};

/// Configuration for [`ZscoreScaler`].
///
/// Only the parameter block matching `winsorize_method` is consulted.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZscoreConfig {
    pub axis: Axis,
    pub winsorize_method: WinsorizeMethod,
    /// Parameters of the recursive policy.
    #[serde(alias = "winsorize_params")]
    pub recursive: WinsorizeConfig,
    /// Parameters of the fixed-quantile policy.
    pub limits: QuantileLimits,
}

impl ZscoreConfig {
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_method(mut self, method: WinsorizeMethod) -> Self {
        self.winsorize_method = method;
        self
    }

    /// Select the recursive policy with the given thresholds.
    pub fn recursive(mut self, config: WinsorizeConfig) -> Self {
        self.winsorize_method = WinsorizeMethod::Recursive;
        self.recursive = config;
        self
    }

    /// Select the fixed-quantile policy with the given limits.
    pub fn fixed_quantile(mut self, limits: QuantileLimits) -> Self {
        self.winsorize_method = WinsorizeMethod::FixedQuantile;
        self.limits = limits;
        self
    }
}

/// Partial [`ZscoreConfig`] for per-call overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZscoreOverrides {
    pub axis: Option<Axis>,
    pub winsorize_method: Option<WinsorizeMethod>,
    #[serde(alias = "winsorize_params")]
    pub recursive: WinsorizeOverrides,
    pub limits: Option<QuantileLimits>,
}

impl ScalerConfig for ZscoreConfig {
    type Overrides = ZscoreOverrides;

    fn merge(&self, overrides: &ZscoreOverrides) -> Self {
        Self {
            axis: overrides.axis.unwrap_or(self.axis),
            winsorize_method: overrides.winsorize_method.unwrap_or(self.winsorize_method),
            recursive: self.recursive.merge(&overrides.recursive),
            limits: overrides.limits.unwrap_or(self.limits),
        }
    }

    fn validate(&self) -> Result<()> {
        match self.winsorize_method {
            WinsorizeMethod::Recursive => self.recursive.validate(),
            WinsorizeMethod::FixedQuantile => self.limits.validate(),
            WinsorizeMethod::None => Ok(()),
        }
    }
}

/// Winsorize-then-standardize scaler over a table.
#[derive(Debug, Clone)]
pub struct ZscoreScaler {
    config: ZscoreConfig,
    max_iterations: usize,
}

impl Default for ZscoreScaler {
    fn default() -> Self {
        Self::new(ZscoreConfig::default())
    }
}

impl ZscoreScaler {
    pub fn new(config: ZscoreConfig) -> Self {
        Self {
            config,
            max_iterations: MAX_ITERATIONS,
        }
    }

    /// Iteration bound handed to the recursive winsorizer.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Winsorize every slice along the configured axis without z-scoring.
    pub fn winsorize(&self, input: &NumericTable, config: &ZscoreConfig) -> Result<NumericTable> {
        match config.winsorize_method {
            WinsorizeMethod::Recursive => input.map_slices(config.axis, |slice| {
                winsorize_recursive_bounded(slice, &config.recursive, self.max_iterations)
                    .map(|(values, _)| values)
            }),
            WinsorizeMethod::FixedQuantile => input.map_slices(config.axis, |slice| {
                winsorize_limits(slice, &config.limits)
            }),
            WinsorizeMethod::None => Ok(input.clone()),
        }
    }
}

impl Scaler for ZscoreScaler {
    type Input = NumericTable;
    type Output = NumericTable;
    type Config = ZscoreConfig;

    fn config(&self) -> &ZscoreConfig {
        &self.config
    }

    fn apply(&self, input: &NumericTable, config: &ZscoreConfig) -> Result<NumericTable> {
        tracing::debug!(
            axis = %config.axis,
            method = %config.winsorize_method,
            slices = input.n_slices(config.axis),
            "robust z-scoring"
        );
        let winsorized = self.winsorize(input, config)?;
        winsorized.map_slices(config.axis, |slice| Ok(zscore(slice)))
    }

    fn name(&self) -> &str {
        "ZscoreScaler"
    }
}
