//! # anofox-scaler
//!
//! Cross-sectional normalization for numeric tables.
//!
//! Provides gaussian rank scaling and outlier-robust z-scores built on
//! recursive winsorization, applied independently to every row or column
//! of a labeled table.

pub mod core;
pub mod error;
pub mod transform;
pub mod utils;

pub use error::{Result, ScalerError};

pub mod prelude {
    pub use crate::core::{Axis, NumericSeries, NumericTable};
    pub use crate::error::{Result, ScalerError};
    pub use crate::transform::{
        GaussRankScaler, QuantileLimits, RecursiveWinsorizer, Scaler, WinsorizeConfig,
        WinsorizeMethod, ZscoreConfig, ZscoreScaler,
    };
}
