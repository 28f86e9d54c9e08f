//! Cross-sectional normalization transforms.
//!
//! Provides recursive and fixed-quantile winsorization, gaussian rank
//! scaling and robust z-scores, all applied independently per row or per
//! column of a [`NumericTable`](crate::core::NumericTable).
//!
//! # Example
//!
//! ```
//! use anofox_scaler::core::{Axis, NumericTable};
//! use anofox_scaler::transform::{GaussRankScaler, Scaler, ZscoreScaler};
//!
//! let table = NumericTable::from_columns(vec![
//!     vec![1.0, 2.0, 3.0, 4.0, 5.0],
//!     vec![6.0, 7.0, 8.0, 9.0, 10.0],
//!     vec![11.0, 12.0, 13.0, 14.0, 15.0],
//! ])
//! .unwrap();
//!
//! // Rank each row and map it onto a standard normal
//! let ranked = GaussRankScaler::along(Axis::Row).call(&table).unwrap();
//!
//! // Winsorize each column recursively, then z-score it
//! let robust = ZscoreScaler::default().call(&table).unwrap();
//!
//! assert_eq!(ranked.shape(), table.shape());
//! assert_eq!(robust.shape(), table.shape());
//! ```

pub mod gauss_rank;
pub mod robust_zscore;
pub mod scale;
pub mod traits;
pub mod winsorize;

pub use gauss_rank::{gauss_rank, GaussRankConfig, GaussRankOverrides, GaussRankScaler};
pub use robust_zscore::{ZscoreConfig, ZscoreOverrides, ZscoreScaler};
pub use scale::zscore;
pub use traits::{Scaler, ScalerConfig};
pub use winsorize::{
    winsorize_limits, winsorize_recursive, winsorize_recursive_bounded, QuantileLimits,
    RecursiveWinsorizer, StopReason, WinsorizeConfig, WinsorizeMethod, WinsorizeOverrides,
    WinsorizeReport, MAX_ITERATIONS,
};
