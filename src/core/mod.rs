//! Core data structures for cross-sectional numeric data.

mod series;
mod table;

pub use series::NumericSeries;
pub use table::{Axis, NumericTable, NumericTableBuilder, ValueLayout};
