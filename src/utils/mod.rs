//! Statistical primitives shared by the transforms.

pub mod stats;

pub use stats::{
    count_valid, nan_mean, nan_std_dev, nan_sum, nan_variance, quantile_normal, rank_average,
};
