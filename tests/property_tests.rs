//! Property-based tests for the scalers.
//!
//! These tests verify invariants that should hold for all valid inputs,
//! using randomly generated tables and slices.

use anofox_scaler::core::{Axis, NumericTable};
use anofox_scaler::transform::{
    gauss_rank, winsorize_recursive, winsorize_recursive_bounded, GaussRankScaler, QuantileLimits,
    Scaler, StopReason, WinsorizeConfig, WinsorizeMethod, ZscoreConfig, ZscoreScaler,
    MAX_ITERATIONS,
};
use anofox_scaler::utils::{nan_mean, nan_std_dev};
use proptest::prelude::*;

/// Strategy for generating slice values.
/// Adds small variation so no two values in a slice coincide.
fn distinct_values_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    (min_len..max_len).prop_flat_map(|len| {
        prop::collection::vec(1.0..1000.0_f64, len).prop_map(|mut v| {
            for (i, val) in v.iter_mut().enumerate() {
                *val += (i as f64) * 0.001;
            }
            v
        })
    })
}

/// Strategy for slices with one planted outlier.
fn outlier_values_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    (distinct_values_strategy(min_len, max_len), 1e4..1e6_f64).prop_map(|(mut v, spike)| {
        let last = v.len() - 1;
        v[last] += spike;
        v
    })
}

/// Strategy for a table whose columns are distinct-valued slices.
fn table_strategy() -> impl Strategy<Value = NumericTable> {
    (2usize..12, 2usize..8).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(prop::collection::vec(-500.0..500.0_f64, cols), rows).prop_map(
            |mut data| {
                for (i, row) in data.iter_mut().enumerate() {
                    for (j, val) in row.iter_mut().enumerate() {
                        *val += (i * 31 + j) as f64 * 0.0007;
                    }
                }
                NumericTable::from_rows(data).unwrap()
            },
        )
    })
}

fn axis_strategy() -> impl Strategy<Value = Axis> {
    prop_oneof![Just(Axis::Row), Just(Axis::Column)]
}

fn method_strategy() -> impl Strategy<Value = WinsorizeMethod> {
    prop_oneof![
        Just(WinsorizeMethod::Recursive),
        Just(WinsorizeMethod::FixedQuantile),
        Just(WinsorizeMethod::None),
    ]
}

fn max_abs_zscore(values: &[f64]) -> f64 {
    let mean = nan_mean(values);
    let sd = nan_std_dev(values);
    values
        .iter()
        .map(|v| ((v - mean) / sd).abs())
        .fold(0.0, f64::max)
}

fn slices(table: &NumericTable, axis: Axis) -> Vec<Vec<f64>> {
    match axis {
        Axis::Row => (0..table.n_rows())
            .map(|i| table.row(i).unwrap().to_vec())
            .collect(),
        Axis::Column => (0..table.n_cols())
            .map(|j| table.column(j).unwrap())
            .collect(),
    }
}

// =============================================================================
// Property: Output shape equals input shape
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn gauss_rank_preserves_shape(table in table_strategy(), axis in axis_strategy()) {
        let out = GaussRankScaler::along(axis).call(&table).unwrap();
        prop_assert_eq!(out.shape(), table.shape());
        prop_assert_eq!(out.row_labels(), table.row_labels());
        prop_assert_eq!(out.column_labels(), table.column_labels());
    }

    #[test]
    fn zscore_preserves_shape(
        table in table_strategy(),
        axis in axis_strategy(),
        method in method_strategy()
    ) {
        let config = ZscoreConfig::default().with_axis(axis).with_method(method);
        let out = ZscoreScaler::new(config).call(&table).unwrap();
        prop_assert_eq!(out.shape(), table.shape());
    }
}

// =============================================================================
// Property: Every slice comes out with mean 0 and sample std 1
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn gauss_rank_slices_are_standardized(table in table_strategy(), axis in axis_strategy()) {
        let out = GaussRankScaler::along(axis).call(&table).unwrap();
        for slice in slices(&out, axis) {
            prop_assert!(nan_mean(&slice).abs() < 1e-9);
            prop_assert!((nan_std_dev(&slice) - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn zscore_slices_are_standardized(
        table in table_strategy(),
        axis in axis_strategy(),
        method in method_strategy(),
        lower in 0.0..0.25_f64,
        upper in 0.0..0.25_f64
    ) {
        let config = ZscoreConfig {
            axis,
            winsorize_method: method,
            limits: QuantileLimits::new(lower, upper),
            ..Default::default()
        };
        let out = ZscoreScaler::new(config).call(&table).unwrap();
        for slice in slices(&out, axis) {
            prop_assert!(nan_mean(&slice).abs() < 1e-9);
            prop_assert!((nan_std_dev(&slice) - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn gauss_rank_ignores_monotone_rescaling(
        values in distinct_values_strategy(2, 40),
        scale in 0.1..50.0_f64,
        shift in -100.0..100.0_f64
    ) {
        let rescaled: Vec<f64> = values.iter().map(|v| v * scale + shift).collect();
        prop_assert_eq!(gauss_rank(&values), gauss_rank(&rescaled));
    }
}

// =============================================================================
// Property: Recursive winsorization bounds, idempotence and range
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn winsorized_zscores_within_threshold(
        values in outlier_values_strategy(2, 80),
        max_score in 1.5..4.0_f64,
        eps in 0.0..0.5_f64
    ) {
        let config = WinsorizeConfig::new(max_score, eps);
        let out = winsorize_recursive(&values, &config).unwrap();
        prop_assert_eq!(out.len(), values.len());
        prop_assert!(max_abs_zscore(&out) <= config.threshold() + 1e-9);
    }

    #[test]
    fn second_pass_changes_nothing(values in outlier_values_strategy(2, 80)) {
        let config = WinsorizeConfig::default();
        let first = winsorize_recursive(&values, &config).unwrap();
        let (second, report) = winsorize_recursive_bounded(&first, &config, MAX_ITERATIONS).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert!(report.iterations <= 1);
    }

    #[test]
    fn clamping_stays_inside_input_range(values in outlier_values_strategy(2, 80)) {
        let out = winsorize_recursive(&values, &WinsorizeConfig::default()).unwrap();
        let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        for v in out {
            prop_assert!(v >= lo && v <= hi);
        }
    }

    #[test]
    fn single_value_regime_is_deterministic(value in -100.0..100.0_f64) {
        let config = WinsorizeConfig::default();
        let (out, report) = winsorize_recursive_bounded(&[value], &config, MAX_ITERATIONS).unwrap();
        prop_assert_eq!(report.stop, StopReason::Degenerate);
        if value.abs() > config.threshold() {
            prop_assert_eq!(out[0], config.threshold());
        } else {
            prop_assert_eq!(out[0], value);
        }
    }
}
