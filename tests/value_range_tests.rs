use approx::assert_relative_eq;
use chart_geometry::core::{
    ValueRangeOptions, calculate_max_value, calculate_min_max_value,
    calculate_min_max_with_padding, calculate_min_value, calculate_value_range, nice_range,
};

#[test]
fn max_value_rounds_up_to_step() {
    assert_eq!(calculate_max_value(&[12.0, 47.0, 33.0], 10), 50.0);
    assert_eq!(calculate_max_value(&[40.0], 10), 40.0);
    assert_eq!(calculate_max_value(&[-12.0, -3.0], 10), 0.0);
}

#[test]
fn min_value_rounds_down_to_step() {
    assert_eq!(calculate_min_value(&[12.0, 47.0], 10), 10.0);
    assert_eq!(calculate_min_value(&[-12.0, 5.0], 10), -20.0);
}

#[test]
fn empty_input_yields_zero_bounds() {
    assert_eq!(calculate_max_value(&[], 10), 0.0);
    assert_eq!(calculate_min_value(&[], 10), 0.0);
    assert_eq!(calculate_min_max_value(&[], 10), (0.0, 0.0));
    assert_eq!(calculate_min_max_with_padding(&[], 0.1), (0.0, 0.0));
    assert_eq!(
        calculate_value_range(&[], ValueRangeOptions::default()),
        (0.0, 0.0)
    );
}

#[test]
fn zero_step_disables_rounding() {
    assert_eq!(calculate_max_value(&[12.5, 47.25], 0), 47.25);
    assert_eq!(calculate_min_value(&[12.5, 47.25], 0), 12.5);
}

#[test]
fn non_finite_values_are_ignored() {
    assert_eq!(calculate_max_value(&[f64::NAN, 7.0, f64::INFINITY], 10), 10.0);
    assert_eq!(nice_range(&[f64::NEG_INFINITY, 3.0, 18.0]), (0.0, 20.0));
}

#[test]
fn nice_range_uses_step_of_ten() {
    assert_eq!(nice_range(&[-23.0, 41.0]), (-30.0, 50.0));
}

#[test]
fn padding_scales_both_bounds() {
    let (min, max) = calculate_min_max_with_padding(&[100.0, 200.0], 0.05);
    assert_relative_eq!(min, 95.0, epsilon = 1e-9);
    assert_relative_eq!(max, 210.0, epsilon = 1e-9);
}

#[test]
fn all_positive_values_are_anchored_at_zero() {
    let range = calculate_value_range(&[5.0, 9.0], ValueRangeOptions::default());
    assert_eq!(range, (0.0, 9.0));
}

#[test]
fn all_negative_values_are_capped_at_zero() {
    let range = calculate_value_range(&[-5.0, -9.0], ValueRangeOptions::default());
    assert_eq!(range, (-9.0, 0.0));
}

#[test]
fn mixed_sign_values_keep_raw_extremes() {
    let range = calculate_value_range(&[-4.0, 6.0], ValueRangeOptions::default());
    assert_eq!(range, (-4.0, 6.0));
}

#[test]
fn all_zero_fallback_is_opt_in() {
    let plain = calculate_value_range(&[0.0, 0.0], ValueRangeOptions::default());
    assert_eq!(plain, (0.0, 0.0));

    let options = ValueRangeOptions {
        handle_all_zero: true,
        ..ValueRangeOptions::default()
    };
    assert_eq!(calculate_value_range(&[0.0, 0.0], options), (0.0, 10.0));
}

#[test]
fn disabled_defaults_swap_inverted_bounds() {
    let options = ValueRangeOptions {
        default_min_if_all_positive: Some(50.0),
        default_max_if_all_negative: None,
        ..ValueRangeOptions::default()
    };
    assert_eq!(calculate_value_range(&[5.0, 9.0], options), (9.0, 50.0));
}
