//! Property-based tests for optsmith-core range mapping.
//!
//! Tests snapping idempotence and bounds, conversion identity, and slider
//! geometry using proptest for randomized input generation.

use optsmith_core::{RangeError, RangeSpec, SliderTrack, convert_range, round, snap_to};
use proptest::prelude::*;

/// Steps a settings panel realistically uses.
const STEPS: [f64; 8] = [0.1, 0.25, 0.5, 1.0, 2.0, 3.0, 5.0, 10.0];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Snapping an already snapped value returns it unchanged.
    #[test]
    fn snap_is_idempotent(
        min in -500i32..500,
        width in 1i32..1000,
        step_idx in 0usize..STEPS.len(),
        value in -5000.0f64..5000.0,
    ) {
        let min = f64::from(min);
        let max = min + f64::from(width);
        let step = STEPS[step_idx];

        let once = snap_to(value, step, min, max);
        let twice = snap_to(once, step, min, max);
        prop_assert_eq!(
            once, twice,
            "snap not idempotent: value={}, step={}, range=[{}, {}]",
            value, step, min, max
        );
    }

    /// The snapped value always lies within the bounds, for arbitrary
    /// (including off-grid and fractional) bounds and steps.
    #[test]
    fn snap_stays_in_bounds(
        min in -1000.0f64..1000.0,
        width in 0.0f64..1000.0,
        step in 0.001f64..100.0,
        value in -10_000.0f64..10_000.0,
    ) {
        let max = min + width;
        let snapped = snap_to(value, step, min, max);
        prop_assert!(
            snapped >= min && snapped <= max,
            "snap_to({}, {}, {}, {}) = {} escaped the range",
            value, step, min, max, snapped
        );
    }

    /// Snapping lands on the grid `min + k * step` (within rounding), also
    /// when `min` has a fractional part.
    #[test]
    fn snap_lands_on_grid(
        min in -500i32..500,
        min_frac in 0u32..1000,
        width in 1i32..1000,
        step_idx in 0usize..STEPS.len(),
        value in -5000.0f64..5000.0,
    ) {
        let min = f64::from(min) + f64::from(min_frac) / 1000.0;
        let max = min + f64::from(width);
        let step = STEPS[step_idx];

        let snapped = snap_to(value, step, min, max);
        let steps_from_min = (snapped - min) / step;
        prop_assert!(
            (steps_from_min - steps_from_min.round()).abs() < 1e-6,
            "{} is not on the grid from {} by {}",
            snapped, min, step
        );
    }

    /// The grid survives large magnitudes, where a fractional `min` is only
    /// a few ulps above an integer.
    #[test]
    fn snap_lands_on_grid_far_from_zero(
        base in prop_oneof![Just(1.0e8), Just(-1.0e8), Just(3.0e9)],
        min_frac in 1u32..1000,
        width in 1i32..1000,
        step_idx in 0usize..STEPS.len(),
        offset in -100.0f64..1100.0,
    ) {
        let min = base + f64::from(min_frac) / 1000.0;
        let max = min + f64::from(width);
        let step = STEPS[step_idx];

        let snapped = snap_to(min + offset, step, min, max);
        let steps_from_min = (snapped - min) / step;
        prop_assert!(
            (steps_from_min - steps_from_min.round()).abs() < 1e-4,
            "{} is {} steps from {} by {}",
            snapped, steps_from_min, min, step
        );
        prop_assert!(snapped >= min && snapped <= max);
    }

    /// Mapping a range onto itself is the identity.
    #[test]
    fn convert_range_identity(
        low in -1.0e6f64..1.0e6,
        width in 1.0e-3f64..1.0e6,
        t in 0.0f64..=1.0,
    ) {
        let high = low + width;
        let v = low + t * width;
        let mapped = convert_range(v, low, high, low, high).unwrap();
        let tol = 1e-9 * (low.abs() + width + 1.0);
        prop_assert!(
            (mapped - v).abs() <= tol,
            "identity mapping drifted: v={}, mapped={}, range=[{}, {}]",
            v, mapped, low, high
        );
    }

    /// A zero-width source range always fails the same way.
    #[test]
    fn convert_range_zero_width_fails(
        low in -1.0e6f64..1.0e6,
        value in -1.0e6f64..1.0e6,
        to_low in -100.0f64..100.0,
        to_high in -100.0f64..100.0,
    ) {
        prop_assert_eq!(
            convert_range(value, low, low, to_low, to_high),
            Err(RangeError::ZeroWidth { low })
        );
    }

    /// Rounding twice at the same precision changes nothing.
    #[test]
    fn round_is_idempotent(value in -1.0e6f64..1.0e6, precision in 0u32..7) {
        let once = round(value, precision);
        prop_assert_eq!(once, round(once, precision));
    }

    /// The fill percentage is always a valid CSS width.
    #[test]
    fn percent_of_is_bounded(
        min in -1000.0f64..1000.0,
        width in 0.0f64..1000.0,
        value in -1.0e5f64..1.0e5,
    ) {
        let spec = RangeSpec::new(min, min + width);
        let pct = spec.percent_of(value);
        prop_assert!((0.0..=100.0).contains(&pct), "percent_of({}) = {}", value, pct);
    }

    /// Any handle position maps to a value inside the option's range.
    #[test]
    fn slider_value_within_range(
        start in 0.0f64..500.0,
        length in 1.0f64..1000.0,
        position in -2000.0f64..2000.0,
        step_idx in 0usize..STEPS.len(),
    ) {
        let track = SliderTrack::new(start, start + length);
        let spec = RangeSpec::new(5.0, 95.0).with_step(STEPS[step_idx]);
        let value = track.value_at(position, &spec).unwrap();
        prop_assert!(value >= spec.min() && value <= spec.max());
        prop_assert_eq!(value, spec.snap(value));
    }
}
