//! Numeric range mapping and step snapping.
//!
//! These are the pure functions behind every range-typed option: mapping a
//! value between two linear ranges, snapping it onto a step grid, and
//! rounding to a fixed number of decimal places.
//!
//! # Snapping
//!
//! [`snap_to`] rounds a value to the nearest multiple of `step` measured from
//! `min`, then keeps the result inside `[min, max]`:
//!
//! ```text
//! min=0, step=10, max=100
//!
//!   54 ──► offset 4 (< step/2) ──► 50
//!   56 ──► offset 6 (≥ step/2) ──► 60
//!  105 ──► clamped to 100      ──► 100
//! ```
//!
//! The offset uses the Euclidean remainder, so it always lies in `[0, step)`
//! even for values below `min`. Those values clamp to `min` before the offset
//! is taken, so the convention only matters for the rounding direction of
//! exact half steps, which always round up.
//!
//! Results are always on the grid. When `max` itself is off the grid
//! (`min=0, max=10, step=3`) the largest reachable value is the last grid
//! point below it (`9`), which keeps snapping idempotent.
//!
//! # Example
//!
//! ```rust
//! use optsmith_core::{convert_range, snap_to, round};
//!
//! assert_eq!(snap_to(54.0, 10.0, 0.0, 100.0), 50.0);
//! assert_eq!(convert_range(25.0, 0.0, 100.0, 0.0, 1.0).unwrap(), 0.25);
//! assert_eq!(round(2.346, 2), 2.35);
//! ```

use thiserror::Error;

/// Upper bound on the number of decimal places derived from a step or bound.
pub const MAX_PRECISION: u32 = 10;

/// Relative distance from an integer still treated as whole by [`decimal_places`].
const WHOLE_TOLERANCE: f64 = 4.0 * f64::EPSILON;

/// Errors raised by degenerate range conversions.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum RangeError {
    /// The source range has zero width, so no linear mapping exists.
    #[error("source range has zero width (both bounds are {low})")]
    ZeroWidth {
        /// The shared value of both source bounds.
        low: f64,
    },

    /// One of the range bounds is NaN or infinite.
    #[error("range bounds must be finite")]
    NonFinite,
}

/// Linearly maps `value` from `[from_low, from_high]` onto `[to_low, to_high]`.
///
/// The value itself is not clamped; a value outside the source range maps to
/// a proportionally outside point in the target range.
///
/// # Errors
///
/// - [`RangeError::ZeroWidth`] when `from_low == from_high`
/// - [`RangeError::NonFinite`] when any bound is NaN or infinite, or a range
///   is too wide to measure
///
/// # Example
///
/// ```rust
/// use optsmith_core::{RangeError, convert_range};
///
/// assert_eq!(convert_range(25.0, 0.0, 100.0, 0.0, 1.0), Ok(0.25));
/// assert_eq!(convert_range(5.0, 0.0, 10.0, 100.0, 200.0), Ok(150.0));
/// assert_eq!(
///     convert_range(1.0, 3.0, 3.0, 0.0, 1.0),
///     Err(RangeError::ZeroWidth { low: 3.0 })
/// );
/// ```
pub fn convert_range(
    value: f64,
    from_low: f64,
    from_high: f64,
    to_low: f64,
    to_high: f64,
) -> Result<f64, RangeError> {
    if !(from_low.is_finite() && from_high.is_finite() && to_low.is_finite() && to_high.is_finite())
    {
        return Err(RangeError::NonFinite);
    }

    let width = from_high - from_low;
    let target_width = to_high - to_low;
    if !(width.is_finite() && target_width.is_finite()) {
        return Err(RangeError::NonFinite);
    }
    if width == 0.0 {
        return Err(RangeError::ZeroWidth { low: from_low });
    }

    Ok(((value - from_low) * target_width) / width + to_low)
}

/// Rounds `value` half away from zero at `precision` decimal places.
///
/// Values whose scaled form overflows are returned unchanged.
///
/// # Example
///
/// ```rust
/// use optsmith_core::round;
///
/// assert_eq!(round(1.25, 1), 1.3);
/// assert_eq!(round(-1.25, 1), -1.3);
/// assert_eq!(round(7.5, 0), 8.0);
/// ```
#[inline]
pub fn round(value: f64, precision: u32) -> f64 {
    let factor = libm::pow(10.0, f64::from(precision));
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    libm::round(scaled) / factor
}

/// Counts the decimal places needed to represent `value`, up to [`MAX_PRECISION`].
///
/// Works on the number itself rather than its formatted text, so `0.1`
/// yields `1` even though its binary form is inexact. A scaled value counts
/// as whole when it is within a few ulps of an integer, so large values keep
/// their small fractional parts.
///
/// # Example
///
/// ```rust
/// use optsmith_core::decimal_places;
///
/// assert_eq!(decimal_places(5.0), 0);
/// assert_eq!(decimal_places(0.5), 1);
/// assert_eq!(decimal_places(0.25), 2);
/// ```
pub fn decimal_places(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }

    let mut places = 0;
    let mut factor = 1.0;
    while places < MAX_PRECISION {
        let scaled = value * factor;
        if (scaled - libm::round(scaled)).abs() <= WHOLE_TOLERANCE * scaled.abs().max(1.0) {
            break;
        }
        places += 1;
        factor *= 10.0;
    }
    places
}

/// Returns the step actually used for snapping.
///
/// A zero, negative, or non-finite step falls back to `1.0`.
#[inline]
pub fn effective_step(step: f64) -> f64 {
    if step.is_finite() && step > 0.0 { step } else { 1.0 }
}

/// Precision of the grid `min + k * step`.
///
/// Both the step and the grid origin must be representable, so this is the
/// larger of their decimal place counts.
#[inline]
pub fn grid_precision(step: f64, min: f64) -> u32 {
    decimal_places(effective_step(step)).max(decimal_places(min))
}

/// Snaps `value` to the nearest step from `min`, kept inside `[min, max]`.
///
/// Precision is derived from `step` and `min` via [`grid_precision`]. Use
/// [`snap_to_precision`] when the precision is already known.
///
/// # Example
///
/// ```rust
/// use optsmith_core::snap_to;
///
/// assert_eq!(snap_to(56.0, 10.0, 0.0, 100.0), 60.0);
/// assert_eq!(snap_to(105.0, 10.0, 0.0, 100.0), 100.0);
/// assert_eq!(snap_to(0.34, 0.1, 0.0, 1.0), 0.3);
/// assert_eq!(snap_to(12.0, 5.0, 5.0, 95.0), 10.0);
/// ```
pub fn snap_to(value: f64, step: f64, min: f64, max: f64) -> f64 {
    snap_to_precision(value, step, min, max, grid_precision(step, min))
}

/// Snaps `value` like [`snap_to`], rounding to an explicit `precision`.
///
/// Degenerate inputs are handled deterministically:
///
/// - a zero, negative, or non-finite `step` is treated as `1.0`
/// - `min > max` swaps the bounds
/// - a NaN `value` snaps to `min`
/// - a NaN bound is treated as unbounded on that side
/// - with a finite `min` the grid still applies under an infinite `max`
/// - without a finite `min` there is no grid, so the value is only clamped
pub fn snap_to_precision(value: f64, step: f64, min: f64, max: f64, precision: u32) -> f64 {
    let step_used = effective_step(step);

    #[cfg(feature = "tracing")]
    if step_used != step || min > max {
        tracing::debug!("snap_to: degenerate input (step {step}, bounds {min}..{max})");
    }

    let min = if min.is_nan() { f64::NEG_INFINITY } else { min };
    let max = if max.is_nan() { f64::INFINITY } else { max };
    let (min, max) = if min > max { (max, min) } else { (min, max) };

    if !min.is_finite() {
        // No grid origin
        return match value {
            v if v.is_nan() && max.is_finite() => max,
            v if v.is_nan() => min,
            v => v.clamp(min, max),
        };
    }

    let clamped = if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    };
    if clamped.is_infinite() {
        return clamped;
    }

    let offset = (clamped - min).rem_euclid(step_used);
    let mut snapped = clamped - offset;
    if offset * 2.0 >= step_used {
        snapped += step_used;
    }

    let mut snapped = round(snapped, precision);
    if snapped > max {
        snapped = round(snapped - step_used, precision);
    }
    // Only reachable when `precision` is coarser than the bounds themselves.
    snapped.clamp(min, max)
}
