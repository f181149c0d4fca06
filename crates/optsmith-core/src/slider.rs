//! Slider geometry for range options.
//!
//! A UI binding layer draws a range option as a bar with a draggable handle.
//! These helpers do the arithmetic: handle position to option value, value to
//! fill percentage, arrow-key nudges, and the handle's label text. None of it
//! touches a real widget toolkit.
//!
//! ```text
//!  start                                   end
//!    │◄─────────── SliderTrack ────────────►│
//!    ├──────────────■───────────────────────┤
//!    0%          handle                   100%
//!   min ───── value_at(position) ──────── max  (snapped)
//! ```

use crate::range::{RangeError, convert_range};
use crate::schema::RangeSpec;

/// Direction of a keyboard nudge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// One step down (left arrow).
    Decrease,
    /// One step up (right arrow).
    Increase,
}

impl Direction {
    #[inline]
    fn sign(self) -> f64 {
        match self {
            Self::Decrease => -1.0,
            Self::Increase => 1.0,
        }
    }
}

impl RangeSpec {
    /// Fill percentage of the slider bar for `value`, clamped to `[0, 100]`.
    ///
    /// A zero-width range reports `0`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use optsmith_core::RangeSpec;
    ///
    /// let spec = RangeSpec::new(5.0, 95.0).with_step(5.0);
    /// assert_eq!(spec.percent_of(50.0), 50.0);
    /// assert_eq!(spec.percent_of(0.0), 0.0);
    /// assert_eq!(spec.percent_of(500.0), 100.0);
    /// ```
    pub fn percent_of(&self, value: f64) -> f64 {
        match convert_range(value, self.min(), self.max(), 0.0, 100.0) {
            Ok(pct) if pct.is_nan() => 0.0,
            Ok(pct) => pct.clamp(0.0, 100.0),
            Err(_) => 0.0,
        }
    }

    /// Moves `value` one step in `direction` and snaps the result.
    ///
    /// # Example
    ///
    /// ```rust
    /// use optsmith_core::{Direction, RangeSpec};
    ///
    /// let spec = RangeSpec::new(0.0, 100.0).with_step(10.0);
    /// assert_eq!(spec.nudge(50.0, Direction::Increase), 60.0);
    /// assert_eq!(spec.nudge(100.0, Direction::Increase), 100.0);
    /// assert_eq!(spec.nudge(0.0, Direction::Decrease), 0.0);
    /// ```
    pub fn nudge(&self, value: f64, direction: Direction) -> f64 {
        self.snap(value + self.step() * direction.sign())
    }

    /// Handle label for `value`: snapped, fixed to `precision` decimals, with
    /// a `%` suffix for percentage ranges.
    ///
    /// # Example
    ///
    /// ```rust
    /// use optsmith_core::RangeSpec;
    ///
    /// assert_eq!(RangeSpec::new(0.0, 100.0).display(42.4), "42%");
    /// assert_eq!(
    ///     RangeSpec::new(0.0, 1.0).with_step(0.5).with_percent(false).display(0.4),
    ///     "0.5"
    /// );
    /// ```
    pub fn display(&self, value: f64) -> String {
        let snapped = self.snap(value);
        let suffix = if self.percent() { "%" } else { "" };
        format!("{:.*}{}", self.precision() as usize, snapped, suffix)
    }
}

/// Pixel extents of a slider's handle track.
///
/// `start` and `end` may be given in either order; positions are clamped to
/// the track before mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderTrack {
    /// Position of the 0% end.
    pub start: f64,
    /// Position of the 100% end.
    pub end: f64,
}

impl SliderTrack {
    /// Creates a track spanning `start..end`.
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    fn clamp_position(&self, position: f64) -> f64 {
        let (lo, hi) = if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        };
        if position.is_nan() || lo.is_nan() || hi.is_nan() {
            return self.start;
        }
        position.clamp(lo, hi)
    }

    /// Option value for a handle dragged to `position`, snapped to the range.
    ///
    /// # Errors
    ///
    /// [`RangeError::ZeroWidth`] when the track has no length.
    ///
    /// # Example
    ///
    /// ```rust
    /// use optsmith_core::{RangeSpec, SliderTrack};
    ///
    /// let track = SliderTrack::new(100.0, 300.0);
    /// let spec = RangeSpec::new(0.0, 100.0).with_step(10.0);
    /// assert_eq!(track.value_at(207.0, &spec), Ok(50.0));
    /// assert_eq!(track.value_at(900.0, &spec), Ok(100.0));
    /// ```
    pub fn value_at(&self, position: f64, spec: &RangeSpec) -> Result<f64, RangeError> {
        let raw = convert_range(
            self.clamp_position(position),
            self.start,
            self.end,
            spec.min(),
            spec.max(),
        )?;
        Ok(spec.snap(raw))
    }

    /// Fill percentage for a handle at `position`.
    ///
    /// Unlike [`value_at`](Self::value_at) this is not snapped, so the bar
    /// follows the pointer smoothly.
    pub fn percent_at(&self, position: f64) -> Result<f64, RangeError> {
        convert_range(self.clamp_position(position), self.start, self.end, 0.0, 100.0)
    }

    /// Handle position for a stored option value.
    pub fn position_of(&self, value: f64, spec: &RangeSpec) -> f64 {
        self.start + spec.percent_of(value) / 100.0 * (self.end - self.start)
    }
}
