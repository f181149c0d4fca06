//! Optsmith Core - typed option schema and range mapping
//!
//! This crate holds the logic that a plugin settings panel needs without any
//! UI toolkit: the definitions of typed options, their current values, and the
//! numeric helpers that keep range options on their step grid.
//!
//! # Core Abstractions
//!
//! ## Option Model
//!
//! - [`OptionSchema`] - Definition of one option (type, default, label, help)
//! - [`RangeSpec`] - Bounds, step, precision, and display mode of a range option
//! - [`Schema`] - Ordered, key-unique set of option definitions
//! - [`OptionValue`] - Current primitive value of an option
//! - [`OptionSet`] - Current values paired with their definitions
//!
//! ## Range Mapping
//!
//! - [`convert_range`] - Linear mapping between two ranges
//! - [`snap_to`] / [`snap_to_precision`] - Snap to the nearest step, inside bounds
//! - [`round`] - Round half away from zero at a decimal precision
//!
//! ## Slider Geometry
//!
//! - [`SliderTrack`] - Handle position to value and fill percentage
//! - [`RangeSpec::percent_of`], [`RangeSpec::nudge`], [`RangeSpec::display`]
//!
//! # Example
//!
//! ```rust
//! use optsmith_core::{OptionSchema, OptionSet, Schema, snap_to};
//!
//! let schema = Schema::new()
//!     .with_option("range", OptionSchema::range("A range", 50.0).with_step(10.0));
//!
//! let values = OptionSet::from_schema(&schema);
//! assert_eq!(values.value("range").and_then(|v| v.as_f64()), Some(50.0));
//!
//! assert_eq!(snap_to(56.0, 10.0, 0.0, 100.0), 60.0);
//! ```
//!
//! # Features
//!
//! - `tracing`: log degenerate snapping inputs at debug level

pub mod option_set;
pub mod range;
pub mod schema;
pub mod slider;
pub mod value;

pub use option_set::{OptionEntry, OptionSet};
pub use range::{
    MAX_PRECISION, RangeError, convert_range, decimal_places, effective_step, grid_precision,
    round, snap_to, snap_to_precision,
};
pub use schema::{OptionKind, OptionSchema, OptionType, RangeSpec, Schema};
pub use slider::{Direction, SliderTrack};
pub use value::OptionValue;
