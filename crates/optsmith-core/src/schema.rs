//! Option schema: the immutable definition of every configurable option.
//!
//! Each option is described by an [`OptionSchema`] carrying its type, default
//! value, and display strings. Range options additionally carry a
//! [`RangeSpec`], select options their list of allowed choices.
//!
//! A [`Schema`] is the ordered, key-unique collection of option definitions a
//! host supplies once when building its option store.
//!
//! # Example
//!
//! ```rust
//! use optsmith_core::{OptionSchema, OptionType, Schema};
//!
//! let schema = Schema::new()
//!     .with_option("text", OptionSchema::text("Some text", "Text"))
//!     .with_option(
//!         "range_10",
//!         OptionSchema::range("A range", 50.0).with_step(10.0),
//!     )
//!     .with_option(
//!         "select",
//!         OptionSchema::select("A dropdown", "One", ["One", "Two", "Three"]),
//!     );
//!
//! assert_eq!(schema.len(), 3);
//! assert_eq!(schema.get("range_10").unwrap().option_type(), OptionType::Range);
//! ```

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::range::{effective_step, grid_precision, snap_to_precision};
use crate::value::OptionValue;

/// The five supported option types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Single-line free text.
    #[default]
    Text,
    /// Unbounded number.
    Number,
    /// Bounded, stepped number shown as a slider.
    Range,
    /// Boolean checkbox.
    Toggle,
    /// One of a fixed list of strings.
    Select,
}

impl OptionType {
    /// Lowercase name used in schema definitions.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Range => "range",
            Self::Toggle => "toggle",
            Self::Select => "select",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bounds, step, and display settings of a range option.
///
/// A `RangeSpec` is always normalized: the step is positive, `min <= max`,
/// and the snapping precision has been derived (or set explicitly). Every
/// builder method re-normalizes.
///
/// | field       | default |
/// |-------------|---------|
/// | `min`       | `0`     |
/// | `max`       | `100`   |
/// | `step`      | `1` (also used when given `0`) |
/// | `percent`   | `true`  |
/// | `precision` | decimal places of `step` and `min` |
///
/// # Example
///
/// ```rust
/// use optsmith_core::RangeSpec;
///
/// let spec = RangeSpec::new(0.0, 1.0).with_step(0.05);
/// assert_eq!(spec.precision(), 2);
/// assert_eq!(spec.snap(0.33), 0.35);
///
/// let zero_step = RangeSpec::new(0.0, 10.0).with_step(0.0);
/// assert_eq!(zero_step.step(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeSpec {
    min: f64,
    max: f64,
    step: f64,
    percent: bool,
    precision: u32,
    explicit_precision: Option<u32>,
}

impl Default for RangeSpec {
    fn default() -> Self {
        Self::new(0.0, 100.0)
    }
}

impl RangeSpec {
    /// Creates a range over `[min, max]` with step `1` shown as a percentage.
    ///
    /// Non-finite bounds fall back to the defaults (`0` and `100`); reversed
    /// bounds are swapped.
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            step: 1.0,
            percent: true,
            precision: 0,
            explicit_precision: None,
        }
        .normalized()
    }

    /// Sets the step. Zero, negative, or non-finite steps become `1`.
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self.normalized()
    }

    /// Sets both bounds.
    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self.normalized()
    }

    /// Sets whether the value is displayed with a `%` suffix.
    pub fn with_percent(mut self, percent: bool) -> Self {
        self.percent = percent;
        self
    }

    /// Overrides the derived snapping precision.
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.explicit_precision = Some(precision);
        self.normalized()
    }

    fn normalized(mut self) -> Self {
        if !self.min.is_finite() {
            self.min = 0.0;
        }
        if !self.max.is_finite() {
            self.max = 100.0;
        }
        if self.min > self.max {
            core::mem::swap(&mut self.min, &mut self.max);
        }
        self.step = effective_step(self.step);
        self.precision = self
            .explicit_precision
            .unwrap_or_else(|| grid_precision(self.step, self.min));
        self
    }

    /// Lower bound.
    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Step increment, always positive.
    #[inline]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Whether the value is displayed as a percentage.
    #[inline]
    pub fn percent(&self) -> bool {
        self.percent
    }

    /// Decimal places snapped values are rounded to.
    #[inline]
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Clamps a value to `[min, max]`. NaN clamps to `min`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use optsmith_core::RangeSpec;
    ///
    /// let spec = RangeSpec::new(5.0, 95.0);
    /// assert_eq!(spec.clamp(0.0), 5.0);
    /// assert_eq!(spec.clamp(50.0), 50.0);
    /// assert_eq!(spec.clamp(200.0), 95.0);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        }
    }

    /// Snaps a value to this range's step grid, inside its bounds.
    #[inline]
    pub fn snap(&self, value: f64) -> f64 {
        snap_to_precision(value, self.step, self.min, self.max, self.precision)
    }
}

/// Type-specific part of an option definition.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionKind {
    /// Free text.
    Text,
    /// Unbounded number.
    Number,
    /// Bounded, stepped number.
    Range(RangeSpec),
    /// Boolean.
    Toggle,
    /// One of the listed choices, in display order.
    Select(Vec<String>),
}

impl OptionKind {
    /// The [`OptionType`] tag of this kind.
    pub const fn option_type(&self) -> OptionType {
        match self {
            Self::Text => OptionType::Text,
            Self::Number => OptionType::Number,
            Self::Range(_) => OptionType::Range,
            Self::Toggle => OptionType::Toggle,
            Self::Select(_) => OptionType::Select,
        }
    }
}

/// Definition of a single option.
///
/// Build one with the per-type constructors and refine it with the
/// `with_*` builder methods. Range builders have no effect on other types.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSchema {
    /// Type and type-specific constraints.
    pub kind: OptionKind,
    /// Value the option starts with and returns to on reset.
    pub default: OptionValue,
    /// Display label.
    pub label: String,
    /// Optional help text shown under the label.
    pub help: Option<String>,
}

impl OptionSchema {
    fn from_kind(kind: OptionKind, label: impl Into<String>, default: OptionValue) -> Self {
        Self {
            kind,
            default,
            label: label.into(),
            help: None,
        }
    }

    /// Text option.
    pub fn text(label: impl Into<String>, default: impl Into<String>) -> Self {
        Self::from_kind(OptionKind::Text, label, OptionValue::Text(default.into()))
    }

    /// Number option.
    pub fn number(label: impl Into<String>, default: f64) -> Self {
        Self::from_kind(OptionKind::Number, label, OptionValue::Number(default))
    }

    /// Range option over the default `[0, 100]` with step `1`.
    pub fn range(label: impl Into<String>, default: f64) -> Self {
        Self::from_kind(
            OptionKind::Range(RangeSpec::default()),
            label,
            OptionValue::Number(default),
        )
    }

    /// Toggle option.
    pub fn toggle(label: impl Into<String>, default: bool) -> Self {
        Self::from_kind(OptionKind::Toggle, label, OptionValue::Toggle(default))
    }

    /// Select option with the given choices.
    pub fn select<I, S>(label: impl Into<String>, default: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_kind(
            OptionKind::Select(options.into_iter().map(Into::into).collect()),
            label,
            OptionValue::Text(default.into()),
        )
    }

    /// Sets the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn map_range(mut self, f: impl FnOnce(RangeSpec) -> RangeSpec) -> Self {
        if let OptionKind::Range(spec) = self.kind {
            self.kind = OptionKind::Range(f(spec));
        }
        self
    }

    /// Sets range bounds.
    pub fn with_bounds(self, min: f64, max: f64) -> Self {
        self.map_range(|s| s.with_bounds(min, max))
    }

    /// Sets the range step.
    pub fn with_step(self, step: f64) -> Self {
        self.map_range(|s| s.with_step(step))
    }

    /// Sets whether the range is shown as a percentage.
    pub fn with_percent(self, percent: bool) -> Self {
        self.map_range(|s| s.with_percent(percent))
    }

    /// Overrides the range's snapping precision.
    pub fn with_precision(self, precision: u32) -> Self {
        self.map_range(|s| s.with_precision(precision))
    }

    /// The option's type tag.
    pub const fn option_type(&self) -> OptionType {
        self.kind.option_type()
    }

    /// The range settings, if this is a range option.
    pub fn range_spec(&self) -> Option<&RangeSpec> {
        match &self.kind {
            OptionKind::Range(spec) => Some(spec),
            _ => None,
        }
    }

    /// The allowed choices, if this is a select option.
    pub fn choices(&self) -> Option<&[String]> {
        match &self.kind {
            OptionKind::Select(options) => Some(options),
            _ => None,
        }
    }

    /// Returns `true` if `value` is a valid value for this option.
    ///
    /// The primitive kind must match the type; numbers must be finite and
    /// select values must be one of the choices.
    ///
    /// # Example
    ///
    /// ```rust
    /// use optsmith_core::{OptionSchema, OptionValue};
    ///
    /// let select = OptionSchema::select("Pick", "One", ["One", "Two"]);
    /// assert!(select.accepts(&OptionValue::from("Two")));
    /// assert!(!select.accepts(&OptionValue::from("Four")));
    /// assert!(!select.accepts(&OptionValue::from(2.0)));
    /// ```
    pub fn accepts(&self, value: &OptionValue) -> bool {
        match (&self.kind, value) {
            (OptionKind::Text, OptionValue::Text(_)) => true,
            (OptionKind::Number | OptionKind::Range(_), OptionValue::Number(n)) => n.is_finite(),
            (OptionKind::Toggle, OptionValue::Toggle(_)) => true,
            (OptionKind::Select(options), OptionValue::Text(s)) => options.iter().any(|o| o == s),
            _ => false,
        }
    }

    /// Brings a value in line with the schema's constraints.
    ///
    /// Range numbers are snapped to the step grid and clamped; everything
    /// else is returned unchanged.
    pub fn normalize_value(&self, value: OptionValue) -> OptionValue {
        match (&self.kind, value) {
            (OptionKind::Range(spec), OptionValue::Number(n)) => OptionValue::Number(spec.snap(n)),
            (_, value) => value,
        }
    }

    /// Returns a copy whose default satisfies the range invariant.
    pub fn normalized(self) -> Self {
        let default = self.normalize_value(self.default.clone());
        Self { default, ..self }
    }
}

/// Ordered, key-unique collection of option definitions.
///
/// Iteration follows insertion order, which is the order a settings panel
/// presents the options in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    entries: Vec<(String, OptionSchema)>,
}

impl Schema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an option, builder style. An existing key is replaced in place.
    pub fn with_option(mut self, key: impl Into<String>, option: OptionSchema) -> Self {
        self.insert(key, option);
        self
    }

    /// Adds an option, returning the definition it replaced.
    pub fn insert(&mut self, key: impl Into<String>, option: OptionSchema) -> Option<OptionSchema> {
        let key = key.into();
        if let Some((_, existing)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            return Some(core::mem::replace(existing, option));
        }
        self.entries.push((key, option));
        None
    }

    /// Looks up an option definition.
    pub fn get(&self, key: &str) -> Option<&OptionSchema> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, o)| o)
    }

    /// Returns `true` if the key is defined.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterates over `(key, definition)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionSchema)> {
        self.entries.iter().map(|(k, o)| (k.as_str(), o))
    }

    /// Iterates over keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of options.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no options are defined.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Normalizes every definition (see [`OptionSchema::normalized`]).
    pub fn normalized(self) -> Self {
        Self {
            entries: self
                .entries
                .into_iter()
                .map(|(k, o)| (k, o.normalized()))
                .collect(),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, OptionSchema)> for Schema {
    fn from_iter<T: IntoIterator<Item = (K, OptionSchema)>>(iter: T) -> Self {
        let mut schema = Schema::new();
        for (key, option) in iter {
            schema.insert(key, option);
        }
        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_defaults() {
        let spec = RangeSpec::default();
        assert_eq!(spec.min(), 0.0);
        assert_eq!(spec.max(), 100.0);
        assert_eq!(spec.step(), 1.0);
        assert!(spec.percent());
        assert_eq!(spec.precision(), 0);
    }

    #[test]
    fn test_range_zero_step_becomes_one() {
        let spec = RangeSpec::new(0.0, 10.0).with_step(0.0);
        assert_eq!(spec.step(), 1.0);
        let spec = RangeSpec::new(0.0, 10.0).with_step(-3.0);
        assert_eq!(spec.step(), 1.0);
    }

    #[test]
    fn test_range_swaps_reversed_bounds() {
        let spec = RangeSpec::new(100.0, 0.0);
        assert_eq!(spec.min(), 0.0);
        assert_eq!(spec.max(), 100.0);
    }

    #[test]
    fn test_range_non_finite_bounds_default() {
        let spec = RangeSpec::new(f64::NAN, f64::INFINITY);
        assert_eq!(spec.min(), 0.0);
        assert_eq!(spec.max(), 100.0);
    }

    #[test]
    fn test_range_precision_derived_once() {
        let spec = RangeSpec::new(0.0, 10.0).with_step(0.5);
        assert_eq!(spec.precision(), 1);

        let spec = RangeSpec::new(0.25, 10.0);
        assert_eq!(spec.precision(), 2);

        // Changing the step re-derives the precision
        let spec = spec.with_step(0.001);
        assert_eq!(spec.precision(), 3);
    }

    #[test]
    fn test_range_explicit_precision_survives_rebuild() {
        let spec = RangeSpec::new(0.0, 1.0).with_precision(4).with_step(0.1);
        assert_eq!(spec.precision(), 4);
    }

    #[test]
    fn test_range_clamp_and_snap() {
        let spec = RangeSpec::new(5.0, 95.0).with_step(5.0);
        assert_eq!(spec.clamp(f64::NAN), 5.0);
        assert_eq!(spec.snap(51.0), 50.0);
        assert_eq!(spec.snap(53.0), 55.0);
        assert_eq!(spec.snap(1000.0), 95.0);
    }

    #[test]
    fn test_option_type_serde_names() {
        assert_eq!(OptionType::Range.name(), "range");
        assert_eq!(OptionType::Select.to_string(), "select");
        assert_eq!(OptionType::default(), OptionType::Text);
    }

    #[test]
    fn test_schema_constructors() {
        let text = OptionSchema::text("Label", "Text").with_help("help");
        assert_eq!(text.option_type(), OptionType::Text);
        assert_eq!(text.default, OptionValue::from("Text"));
        assert_eq!(text.help.as_deref(), Some("help"));

        let toggle = OptionSchema::toggle("Toggle", true);
        assert_eq!(toggle.default, OptionValue::from(true));

        let select = OptionSchema::select("Select", "One", ["One", "Two", "Three"]);
        assert_eq!(select.choices().unwrap().len(), 3);
        assert!(select.range_spec().is_none());
    }

    #[test]
    fn test_range_builders_ignored_on_other_types() {
        let number = OptionSchema::number("Number", 50.0).with_bounds(0.0, 10.0).with_step(5.0);
        assert_eq!(number.kind, OptionKind::Number);
    }

    #[test]
    fn test_range_builders() {
        let range = OptionSchema::range("Range", 50.0)
            .with_bounds(5.0, 95.0)
            .with_step(5.0)
            .with_percent(false);
        let spec = range.range_spec().unwrap();
        assert_eq!(spec.min(), 5.0);
        assert_eq!(spec.max(), 95.0);
        assert_eq!(spec.step(), 5.0);
        assert!(!spec.percent());
    }

    #[test]
    fn test_accepts() {
        let range = OptionSchema::range("Range", 50.0);
        assert!(range.accepts(&OptionValue::from(10.0)));
        assert!(!range.accepts(&OptionValue::Number(f64::NAN)));
        assert!(!range.accepts(&OptionValue::from("10")));

        let toggle = OptionSchema::toggle("Toggle", false);
        assert!(toggle.accepts(&OptionValue::from(true)));
        assert!(!toggle.accepts(&OptionValue::from(1.0)));

        let text = OptionSchema::text("Text", "");
        assert!(text.accepts(&OptionValue::from("anything")));
        assert!(!text.accepts(&OptionValue::from(false)));
    }

    #[test]
    fn test_normalize_value_snaps_ranges_only() {
        let range = OptionSchema::range("Range", 50.0).with_step(10.0);
        assert_eq!(range.normalize_value(OptionValue::from(54.0)), OptionValue::from(50.0));

        let number = OptionSchema::number("Number", 50.0);
        assert_eq!(number.normalize_value(OptionValue::from(54.3)), OptionValue::from(54.3));
    }

    #[test]
    fn test_normalized_snaps_default() {
        let range = OptionSchema::range("Range", 57.0).with_step(10.0).normalized();
        assert_eq!(range.default, OptionValue::from(60.0));
    }

    #[test]
    fn test_schema_order_and_replace() {
        let mut schema = Schema::new()
            .with_option("b", OptionSchema::number("B", 1.0))
            .with_option("a", OptionSchema::number("A", 2.0));
        assert_eq!(schema.keys().collect::<Vec<_>>(), vec!["b", "a"]);

        let old = schema.insert("b", OptionSchema::text("B", "x"));
        assert_eq!(old.map(|o| o.option_type()), Some(OptionType::Number));
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(schema.get("b").unwrap().option_type(), OptionType::Text);
    }

    #[test]
    fn test_schema_from_iter() {
        let schema: Schema = [
            ("x", OptionSchema::toggle("X", true)),
            ("y", OptionSchema::toggle("Y", false)),
        ]
        .into_iter()
        .collect();
        assert!(schema.contains_key("x"));
        assert!(!schema.contains_key("z"));
        assert!(!schema.is_empty());
    }
}
