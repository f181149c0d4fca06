//! Option values.
//!
//! An [`OptionValue`] is the raw primitive stored for one option. It serializes
//! as the bare JSON primitive (`"Text"`, `50`, `true`), which is the format the
//! storage layer persists.

use core::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Largest magnitude at which every integer is exactly representable in `f64`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Current value of a single option.
///
/// Text and select options hold [`Text`](Self::Text), number and range options
/// hold [`Number`](Self::Number), toggles hold [`Toggle`](Self::Toggle).
///
/// # Example
///
/// ```rust
/// use optsmith_core::OptionValue;
///
/// let v = OptionValue::from(50.0);
/// assert_eq!(v.as_f64(), Some(50.0));
/// assert!(!v.is_falsy());
/// assert!(OptionValue::from("").is_falsy());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    /// Free text, or the chosen entry of a select option.
    Text(String),
    /// Numeric value of a number or range option.
    Number(f64),
    /// On/off state of a toggle option.
    Toggle(bool),
}

impl OptionValue {
    /// Returns `true` for the values that count as "unset" when merging stored data.
    ///
    /// Empty text, zero (either sign), NaN, and `false` are falsy.
    pub fn is_falsy(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Number(n) => *n == 0.0 || n.is_nan(),
            Self::Toggle(b) => !*b,
        }
    }

    /// Name of the value's primitive kind: `"text"`, `"number"`, or `"toggle"`.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Number(_) => "number",
            Self::Toggle(_) => "toggle",
        }
    }

    /// Returns the text if this is a [`Text`](Self::Text) value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number if this is a [`Number`](Self::Number) value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the state if this is a [`Toggle`](Self::Toggle) value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Toggle(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Toggle(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<f64> for OptionValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i32> for OptionValue {
    fn from(v: i32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<bool> for OptionValue {
    fn from(v: bool) -> Self {
        Self::Toggle(v)
    }
}

impl Serialize for OptionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            // Whole numbers go out as integers so stored blobs read `50`, not `50.0`.
            Self::Number(n) if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER => {
                serializer.serialize_i64(*n as i64)
            }
            Self::Number(n) => serializer.serialize_f64(*n),
            Self::Toggle(b) => serializer.serialize_bool(*b),
        }
    }
}

struct OptionValueVisitor;

impl Visitor<'_> for OptionValueVisitor {
    type Value = OptionValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number, or boolean")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<OptionValue, E> {
        Ok(OptionValue::Toggle(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<OptionValue, E> {
        Ok(OptionValue::Number(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<OptionValue, E> {
        Ok(OptionValue::Number(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<OptionValue, E> {
        Ok(OptionValue::Number(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<OptionValue, E> {
        Ok(OptionValue::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<OptionValue, E> {
        Ok(OptionValue::Text(v))
    }
}

impl<'de> Deserialize<'de> for OptionValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(OptionValueVisitor)
    }
}
