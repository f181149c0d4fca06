//! Option schemas declared as JSON.
//!
//! Hosts that keep their option declarations in data rather than code can
//! describe them as one JSON object keyed by option name:
//!
//! ```json
//! {
//!   "volume": { "type": "range", "value": 50, "label": "Volume", "step": 10 },
//!   "mode":   { "type": "select", "value": "One", "options": ["One", "Two"] },
//!   "title":  { "label": "Title", "value": "Untitled", "help": "Shown in the header" }
//! }
//! ```
//!
//! `type` defaults to `text`. `value` is the default value and falls back to
//! the type's empty value (`""`, `0`, `false`, the range minimum, or the first
//! choice). Range fields (`min`, `max`, `step`, `percent`, `precision`) are
//! ignored on other types. Unknown fields are ignored.

use crate::error::ConfigError;
use optsmith_core::{OptionKind, OptionSchema, OptionType, OptionValue, RangeSpec, Schema};
use serde::Deserialize;
use serde_json::{Map, Value};

/// One option as written in a JSON definition.
#[derive(Debug, Deserialize)]
struct OptionDefinition {
    #[serde(rename = "type", default)]
    option_type: OptionType,
    #[serde(default)]
    value: Option<OptionValue>,
    #[serde(default)]
    label: String,
    #[serde(default)]
    help: Option<String>,
    #[serde(default)]
    min: Option<f64>,
    #[serde(default)]
    max: Option<f64>,
    #[serde(default)]
    step: Option<f64>,
    #[serde(default)]
    percent: Option<bool>,
    #[serde(default)]
    precision: Option<u32>,
    #[serde(default)]
    options: Vec<String>,
}

impl OptionDefinition {
    fn into_schema(self, key: &str) -> Result<OptionSchema, ConfigError> {
        let kind = match self.option_type {
            OptionType::Text => OptionKind::Text,
            OptionType::Number => OptionKind::Number,
            OptionType::Toggle => OptionKind::Toggle,
            OptionType::Range => {
                let defaults = RangeSpec::default();
                let mut spec = RangeSpec::new(
                    self.min.unwrap_or(defaults.min()),
                    self.max.unwrap_or(defaults.max()),
                )
                .with_step(self.step.unwrap_or(defaults.step()))
                .with_percent(self.percent.unwrap_or(defaults.percent()));
                if let Some(precision) = self.precision {
                    spec = spec.with_precision(precision);
                }
                OptionKind::Range(spec)
            }
            OptionType::Select => {
                if self.options.is_empty() {
                    return Err(ConfigError::invalid_schema(
                        key,
                        "select option needs at least one choice",
                    ));
                }
                OptionKind::Select(self.options)
            }
        };

        let default = self.value.unwrap_or_else(|| empty_value(&kind));

        let option = OptionSchema {
            kind,
            default,
            label: self.label,
            help: self.help,
        };
        if !option.accepts(&option.default) {
            return Err(ConfigError::invalid_schema(
                key,
                format!(
                    "default {} ({}) is not a valid {} value",
                    option.default,
                    option.default.type_name(),
                    option.option_type()
                ),
            ));
        }
        Ok(option.normalized())
    }
}

/// Default used when a definition gives no `value`.
fn empty_value(kind: &OptionKind) -> OptionValue {
    match kind {
        OptionKind::Text => OptionValue::Text(String::new()),
        OptionKind::Number => OptionValue::Number(0.0),
        OptionKind::Range(spec) => OptionValue::Number(spec.min()),
        OptionKind::Toggle => OptionValue::Toggle(false),
        OptionKind::Select(options) => {
            OptionValue::Text(options.first().cloned().unwrap_or_default())
        }
    }
}

/// Parses a JSON option definition into a [`Schema`].
///
/// Options appear in the order the JSON object's keys are iterated, which
/// is sorted by key.
///
/// # Errors
///
/// - [`ConfigError::Json`] if the input is not a JSON object
/// - [`ConfigError::InvalidSchema`] if an entry has an unknown type, a
///   malformed field, or a default that does not fit its type
///
/// # Example
///
/// ```rust
/// use optsmith_config::schema_from_json;
/// use optsmith_core::{OptionType, OptionValue};
///
/// let schema = schema_from_json(r#"{
///     "volume": { "type": "range", "value": 54, "label": "Volume", "step": 10 },
///     "title": { "label": "Title" }
/// }"#)?;
///
/// let volume = schema.get("volume").unwrap();
/// assert_eq!(volume.option_type(), OptionType::Range);
/// assert_eq!(volume.default, OptionValue::Number(50.0));
/// assert_eq!(schema.get("title").unwrap().default, OptionValue::from(""));
/// # Ok::<(), optsmith_config::ConfigError>(())
/// ```
pub fn schema_from_json(json: &str) -> Result<Schema, ConfigError> {
    let definitions: Map<String, Value> = serde_json::from_str(json)?;

    let mut schema = Schema::new();
    for (key, raw) in definitions {
        let definition: OptionDefinition = serde_json::from_value(raw)
            .map_err(|e| ConfigError::invalid_schema(&key, e.to_string()))?;
        let option = definition.into_schema(&key)?;
        schema.insert(key, option);
    }
    Ok(schema)
}
