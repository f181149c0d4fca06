//! The option store: current values of a schema, persisted through a [`Storage`].
//!
//! A store owns its storage collaborator and writes the whole value map as one
//! JSON object under its storage key after every change.
//!
//! # Loading rules
//!
//! Stored blobs are merged over the defaults, not trusted wholesale:
//!
//! - a missing, unparsable, or non-object blob leaves every default in place
//! - keys the schema does not know are ignored
//! - falsy values (`""`, `0`, `false`, `null`) never overwrite a default
//! - values of the wrong type, or select values outside the choices, are skipped
//! - range values are snapped onto the step grid
//!
//! The falsy rule makes a save/load round-trip lossy for falsy values: a toggle
//! saved as `false` comes back as its default.
//!
//! # Example
//!
//! ```rust
//! use optsmith_config::{MemoryStorage, OptionStore};
//! use optsmith_core::{OptionSchema, OptionValue, Schema};
//!
//! let schema = Schema::new()
//!     .with_option("volume", OptionSchema::range("Volume", 50.0).with_step(10.0))
//!     .with_option("enabled", OptionSchema::toggle("Enabled", true));
//!
//! let mut store = OptionStore::new(schema, MemoryStorage::new(), "demo-options");
//! store.set("volume", 56.0)?;
//! assert_eq!(store.get("volume"), Some(&OptionValue::Number(60.0)));
//! assert_eq!(store.storage().get("demo-options"), Some(r#"{"enabled":true,"volume":60}"#));
//! # Ok::<(), optsmith_config::ConfigError>(())
//! ```

use crate::error::ConfigError;
use crate::storage::Storage;
use optsmith_core::{OptionSchema, OptionSet, OptionType, OptionValue, Schema};
use serde_json::{Map, Value};
use std::fmt;

/// Listener fired after a value is stored and saved.
type ChangeListener = Box<dyn FnMut(&str, &OptionValue)>;

/// Listener fired after a reset is saved.
type ResetListener = Box<dyn FnMut()>;

/// Suffix of storage keys derived from a plugin name.
const STORAGE_KEY_SUFFIX: &str = "-options";

/// Reduces a plugin name to lowercase `[a-z0-9_-]`.
///
/// ```rust
/// use optsmith_config::plugin_short_name;
///
/// assert_eq!(plugin_short_name("OptionsPlugin Example Usage"), "optionspluginexampleusage");
/// ```
pub fn plugin_short_name(plugin_name: &str) -> String {
    plugin_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Storage key used when a host does not choose one.
///
/// ```rust
/// use optsmith_config::default_storage_key;
///
/// assert_eq!(default_storage_key("Delay (Stereo)"), "delaystereo-options");
/// ```
pub fn default_storage_key(plugin_name: &str) -> String {
    format!("{}{STORAGE_KEY_SUFFIX}", plugin_short_name(plugin_name))
}

/// Current option values backed by a storage collaborator.
///
/// All mutation goes through `&mut self`; wrap the store in a `Mutex` to share it.
pub struct OptionStore<S: Storage> {
    schema: Schema,
    values: OptionSet,
    storage: S,
    storage_key: String,
    on_change: Option<ChangeListener>,
    on_reset: Option<ResetListener>,
}

impl<S: Storage> OptionStore<S> {
    /// Creates a store holding the schema's defaults.
    ///
    /// Range defaults are snapped onto their grid. Nothing is read from
    /// storage until [`load`](Self::load) is called.
    ///
    /// Defaults their own option would reject (a select default outside
    /// its choices, a non-finite number) are kept but logged at `warn`.
    /// Use [`try_new`](Self::try_new) to refuse such a schema instead.
    pub fn new(schema: Schema, storage: S, storage_key: impl Into<String>) -> Self {
        let schema = schema.normalized();
        for (key, reason) in rejected_defaults(&schema) {
            tracing::warn!(key, %reason, "option default does not fit its option");
        }
        let values = OptionSet::from_schema(&schema);
        let storage_key = storage_key.into();
        tracing::debug!(key = %storage_key, options = schema.len(), "option store created");
        Self {
            schema,
            values,
            storage,
            storage_key,
            on_change: None,
            on_reset: None,
        }
    }

    /// Creates a store like [`new`](Self::new), refusing a schema whose
    /// defaults [`set`](Self::set) would reject.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidSchema`] naming the first offending option.
    pub fn try_new(
        schema: Schema,
        storage: S,
        storage_key: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let schema = schema.normalized();
        if let Some((key, reason)) = rejected_defaults(&schema).next() {
            return Err(ConfigError::invalid_schema(
                key,
                format!("invalid default: {reason}"),
            ));
        }
        Ok(Self::new(schema, storage, storage_key))
    }

    /// Creates a store keyed by [`default_storage_key`] of `plugin_name`.
    pub fn for_plugin(schema: Schema, storage: S, plugin_name: &str) -> Self {
        Self::new(schema, storage, default_storage_key(plugin_name))
    }

    /// Registers the listener fired after every successful [`set`](Self::set).
    pub fn on_change(mut self, listener: impl FnMut(&str, &OptionValue) + 'static) -> Self {
        self.on_change = Some(Box::new(listener));
        self
    }

    /// Registers the listener fired after every successful [`reset`](Self::reset).
    pub fn on_reset(mut self, listener: impl FnMut() + 'static) -> Self {
        self.on_reset = Some(Box::new(listener));
        self
    }

    /// Key the value map is stored under.
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// The storage collaborator.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Mutable access to the storage collaborator.
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Consumes the store, returning its storage collaborator.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// The option definitions, with their defaults.
    pub fn defaults(&self) -> &Schema {
        &self.schema
    }

    /// Current value of `key`.
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.values.value(key)
    }

    /// Every current entry, in schema order.
    pub fn get_all(&self) -> &OptionSet {
        &self.values
    }

    /// Stores a value and saves.
    ///
    /// Range values are snapped onto the step grid. Keys outside the schema
    /// are stored as bare entries and persisted with the rest.
    ///
    /// The in-memory value is updated before saving, so it stays set even
    /// when the save fails.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidValue`] if the value does not fit the option;
    ///   nothing is stored
    /// - [`ConfigError::Persistence`] if saving fails
    pub fn set(&mut self, key: &str, value: impl Into<OptionValue>) -> Result<(), ConfigError> {
        let value = value.into();
        let value = match self.schema.get(key) {
            Some(option) => {
                if let Some(reason) = rejection_reason(option, &value) {
                    return Err(ConfigError::invalid_value(key, reason));
                }
                option.normalize_value(value)
            }
            None => {
                tracing::debug!(key = %key, "storing value for key outside the schema");
                value
            }
        };

        self.values.insert(key, value);
        self.save()?;

        if let Some(listener) = self.on_change.as_mut()
            && let Some(value) = self.values.value(key)
        {
            listener(key, value);
        }
        Ok(())
    }

    /// Parses a raw control string for `key` and [`set`](Self::set)s it.
    ///
    /// Toggles accept `true`/`false`, `on`/`off`, `1`/`0`, and `checked`.
    /// Numbers and ranges are parsed as decimal floats. Text, select, and
    /// keys outside the schema take the string as is.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] if the string cannot be parsed, plus
    /// everything [`set`](Self::set) returns.
    pub fn apply_input(&mut self, key: &str, raw: &str) -> Result<(), ConfigError> {
        let value = match self.schema.get(key).map(OptionSchema::option_type) {
            Some(OptionType::Toggle) => parse_toggle(raw)
                .map(OptionValue::Toggle)
                .ok_or_else(|| ConfigError::invalid_value(key, format!("{raw:?} is not a toggle state")))?,
            Some(OptionType::Number | OptionType::Range) => parse_number(raw)
                .map(OptionValue::Number)
                .ok_or_else(|| ConfigError::invalid_value(key, format!("{raw:?} is not a number")))?,
            Some(OptionType::Text | OptionType::Select) | None => OptionValue::Text(raw.to_string()),
        };
        self.set(key, value)
    }

    /// Flat `key -> value` map of every entry, bare ones included.
    pub fn simple_options(&self) -> Map<String, Value> {
        self.values
            .values()
            .map(|(key, value)| (key.to_string(), json_value(value)))
            .collect()
    }

    /// Writes the value map to storage as a JSON object.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Persistence`] if the storage collaborator fails.
    pub fn save(&mut self) -> Result<(), ConfigError> {
        let blob = serde_json::to_string(&self.simple_options())?;
        self.storage.save(&self.storage_key, &blob).map_err(|source| {
            tracing::warn!(key = %self.storage_key, error = %source, "failed to save options");
            ConfigError::persistence(&self.storage_key, source)
        })
    }

    /// Resets to defaults, then merges the stored blob over them.
    ///
    /// See the [module docs](self) for the merge rules. A malformed blob is
    /// not an error.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Persistence`] if the storage collaborator fails to read.
    pub fn load(&mut self) -> Result<(), ConfigError> {
        self.values = OptionSet::from_schema(&self.schema);

        let blob = self
            .storage
            .load(&self.storage_key)
            .map_err(|source| ConfigError::persistence(&self.storage_key, source))?;
        let Some(blob) = blob else {
            tracing::debug!(key = %self.storage_key, "no stored options, using defaults");
            return Ok(());
        };

        let stored = match serde_json::from_str::<Value>(&blob) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                tracing::debug!(key = %self.storage_key, found = %other, "stored options are not an object, using defaults");
                return Ok(());
            }
            Err(e) => {
                tracing::debug!(key = %self.storage_key, error = %e, "stored options are not valid JSON, using defaults");
                return Ok(());
            }
        };

        for (key, raw) in stored {
            let Some(option) = self.schema.get(&key) else {
                tracing::debug!(key = %key, "ignoring stored key outside the schema");
                continue;
            };
            if is_falsy_json(&raw) {
                continue;
            }
            match serde_json::from_value::<OptionValue>(raw) {
                Ok(value) if option.accepts(&value) => {
                    self.values.insert(key, option.normalize_value(value));
                }
                Ok(value) => {
                    tracing::debug!(key = %key, %value, "skipping stored value that does not fit the option");
                }
                Err(e) => {
                    tracing::debug!(key = %key, error = %e, "skipping stored value of unsupported shape");
                }
            }
        }
        Ok(())
    }

    /// Restores every default and saves once.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Persistence`] if saving fails; the defaults are
    /// restored in memory regardless.
    pub fn reset(&mut self) -> Result<(), ConfigError> {
        self.values = OptionSet::from_schema(&self.schema);
        tracing::info!(key = %self.storage_key, "options reset to defaults");
        self.save()?;

        if let Some(listener) = self.on_reset.as_mut() {
            listener();
        }
        Ok(())
    }
}

impl<S: Storage + fmt::Debug> fmt::Debug for OptionStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionStore")
            .field("storage_key", &self.storage_key)
            .field("values", &self.values)
            .field("storage", &self.storage)
            .field("on_change", &self.on_change.is_some())
            .field("on_reset", &self.on_reset.is_some())
            .finish_non_exhaustive()
    }
}

/// Why `option` refuses `value`, or `None` if it accepts it.
fn rejection_reason(option: &OptionSchema, value: &OptionValue) -> Option<String> {
    if option.accepts(value) {
        return None;
    }
    let reason = match (option.option_type(), value) {
        (OptionType::Select, OptionValue::Text(s)) => format!(
            "{s:?} is not one of [{}]",
            option.choices().unwrap_or_default().join(", ")
        ),
        (OptionType::Number | OptionType::Range, OptionValue::Number(n)) => {
            format!("{n} is not a finite number")
        }
        (expected, value) => format!("expected a {expected} value, got {}", value.type_name()),
    };
    Some(reason)
}

/// Options whose default fails their own validation, with the reason.
fn rejected_defaults(schema: &Schema) -> impl Iterator<Item = (&str, String)> {
    schema.iter().filter_map(|(key, option)| {
        rejection_reason(option, &option.default).map(|reason| (key, reason))
    })
}

fn parse_toggle(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "1" | "checked" => Some(true),
        "false" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn json_value(value: &OptionValue) -> Value {
    // Non-finite numbers have no JSON form and become null
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// JSON counterpart of [`OptionValue::is_falsy`].
fn is_falsy_json(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
