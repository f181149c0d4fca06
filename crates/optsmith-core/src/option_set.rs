//! Current option values paired with their definitions.

use crate::schema::{OptionSchema, Schema};
use crate::value::OptionValue;

/// One option's current state.
///
/// Entries built from a [`Schema`] carry their definition. Entries written for
/// keys outside the schema are "bare": they hold only a value.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionEntry {
    /// Option key.
    pub key: String,
    /// Definition, or `None` for a bare out-of-schema entry.
    pub schema: Option<OptionSchema>,
    /// Current value.
    pub value: OptionValue,
}

impl OptionEntry {
    /// Returns `true` if this entry has no schema definition.
    pub fn is_bare(&self) -> bool {
        self.schema.is_none()
    }
}

/// Ordered set of option entries.
///
/// # Example
///
/// ```rust
/// use optsmith_core::{OptionSchema, OptionSet, OptionValue, Schema};
///
/// let schema = Schema::new().with_option("number", OptionSchema::number("A number", 50.0));
/// let mut set = OptionSet::from_schema(&schema);
/// assert_eq!(set.value("number"), Some(&OptionValue::from(50.0)));
///
/// set.insert("extra", OptionValue::from("legacy"));
/// assert!(set.get("extra").unwrap().is_bare());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionSet {
    entries: Vec<OptionEntry>,
}

impl OptionSet {
    /// Builds the set of default values for a schema, in schema order.
    pub fn from_schema(schema: &Schema) -> Self {
        Self {
            entries: schema
                .iter()
                .map(|(key, option)| OptionEntry {
                    key: key.to_string(),
                    schema: Some(option.clone()),
                    value: option.default.clone(),
                })
                .collect(),
        }
    }

    /// Looks up an entry.
    pub fn get(&self, key: &str) -> Option<&OptionEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Looks up an entry's current value.
    pub fn value(&self, key: &str) -> Option<&OptionValue> {
        self.get(key).map(|e| &e.value)
    }

    /// Overwrites the value for `key`, appending a bare entry if the key is
    /// unknown. Returns the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: OptionValue) -> Option<OptionValue> {
        let key = key.into();
        if let Some(entry) = self.entries.iter_mut().find(|e| e.key == key) {
            return Some(core::mem::replace(&mut entry.value, value));
        }
        self.entries.push(OptionEntry {
            key,
            schema: None,
            value,
        });
        None
    }

    /// Returns `true` if the key has an entry.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterates over entries in order.
    pub fn iter(&self) -> impl Iterator<Item = &OptionEntry> {
        self.entries.iter()
    }

    /// Iterates over `(key, value)` pairs in order.
    pub fn values(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries.iter().map(|e| (e.key.as_str(), &e.value))
    }

    /// Number of entries, including bare ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a OptionSet {
    type Item = &'a OptionEntry;
    type IntoIter = core::slice::Iter<'a, OptionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
