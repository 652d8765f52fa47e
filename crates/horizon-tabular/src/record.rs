//! Records: rows of tabular data.
//!
//! A [`Record`] is an opaque mapping from field name to [`Value`]. Records
//! carry no persistence identity; a `Vec<Record>` is the unit of input to
//! every table operation. Within one table instance all records are expected
//! to expose a consistent set of field names (the schema's keys), though
//! nothing breaks when a field is absent; it reads as null.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::Value;

static NULL: Value = Value::Null;

/// One row of tabular data.
///
/// Serializes transparently as a JSON object, so a fetched row array
/// deserializes straight into `Vec<Record>`.
///
/// # Example
///
/// ```
/// use horizon_tabular::{Record, Value};
///
/// let record = Record::new()
///     .with("theme", "Sécurité")
///     .with("duree", 14)
///     .with("actif", true);
///
/// assert_eq!(record.get("theme"), Some(&Value::from("Sécurité")));
/// assert_eq!(record.get_or_null("missing"), &Value::Null);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, consuming and returning the record.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Insert or replace a field, returning the previous value if any.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    /// Remove a field, returning its value if it was present.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    /// Get a field's value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Get a field's value, reading absent fields as [`Value::Null`].
    pub fn get_or_null(&self, field: &str) -> &Value {
        self.fields.get(field).unwrap_or(&NULL)
    }

    /// Returns `true` if the record has a value (possibly null) for `field`.
    pub fn contains_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Iterate over (field name, value) pairs in field-name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of fields in the record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<BTreeMap<String, Value>> for Record {
    fn from(fields: BTreeMap<String, Value>) -> Self {
        Self { fields }
    }
}
