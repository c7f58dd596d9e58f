//! Entity traits and the map-backed record used for every dashboard collection

use crate::core::field::FieldValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Read access to the fields of an entity.
///
/// This is the only thing the view engine needs from an entity: a way to
/// look up a field value by name. Typed domain structs can implement it
/// directly; the dashboard collections use [`Record`].
///
/// A `None` return means the field is absent on this entity. The engine
/// treats absent fields as the empty/zero value of the field's kind.
pub trait Entity {
    /// Get the value of a specific field by name
    fn field_value(&self, field: &str) -> Option<FieldValue>;
}

impl<E: Entity + ?Sized> Entity for &E {
    fn field_value(&self, field: &str) -> Option<FieldValue> {
        (**self).field_value(field)
    }
}

/// A heterogeneous entity: an ordered mapping from field name to value.
///
/// Announcements, capital projects, accounts, documents, notifications and
/// messages all arrive from the data store as records. Field order is the
/// insertion order, which keeps serialized output stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, FieldValue>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    /// Set a field, returning the previous value if any
    pub fn set(
        &mut self,
        field: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.fields.insert(field.into(), value.into())
    }

    /// Borrow a field value
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Remove a field, preserving the order of the remaining ones
    pub fn remove(&mut self, field: &str) -> Option<FieldValue> {
        self.fields.shift_remove(field)
    }

    /// The record identifier (`id` field), if it is a non-empty string or number
    pub fn id(&self) -> Option<String> {
        match self.fields.get("id")? {
            FieldValue::String(s) if !s.is_empty() => Some(s.clone()),
            FieldValue::Integer(i) => Some(i.to_string()),
            _ => None,
        }
    }

    /// Iterate over `(field, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields set on this record
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Entity for Record {
    fn field_value(&self, field: &str) -> Option<FieldValue> {
        self.fields.get(field).cloned()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
