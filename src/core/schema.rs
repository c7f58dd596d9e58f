//! Entity schemas used to validate view specifications

use crate::core::error::ConfigError;
use crate::core::field::FieldKind;
use indexmap::IndexMap;

/// The declared fields of one entity type and their kinds.
///
/// A view is checked against its schema once, when it is built. After that
/// the pipeline never needs to ask whether a field exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySchema {
    name: String,
    fields: IndexMap<String, FieldKind>,
}

impl EntitySchema {
    /// Create an empty schema for an entity type (e.g. "announcements")
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
        }
    }

    /// Declare a field
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.insert(name.into(), kind);
        self
    }

    /// The entity type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind of a declared field
    pub fn kind_of(&self, field: &str) -> Option<FieldKind> {
        self.fields.get(field).copied()
    }

    /// Whether the schema declares this field
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Declared fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, FieldKind)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Resolve a field's kind or fail with a configuration error naming
    /// the part of the view (`context`) that referenced it.
    pub fn require(&self, field: &str, context: &str) -> Result<FieldKind, ConfigError> {
        self.kind_of(field).ok_or_else(|| ConfigError::UnknownField {
            entity_type: self.name.clone(),
            field: field.to_string(),
            context: context.to_string(),
        })
    }
}
