//! Field filters and their evaluation
//!
//! A [`Filter`] pairs a field with an operation and an expected value.
//! Filters backing a dropdown usually carry a *sentinel* ("All Properties",
//! "All Statuses"): while the filter holds its sentinel it constrains
//! nothing. Sentinels are per filter, so "All Statuses" is an ordinary value
//! for a property filter.

use crate::core::entity::Entity;
use crate::core::error::ConfigError;
use crate::core::field::{FieldKind, FieldValue};
use crate::core::schema::EntitySchema;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Sentinel offered by property dropdowns
pub const ALL_PROPERTIES: &str = "All Properties";

/// Sentinel offered by status dropdowns
pub const ALL_STATUSES: &str = "All Statuses";

/// Sentinel offered by category/type dropdowns
pub const ALL_CATEGORIES: &str = "All Categories";

/// A custom test over a single field value
#[derive(Clone)]
pub struct FieldPredicate(Arc<dyn Fn(&FieldValue) -> bool + Send + Sync>);

impl FieldPredicate {
    pub fn new(f: impl Fn(&FieldValue) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn test(&self, value: &FieldValue) -> bool {
        (self.0)(value)
    }
}

impl fmt::Debug for FieldPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FieldPredicate(..)")
    }
}

/// Filter operation for comparing a field against the filter value
#[derive(Debug, Clone)]
pub enum FilterOp {
    /// Equal under the field's kind (exact, case-sensitive for text)
    Eq,
    /// Not equal
    Ne,
    /// The field's entries include the value (case-sensitive membership)
    Contains,
    Gt,
    Gte,
    Lt,
    Lte,
    /// Custom test; the filter value is only used for sentinel checks
    Predicate(FieldPredicate),
}

impl FilterOp {
    /// Parse an operation name as written in screen configuration
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "eq" | "=" | "==" => Some(FilterOp::Eq),
            "ne" | "!=" => Some(FilterOp::Ne),
            "contains" | "in" => Some(FilterOp::Contains),
            "gt" | ">" => Some(FilterOp::Gt),
            "gte" | ">=" => Some(FilterOp::Gte),
            "lt" | "<" => Some(FilterOp::Lt),
            "lte" | "<=" => Some(FilterOp::Lte),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FilterOp::Eq => "eq",
            FilterOp::Ne => "ne",
            FilterOp::Contains => "contains",
            FilterOp::Gt => "gt",
            FilterOp::Gte => "gte",
            FilterOp::Lt => "lt",
            FilterOp::Lte => "lte",
            FilterOp::Predicate(_) => "predicate",
        }
    }

    fn accepts(&self, kind: FieldKind) -> bool {
        match self {
            FilterOp::Contains => matches!(kind, FieldKind::List | FieldKind::Text),
            FilterOp::Gt | FilterOp::Gte | FilterOp::Lt | FilterOp::Lte => {
                !matches!(kind, FieldKind::List | FieldKind::Boolean)
            }
            _ => true,
        }
    }
}

/// A filter condition on one field.
#[derive(Debug, Clone)]
pub struct Filter {
    name: String,
    field: String,
    op: FilterOp,
    value: FieldValue,
    sentinel: Option<FieldValue>,
    kind: FieldKind,
}

impl Filter {
    /// Create a new filter condition. The filter is addressed by its field
    /// name unless renamed with [`Filter::named`].
    pub fn new(field: impl Into<String>, op: FilterOp, value: impl Into<FieldValue>) -> Self {
        let field = field.into();
        Self {
            name: field.clone(),
            field,
            op,
            value: value.into(),
            sentinel: None,
            kind: FieldKind::Text,
        }
    }

    pub fn eq(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self::new(field, FilterOp::Eq, value)
    }

    pub fn ne(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self::new(field, FilterOp::Ne, value)
    }

    pub fn contains(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self::new(field, FilterOp::Contains, value)
    }

    pub fn gt(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self::new(field, FilterOp::Gt, value)
    }

    pub fn gte(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self::new(field, FilterOp::Gte, value)
    }

    pub fn lt(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self::new(field, FilterOp::Lt, value)
    }

    pub fn lte(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self::new(field, FilterOp::Lte, value)
    }

    /// Filter with a custom test over the field value
    pub fn predicate(
        field: impl Into<String>,
        f: impl Fn(&FieldValue) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self::new(field, FilterOp::Predicate(FieldPredicate::new(f)), FieldValue::Null)
    }

    /// Address this filter by `name` (e.g. "propertyFilter")
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Declare the value meaning "no constraint" for this filter
    pub fn with_sentinel(mut self, sentinel: impl Into<FieldValue>) -> Self {
        self.sentinel = Some(sentinel.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn op(&self) -> &FilterOp {
        &self.op
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    pub fn sentinel(&self) -> Option<&FieldValue> {
        self.sentinel.as_ref()
    }

    /// Kind of the filtered field, known once the filter has been resolved
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Replace the active value
    pub fn set_value(&mut self, value: impl Into<FieldValue>) {
        self.value = value.into();
    }

    /// Whether the filter currently holds its sentinel
    pub fn is_unconstrained(&self) -> bool {
        self.sentinel.as_ref() == Some(&self.value)
    }

    /// Check the filter against a schema and record the field's kind.
    pub(crate) fn resolve(&mut self, schema: &EntitySchema) -> Result<(), ConfigError> {
        let kind = schema.require(&self.field, &format!("filter '{}'", self.name))?;
        if !self.op.accepts(kind) {
            return Err(ConfigError::InvalidValue {
                field: self.field.clone(),
                value: self.op.name().to_string(),
                message: format!("operation not applicable to a {:?} field", kind),
            });
        }
        self.kind = kind;
        Ok(())
    }

    /// Check if this filter lets the entity through.
    ///
    /// A field the entity lacks reads as null, which compares as the empty
    /// or zero value of the field's kind.
    pub fn passes<E: Entity + ?Sized>(&self, entity: &E) -> bool {
        if self.is_unconstrained() {
            return true;
        }

        let actual = entity.field_value(&self.field).unwrap_or(FieldValue::Null);
        match &self.op {
            FilterOp::Eq => actual.eq_as(&self.value, self.kind),
            FilterOp::Ne => !actual.eq_as(&self.value, self.kind),
            FilterOp::Contains => self.contains_value(&actual),
            FilterOp::Gt => actual.cmp_as(&self.value, self.kind) == Ordering::Greater,
            FilterOp::Gte => actual.cmp_as(&self.value, self.kind) != Ordering::Less,
            FilterOp::Lt => actual.cmp_as(&self.value, self.kind) == Ordering::Less,
            FilterOp::Lte => actual.cmp_as(&self.value, self.kind) != Ordering::Greater,
            FilterOp::Predicate(p) => p.test(&actual),
        }
    }

    /// Membership test. A list filter value matches when ANY of its
    /// entries is present.
    fn contains_value(&self, actual: &FieldValue) -> bool {
        let entries = actual.scope_entries();
        match &self.value {
            FieldValue::List(wanted) => wanted.iter().any(|w| entries.contains(&w.as_str())),
            other => {
                let wanted = other.display_text();
                entries.contains(&&*wanted)
            }
        }
    }
}

/// Check an entity against every filter (AND, short-circuiting).
pub fn passes_filters<E: Entity + ?Sized>(entity: &E, filters: &[Filter]) -> bool {
    filters.iter().all(|filter| filter.passes(entity))
}
