//! Sort specification, comparator and stable sort

use crate::core::entity::Entity;
use crate::core::error::ConfigError;
use crate::core::field::{FieldKind, FieldValue};
use crate::core::schema::EntitySchema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Direction of a sort
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    #[serde(alias = "asc")]
    Ascending,
    #[serde(alias = "desc")]
    Descending,
}

impl SortDirection {
    /// The opposite direction
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Parse `asc`/`ascending`/`desc`/`descending`
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(SortDirection::Ascending),
            "desc" | "descending" => Some(SortDirection::Descending),
            _ => None,
        }
    }

    /// Orient a natural-order result. Equal stays equal.
    pub fn apply(self, natural: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => natural,
            SortDirection::Descending => natural.reverse(),
        }
    }
}

/// Active sort column and direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    field: String,
    direction: SortDirection,
    kind: FieldKind,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
            kind: FieldKind::Text,
        }
    }

    /// Parse a sort expression
    ///
    /// # Format
    /// - `field:asc` or `field` (ascending)
    /// - `field:desc` (descending)
    pub fn parse(expr: &str) -> Option<Self> {
        let (field, direction) = match expr.split_once(':') {
            Some((field, dir)) => (field, SortDirection::parse(dir)?),
            None => (expr, SortDirection::Ascending),
        };
        let field = field.trim();
        if field.is_empty() {
            return None;
        }
        Some(Self::new(field, direction))
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub(crate) fn set_direction(&mut self, direction: SortDirection) {
        self.direction = direction;
    }

    /// Check the sort column against a schema and record its kind.
    pub(crate) fn resolve(&mut self, schema: &EntitySchema) -> Result<(), ConfigError> {
        self.kind = schema.require(&self.field, "sort")?;
        Ok(())
    }
}

/// Compare two entities on the sort column.
///
/// Strings compare on their raw value (no case folding), numbers
/// numerically and dates chronologically. Descending flips the result.
pub fn compare<E: Entity + ?Sized>(a: &E, b: &E, sort: &SortSpec) -> Ordering {
    let left = a.field_value(&sort.field).unwrap_or(FieldValue::Null);
    let right = b.field_value(&sort.field).unwrap_or(FieldValue::Null);
    sort.direction.apply(left.cmp_as(&right, sort.kind))
}

/// Sort borrowed entities in place. Ties keep their current relative order.
///
/// Each sort key is read once up front rather than on every comparison.
pub fn sort_stable<E: Entity + ?Sized>(items: &mut Vec<&E>, sort: &SortSpec) {
    let mut keyed: Vec<(FieldValue, &E)> = items
        .drain(..)
        .map(|entity| {
            let key = entity.field_value(&sort.field).unwrap_or(FieldValue::Null);
            (key, entity)
        })
        .collect();

    // slice::sort_by is a stable merge sort
    keyed.sort_by(|(a, _), (b, _)| sort.direction.apply(a.cmp_as(b, sort.kind)));

    items.extend(keyed.into_iter().map(|(_, entity)| entity));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::Record;

    fn account(number: &str, name: &str) -> Record {
        Record::new().with("number", number).with("name", name)
    }

    fn numbers(items: &[&Record]) -> Vec<String> {
        items
            .iter()
            .map(|r| r.get("number").unwrap().display_text().into_owned())
            .collect()
    }

    #[test]
    fn test_parse_sort_expression() {
        let sort = SortSpec::parse("amount:desc").unwrap();
        assert_eq!(sort.field(), "amount");
        assert_eq!(sort.direction(), SortDirection::Descending);

        let sort = SortSpec::parse("created_at").unwrap();
        assert_eq!(sort.direction(), SortDirection::Ascending);

        assert!(SortSpec::parse("amount:sideways").is_none());
        assert!(SortSpec::parse(":desc").is_none());
    }

    #[test]
    fn test_direction_toggle() {
        assert_eq!(SortDirection::Ascending.toggled(), SortDirection::Descending);
        assert_eq!(SortDirection::Descending.toggled(), SortDirection::Ascending);
        assert_eq!(SortDirection::Descending.apply(Ordering::Equal), Ordering::Equal);
    }

    #[test]
    fn test_compare_flips_with_direction() {
        let a = account("100", "A");
        let b = account("200", "B");
        let asc = SortSpec::new("number", SortDirection::Ascending);
        let desc = SortSpec::new("number", SortDirection::Descending);
        assert_eq!(compare(&a, &b, &asc), Ordering::Less);
        assert_eq!(compare(&a, &b, &desc), Ordering::Greater);
        assert_eq!(compare(&a, &a, &desc), Ordering::Equal);
    }

    #[test]
    fn test_sort_by_number_both_directions() {
        let accounts = [account("200", "Rent"), account("100", "Cash")];
        let mut items: Vec<&Record> = accounts.iter().collect();

        sort_stable(&mut items, &SortSpec::new("number", SortDirection::Ascending));
        assert_eq!(numbers(&items), vec!["100", "200"]);

        sort_stable(&mut items, &SortSpec::new("number", SortDirection::Descending));
        assert_eq!(numbers(&items), vec!["200", "100"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let accounts = [
            account("1", "Same"),
            account("2", "Other"),
            account("3", "Same"),
            account("4", "Same"),
        ];
        let mut items: Vec<&Record> = accounts.iter().collect();
        sort_stable(&mut items, &SortSpec::new("name", SortDirection::Descending));
        assert_eq!(numbers(&items), vec!["1", "3", "4", "2"]);
    }

    #[test]
    fn test_number_kind_sorts_numerically() {
        let mut sort = SortSpec::new("number", SortDirection::Ascending);
        let schema = EntitySchema::new("accounts").field("number", FieldKind::Number);
        sort.resolve(&schema).unwrap();

        let accounts = [account("1000", "A"), account("200", "B")];
        let mut items: Vec<&Record> = accounts.iter().collect();
        sort_stable(&mut items, &sort);
        assert_eq!(numbers(&items), vec!["200", "1000"]);
    }

    #[test]
    fn test_text_kind_sorts_lexicographically() {
        let accounts = [account("1000", "A"), account("200", "B")];
        let mut items: Vec<&Record> = accounts.iter().collect();
        sort_stable(&mut items, &SortSpec::new("number", SortDirection::Ascending));
        assert_eq!(numbers(&items), vec!["1000", "200"]);
    }

    #[test]
    fn test_missing_sort_key_sorts_first_ascending() {
        let with = account("5", "B");
        let without = Record::new().with("number", "x");
        let items_src = [with.clone(), without.clone().with("name", "A"), without];
        let mut items: Vec<&Record> = items_src.iter().collect();
        sort_stable(&mut items, &SortSpec::new("name", SortDirection::Ascending));
        assert_eq!(numbers(&items), vec!["x", "x", "5"]);
    }

    #[test]
    fn test_resolve_unknown_sort_field() {
        let mut sort = SortSpec::new("nubmer", SortDirection::Ascending);
        let schema = EntitySchema::new("accounts").field("number", FieldKind::Text);
        assert!(matches!(
            sort.resolve(&schema),
            Err(ConfigError::UnknownField { .. })
        ));
    }
}
