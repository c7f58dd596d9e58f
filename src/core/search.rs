//! Case-insensitive substring search across a set of fields

use crate::core::entity::Entity;

/// Check whether `term` occurs in any of `fields` on `entity`.
///
/// Matching is a plain case-insensitive substring test: no tokenization and
/// no fuzzy matching. An empty term matches everything. A field the entity
/// does not have reads as the empty string, which never contains a
/// non-empty term.
pub fn matches<E, S>(entity: &E, term: &str, fields: &[S]) -> bool
where
    E: Entity + ?Sized,
    S: AsRef<str>,
{
    if term.is_empty() {
        return true;
    }
    matches_lowered(entity, &term.to_lowercase(), fields)
}

/// Same as [`matches`] with a term that is already lower-cased.
pub(crate) fn matches_lowered<E, S>(entity: &E, needle: &str, fields: &[S]) -> bool
where
    E: Entity + ?Sized,
    S: AsRef<str>,
{
    if needle.is_empty() {
        return true;
    }
    fields.iter().any(|field| {
        entity
            .field_value(field.as_ref())
            .is_some_and(|value| value.display_text().to_lowercase().contains(needle))
    })
}
