//! Collection views: the declarative view specification and the pipeline
//! that turns a collection into the ordered list a screen renders.
//!
//! # Example
//! ```rust,ignore
//! use estate::prelude::*;
//!
//! let spec = ViewSpec::builder(catalog::announcements())
//!     .search_fields(["title", "content"])
//!     .filter(
//!         Filter::contains("targetProperties", ALL_PROPERTIES)
//!             .named("propertyFilter")
//!             .with_sentinel(ALL_PROPERTIES),
//!     )
//!     .sort_by("createdAt", SortDirection::Descending)
//!     .audience(AudienceRule::announcements())
//!     .build()?;
//!
//! let rows = build_view(&announcements, &spec, Some(&viewer));
//! ```

use crate::core::auth::{AudienceRule, ViewerContext};
use crate::core::entity::Entity;
use crate::core::error::ConfigError;
use crate::core::field::FieldValue;
use crate::core::filter::{Filter, passes_filters};
use crate::core::schema::EntitySchema;
use crate::core::search::matches_lowered;
use crate::core::sort::{SortDirection, SortSpec, sort_stable};
use std::sync::Arc;

/// Search, filter, sort and audience state for one list screen.
///
/// A `ViewSpec` can only be obtained through [`ViewSpecBuilder::build`],
/// which checks every referenced field against the entity schema. Every
/// mutation hook re-validates what it changes, so a spec in hand is always
/// well-formed and [`build_view`] never has to fail.
#[derive(Debug, Clone)]
pub struct ViewSpec {
    schema: Arc<EntitySchema>,
    search_fields: Vec<String>,
    search_term: String,
    filters: Vec<Filter>,
    sort: Option<SortSpec>,
    audience: Option<AudienceRule>,
}

impl ViewSpec {
    /// Start describing a view over entities of `schema`
    pub fn builder(schema: impl Into<Arc<EntitySchema>>) -> ViewSpecBuilder {
        ViewSpecBuilder {
            schema: schema.into(),
            search_fields: Vec::new(),
            search_term: String::new(),
            filters: Vec::new(),
            sort: None,
            audience: None,
        }
    }

    pub fn schema(&self) -> &EntitySchema {
        &self.schema
    }

    pub fn search_fields(&self) -> &[String] {
        &self.search_fields
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Look up a filter by name
    pub fn filter(&self, name: &str) -> Option<&Filter> {
        self.filters.iter().find(|f| f.name() == name)
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn audience(&self) -> Option<&AudienceRule> {
        self.audience.as_ref()
    }

    // === Mutation hooks ===

    /// Replace the search term
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Set the value of the filter called `name`
    pub fn set_filter_value(
        &mut self,
        name: &str,
        value: impl Into<FieldValue>,
    ) -> Result<(), ConfigError> {
        let filter = self
            .filters
            .iter_mut()
            .find(|f| f.name() == name)
            .ok_or_else(|| ConfigError::UnknownFilter {
                name: name.to_string(),
            })?;
        filter.set_value(value);
        Ok(())
    }

    /// Column-header click: the active column flips direction, any other
    /// column becomes active in ascending order.
    pub fn toggle_sort(&mut self, field: &str) -> Result<(), ConfigError> {
        if let Some(sort) = self.sort.as_mut().filter(|s| s.field() == field) {
            sort.set_direction(sort.direction().toggled());
            return Ok(());
        }
        let mut sort = SortSpec::new(field, SortDirection::Ascending);
        sort.resolve(&self.schema)?;
        self.sort = Some(sort);
        Ok(())
    }

    /// Sort on `field` in an explicit direction
    pub fn set_sort(&mut self, field: &str, direction: SortDirection) -> Result<(), ConfigError> {
        let mut sort = SortSpec::new(field, direction);
        sort.resolve(&self.schema)?;
        self.sort = Some(sort);
        Ok(())
    }

    /// Go back to pipeline (input) order
    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    /// Whether this view would return its input unchanged
    pub fn is_identity(&self) -> bool {
        self.audience.is_none()
            && self.sort.is_none()
            && (self.search_term.is_empty() || self.search_fields.is_empty())
            && self.filters.iter().all(Filter::is_unconstrained)
    }
}

/// Builder for [`ViewSpec`]
#[derive(Debug, Clone)]
pub struct ViewSpecBuilder {
    schema: Arc<EntitySchema>,
    search_fields: Vec<String>,
    search_term: String,
    filters: Vec<Filter>,
    sort: Option<SortSpec>,
    audience: Option<AudienceRule>,
}

impl ViewSpecBuilder {
    /// Fields the search term is matched against
    pub fn search_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Initial search term
    pub fn search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// Append a filter. Filters apply in the order they are added.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn sort_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(SortSpec::new(field, direction));
        self
    }

    pub fn sort(mut self, sort: Option<SortSpec>) -> Self {
        self.sort = sort;
        self
    }

    pub fn audience(mut self, rule: AudienceRule) -> Self {
        self.audience = Some(rule);
        self
    }

    /// Validate everything against the schema and produce the spec.
    pub fn build(self) -> Result<ViewSpec, ConfigError> {
        let Self {
            schema,
            search_fields,
            search_term,
            mut filters,
            mut sort,
            audience,
        } = self;

        for field in &search_fields {
            schema.require(field, "search")?;
        }

        for (i, filter) in filters.iter().enumerate() {
            if filters[..i].iter().any(|f| f.name() == filter.name()) {
                return Err(ConfigError::InvalidValue {
                    field: "filters".to_string(),
                    value: filter.name().to_string(),
                    message: "duplicate filter name".to_string(),
                });
            }
        }
        for filter in &mut filters {
            filter.resolve(&schema)?;
        }

        if let Some(sort) = sort.as_mut() {
            sort.resolve(&schema)?;
        }

        if let Some(rule) = &audience {
            rule.validate(&schema)?;
        }

        Ok(ViewSpec {
            schema,
            search_fields,
            search_term,
            filters,
            sort,
            audience,
        })
    }
}

/// Compute the ordered, filtered view of `entities`.
///
/// Stages, in order:
/// 1. audience rule (if any) against `viewer`
/// 2. search term over the search fields (skipped when there are none)
/// 3. filters
/// 4. stable sort (if any); otherwise input order is kept
///
/// The entities are only borrowed. An empty result is a normal outcome.
pub fn build_view<'a, E: Entity>(
    entities: &'a [E],
    spec: &ViewSpec,
    viewer: Option<&ViewerContext>,
) -> Vec<&'a E> {
    let needle = spec.search_term.to_lowercase();

    let mut rows: Vec<&'a E> = entities
        .iter()
        .filter(|e| spec.audience.as_ref().is_none_or(|rule| rule.check(*e, viewer)))
        .filter(|e| {
            spec.search_fields.is_empty() || matches_lowered(*e, &needle, &spec.search_fields)
        })
        .filter(|e| passes_filters(*e, &spec.filters))
        .collect();

    if let Some(sort) = &spec.sort {
        sort_stable(&mut rows, sort);
    }

    tracing::debug!(
        entity_type = %spec.schema.name(),
        input = entities.len(),
        output = rows.len(),
        sorted = spec.sort.is_some(),
        "built collection view"
    );

    rows
}

/// View state owned by one screen instance.
///
/// Holds the screen's default spec alongside the current one so that
/// navigating away can put everything back with [`ViewState::reset`].
#[derive(Debug, Clone)]
pub struct ViewState {
    defaults: ViewSpec,
    current: ViewSpec,
}

impl ViewState {
    pub fn new(defaults: ViewSpec) -> Self {
        Self {
            current: defaults.clone(),
            defaults,
        }
    }

    /// The current spec
    pub fn spec(&self) -> &ViewSpec {
        &self.current
    }

    /// A copy of the current spec, for handing to another reader
    pub fn snapshot(&self) -> ViewSpec {
        self.current.clone()
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.current.set_search_term(term);
    }

    pub fn set_filter_value(
        &mut self,
        name: &str,
        value: impl Into<FieldValue>,
    ) -> Result<(), ConfigError> {
        self.current.set_filter_value(name, value)
    }

    pub fn toggle_sort(&mut self, field: &str) -> Result<(), ConfigError> {
        self.current.toggle_sort(field)
    }

    pub fn clear_sort(&mut self) {
        self.current.clear_sort();
    }

    /// Restore the screen defaults
    pub fn reset(&mut self) {
        self.current = self.defaults.clone();
    }

    /// Run the current spec over `entities`
    pub fn view<'a, E: Entity>(
        &self,
        entities: &'a [E],
        viewer: Option<&ViewerContext>,
    ) -> Vec<&'a E> {
        build_view(entities, &self.current, viewer)
    }
}
