//! Property tests for the view pipeline over generated collections and views

use estate::prelude::*;
use proptest::prelude::*;
use std::cmp::Ordering;

const NAMES: &[&str] = &["Roof", "roof repair", "Lobby", "Boiler", "Parking"];
const PROPERTIES: &[&str] = &["Greenleaf A", "Greenleaf B", "Oak Street"];
const STATUSES: &[&str] = &["Active", "Planned", "Completed"];

const TERMS: &[&str] = &["", "r", "ROOF", "lob", "act", "zz"];
const PROPERTY_CHOICES: &[&str] = &[ALL_PROPERTIES, "Greenleaf A", "Oak Street"];
const STATUS_CHOICES: &[&str] = &[ALL_STATUSES, "Active", "Planned"];
const SORT_FIELDS: &[&str] = &["name", "status", "budget", "property"];

prop_compose! {
    fn arb_project()(
        name in prop::sample::select(NAMES),
        property in prop::option::of(prop::sample::select(PROPERTIES)),
        status in prop::sample::select(STATUSES),
        budget in prop::option::of(0i64..4),
    ) -> Record {
        let mut project = record! { "name" => name, "status" => status };
        if let Some(property) = property {
            project.set("property", property);
        }
        if let Some(budget) = budget {
            project.set("budget", budget);
        }
        project
    }
}

/// Projects tagged with their input position as `id`
fn arb_projects() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(arb_project(), 0..24).prop_map(|projects| {
        projects
            .into_iter()
            .enumerate()
            .map(|(i, project)| project.with("id", i as i64))
            .collect()
    })
}

#[derive(Debug)]
struct ViewParams {
    term: &'static str,
    property: &'static str,
    status: &'static str,
    sort: Option<(&'static str, SortDirection)>,
    scoped: bool,
    viewer: Option<ViewerContext>,
}

fn arb_params() -> impl Strategy<Value = ViewParams> {
    (
        prop::sample::select(TERMS),
        prop::sample::select(PROPERTY_CHOICES),
        prop::sample::select(STATUS_CHOICES),
        prop::option::of((prop::sample::select(SORT_FIELDS), any::<bool>())),
        any::<bool>(),
        0usize..4,
    )
        .prop_map(|(term, property, status, sort, scoped, viewer)| ViewParams {
            term,
            property,
            status,
            sort: sort.map(|(field, descending)| {
                let direction = if descending {
                    SortDirection::Descending
                } else {
                    SortDirection::Ascending
                };
                (field, direction)
            }),
            scoped,
            viewer: match viewer {
                0 => None,
                1 => Some(ViewerContext::manager()),
                2 => Some(ViewerContext::owner(["Greenleaf A"])),
                _ => Some(ViewerContext::tenant("Oak Street", None)),
            },
        })
}

fn build_spec(params: &ViewParams, filters_reversed: bool) -> ViewSpec {
    let mut filters = vec![
        Filter::eq("property", params.property)
            .named("propertyFilter")
            .with_sentinel(ALL_PROPERTIES),
        Filter::eq("status", params.status)
            .named("statusFilter")
            .with_sentinel(ALL_STATUSES),
    ];
    if filters_reversed {
        filters.reverse();
    }

    let mut builder = ViewSpec::builder(catalog::capital_projects())
        .search_fields(["name", "status"])
        .search_term(params.term)
        .sort(params.sort.map(|(field, direction)| SortSpec::new(field, direction)));
    for filter in filters {
        builder = builder.filter(filter);
    }
    if params.scoped {
        builder = builder.audience(AudienceRule::capital_projects());
    }
    builder.build().unwrap()
}

fn position(record: &Record) -> i64 {
    record.get("id").and_then(FieldValue::as_integer).unwrap_or(-1)
}

fn positions<E: Entity>(rows: &[E]) -> Vec<i64> {
    rows.iter()
        .filter_map(|row| row.field_value("id"))
        .filter_map(|id| id.as_integer())
        .collect()
}

proptest! {
    #[test]
    fn unconstrained_view_returns_input(projects in arb_projects(), term in prop::sample::select(TERMS)) {
        // A search term without search fields constrains nothing either
        let mut spec = ViewSpec::builder(catalog::capital_projects())
            .filter(Filter::eq("property", ALL_PROPERTIES).with_sentinel(ALL_PROPERTIES))
            .build()
            .unwrap();
        spec.set_search_term(term);
        prop_assert!(spec.is_identity());

        let rows = build_view(&projects, &spec, None);
        prop_assert_eq!(positions(&rows), positions(&projects));
    }

    #[test]
    fn view_is_subset_without_duplicates(projects in arb_projects(), params in arb_params()) {
        let spec = build_spec(&params, false);
        let rows = build_view(&projects, &spec, params.viewer.as_ref());

        prop_assert!(rows.len() <= projects.len());
        for (i, row) in rows.iter().enumerate() {
            prop_assert!(projects.iter().any(|p| std::ptr::eq(p, *row)));
            prop_assert!(!rows[..i].iter().any(|earlier| std::ptr::eq(*earlier, *row)));
        }
    }

    #[test]
    fn view_is_idempotent(projects in arb_projects(), params in arb_params()) {
        let spec = build_spec(&params, false);
        let viewer = params.viewer.as_ref();

        let once = build_view(&projects, &spec, viewer);
        let twice = build_view(&once, &spec, viewer);
        prop_assert_eq!(positions(&once), positions(&twice));
    }

    #[test]
    fn filter_order_does_not_change_view(projects in arb_projects(), params in arb_params()) {
        let viewer = params.viewer.as_ref();
        let forward = build_view(&projects, &build_spec(&params, false), viewer);
        let reversed = build_view(&projects, &build_spec(&params, true), viewer);
        prop_assert_eq!(positions(&forward), positions(&reversed));
    }

    #[test]
    fn sorted_view_is_ordered_and_stable(projects in arb_projects(), params in arb_params()) {
        let spec = build_spec(&params, false);
        let rows = build_view(&projects, &spec, params.viewer.as_ref());

        if let Some(sort) = spec.sort() {
            for pair in rows.windows(2) {
                match compare(pair[0], pair[1], sort) {
                    Ordering::Equal => {
                        prop_assert!(position(pair[0]) < position(pair[1]));
                    }
                    ordering => {
                        prop_assert_eq!(ordering, Ordering::Less);
                    }
                }
            }
        } else {
            let order = positions(&rows);
            prop_assert!(order.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn viewerless_scoped_view_is_empty(projects in arb_projects(), params in arb_params()) {
        let params = ViewParams { scoped: true, ..params };
        let spec = build_spec(&params, false);
        prop_assert!(build_view(&projects, &spec, None).is_empty());
    }
}
