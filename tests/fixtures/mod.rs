//! Shared fixtures for the integration tests
//!
//! Provides seed records for the dashboard collections, the three kinds of
//! viewer, and `Unit`, a typed entity implementing `Entity` by hand so the
//! pipeline is exercised on something other than `Record`.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! mod fixtures;
//! use fixtures::*;
//! ```

#![allow(dead_code)]

use estate::prelude::*;

// ---------------------------------------------------------------------------
// Viewers
// ---------------------------------------------------------------------------

pub fn manager() -> ViewerContext {
    ViewerContext::manager()
}

/// Owner of Greenleaf A only
pub fn owner() -> ViewerContext {
    ViewerContext::owner(["Greenleaf A"])
}

/// Tenant of unit 4B at Oak Street
pub fn tenant() -> ViewerContext {
    ViewerContext::tenant("Oak Street", Some("4B".to_string()))
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

pub fn announcement(
    title: &str,
    status: &str,
    audience: &str,
    properties: &[&str],
    created_at: &str,
) -> Record {
    record! {
        "id" => title.to_lowercase().replace(' ', "-"),
        "title" => title,
        "content" => format!("{} details", title),
        "status" => status,
        "targetAudience" => audience,
        "targetProperties" => properties.to_vec(),
        "createdAt" => created_at,
    }
}

/// Five announcements covering every audience gate
pub fn announcements() -> Vec<Record> {
    vec![
        announcement("Pool Party", "Published", "All", &[], "2024-06-01"),
        announcement("Owner Meeting", "Published", "Owners", &["Greenleaf A"], "2024-06-03"),
        announcement("Water Shutoff", "Draft", "All", &["Oak Street"], "2024-06-05"),
        announcement("Move-in Guide", "Published", "Tenants", &["Oak Street"], "2024-05-20"),
        announcement("Roof Vote", "Published", "Owners", &["Greenleaf B"], "2024-06-02"),
    ]
}

pub fn capital_project(name: &str, property: &str, status: &str, budget: f64) -> Record {
    record! {
        "id" => name.to_lowercase().replace(' ', "-"),
        "name" => name,
        "property" => property,
        "status" => status,
        "budget" => budget,
    }
}

pub fn capital_projects() -> Vec<Record> {
    vec![
        capital_project("Roof replacement", "Greenleaf A", "Active", 48_000.0),
        capital_project("Parking resurfacing", "Greenleaf B", "Planned", 22_500.0),
        capital_project("Lobby refresh", "Oak Street", "Active", 9_800.0),
        capital_project("Boiler upgrade", "Greenleaf A", "Planned", 22_500.0),
    ]
}

pub fn accounts() -> Vec<Record> {
    vec![
        record! { "id" => "a1", "number" => "200", "name" => "Rent Income", "type" => "Income" },
        record! { "id" => "a2", "number" => "100", "name" => "Operating Cash", "type" => "Asset" },
        record! { "id" => "a3", "number" => "150", "name" => "Security Deposits", "type" => "Liability" },
    ]
}

pub fn vendors() -> Vec<Record> {
    vec![
        record! { "id" => "v1", "name" => "Crane Roofing", "specialty" => "Roofing", "rating" => 4.5 },
        record! { "id" => "v2", "name" => "Acme", "specialty" => "Plumbing", "rating" => 3.9 },
        record! { "id" => "v3", "name" => "Bolt Electric", "specialty" => "Electrical" },
    ]
}

pub fn payments() -> Vec<Record> {
    vec![
        record! { "payee" => "Acme", "amount" => 250.0 },
        record! { "payee" => "Crane Roofing", "amount" => 4_100.0 },
        record! { "payee" => "Acme", "amount" => 350.0 },
        record! { "payee" => "Bolt Electric", "amount" => 180.0 },
        record! { "payee" => "", "amount" => 99.0 },
    ]
}

/// A store seeded with every fixture collection
pub fn seeded_store() -> Result<InMemoryStore> {
    InMemoryStore::new()
        .with_records(catalog::ANNOUNCEMENTS, announcements())?
        .with_records(catalog::CAPITAL_PROJECTS, capital_projects())?
        .with_records(catalog::ACCOUNTS, accounts())?
        .with_records(catalog::VENDORS, vendors())?
        .with_records(catalog::PAYMENTS, payments())
}

/// Titles or names of the rows, in order
pub fn labels<E: Entity>(rows: &[E]) -> Vec<String> {
    rows.iter()
        .filter_map(|row| row.field_value("title").or_else(|| row.field_value("name")))
        .map(|value| value.display_text().into_owned())
        .collect()
}

// ---------------------------------------------------------------------------
// Unit: a typed entity
// ---------------------------------------------------------------------------

/// A rental unit with typed fields
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub label: String,
    pub property: String,
    pub bedrooms: i64,
    pub rent: f64,
    pub available_from: Option<DateTime<Utc>>,
}

impl Entity for Unit {
    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "label" => Some(FieldValue::from(self.label.as_str())),
            "property" => Some(FieldValue::from(self.property.as_str())),
            "bedrooms" => Some(FieldValue::Integer(self.bedrooms)),
            "rent" => Some(FieldValue::Float(self.rent)),
            "availableFrom" => self.available_from.map(FieldValue::DateTime),
            _ => None,
        }
    }
}

pub fn unit_schema() -> EntitySchema {
    EntitySchema::new("units")
        .field("label", FieldKind::Text)
        .field("property", FieldKind::Text)
        .field("bedrooms", FieldKind::Number)
        .field("rent", FieldKind::Number)
        .field("availableFrom", FieldKind::Date)
}

pub fn unit(label: &str, property: &str, bedrooms: i64, rent: f64, available: Option<&str>) -> Unit {
    Unit {
        label: label.to_string(),
        property: property.to_string(),
        bedrooms,
        rent,
        available_from: available.and_then(|s| FieldValue::from(s).as_datetime()),
    }
}

pub fn units() -> Vec<Unit> {
    vec![
        unit("1A", "Oak Street", 1, 1_250.0, Some("2024-07-01")),
        unit("2B", "Oak Street", 2, 1_800.0, None),
        unit("3C", "Greenleaf A", 3, 2_400.0, Some("2024-06-15")),
        unit("4D", "Greenleaf B", 2, 1_650.0, Some("2024-08-01")),
    ]
}
