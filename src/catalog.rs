//! Dashboard collections and their schemas
//!
//! Each named collection in the data store has one schema here. Field names
//! follow the store's camelCase keys.

use crate::core::field::FieldKind::{Boolean, Date, List, Number, Text};
use crate::core::schema::EntitySchema;

pub const ANNOUNCEMENTS: &str = "announcements";
pub const PROPERTIES: &str = "properties";
pub const CAPITAL_PROJECTS: &str = "capitalProjects";
pub const ACCOUNTS: &str = "accounts";
pub const LEASE_TEMPLATES: &str = "leaseTemplates";
pub const DOCUMENTS: &str = "documents";
pub const NOTIFICATIONS: &str = "notifications";
pub const CONVERSATIONS: &str = "conversations";
pub const MESSAGES: &str = "messages";
pub const VENDORS: &str = "vendors";
pub const PAYMENTS: &str = "payments";

/// Every collection the dashboard knows about
pub const COLLECTIONS: &[&str] = &[
    ANNOUNCEMENTS,
    PROPERTIES,
    CAPITAL_PROJECTS,
    ACCOUNTS,
    LEASE_TEMPLATES,
    DOCUMENTS,
    NOTIFICATIONS,
    CONVERSATIONS,
    MESSAGES,
    VENDORS,
    PAYMENTS,
];

/// Schema for a collection name
pub fn schema_for(collection: &str) -> Option<EntitySchema> {
    let schema = match collection {
        ANNOUNCEMENTS => announcements(),
        PROPERTIES => properties(),
        CAPITAL_PROJECTS => capital_projects(),
        ACCOUNTS => accounts(),
        LEASE_TEMPLATES => lease_templates(),
        DOCUMENTS => documents(),
        NOTIFICATIONS => notifications(),
        CONVERSATIONS => conversations(),
        MESSAGES => messages(),
        VENDORS => vendors(),
        PAYMENTS => payments(),
        _ => return None,
    };
    Some(schema)
}

pub fn announcements() -> EntitySchema {
    EntitySchema::new(ANNOUNCEMENTS)
        .field("id", Text)
        .field("title", Text)
        .field("content", Text)
        .field("author", Text)
        .field("priority", Text)
        .field("status", Text)
        .field("targetAudience", Text)
        .field("targetProperties", List)
        .field("createdAt", Date)
}

pub fn properties() -> EntitySchema {
    EntitySchema::new(PROPERTIES)
        .field("id", Text)
        .field("name", Text)
        .field("address", Text)
        .field("propertyType", Text)
        .field("units", Number)
        .field("owner", Text)
}

pub fn capital_projects() -> EntitySchema {
    EntitySchema::new(CAPITAL_PROJECTS)
        .field("id", Text)
        .field("name", Text)
        .field("description", Text)
        .field("property", Text)
        .field("status", Text)
        .field("budget", Number)
        .field("spent", Number)
        .field("startDate", Date)
        .field("endDate", Date)
}

pub fn accounts() -> EntitySchema {
    EntitySchema::new(ACCOUNTS)
        .field("id", Text)
        .field("number", Text)
        .field("name", Text)
        .field("type", Text)
        .field("description", Text)
        .field("balance", Number)
}

pub fn lease_templates() -> EntitySchema {
    EntitySchema::new(LEASE_TEMPLATES)
        .field("id", Text)
        .field("name", Text)
        .field("propertyType", Text)
        .field("status", Text)
        .field("content", Text)
        .field("updatedAt", Date)
}

pub fn documents() -> EntitySchema {
    EntitySchema::new(DOCUMENTS)
        .field("id", Text)
        .field("name", Text)
        .field("category", Text)
        .field("status", Text)
        .field("targetAudience", Text)
        .field("targetProperties", List)
        .field("size", Number)
        .field("uploadedAt", Date)
}

pub fn notifications() -> EntitySchema {
    EntitySchema::new(NOTIFICATIONS)
        .field("id", Text)
        .field("title", Text)
        .field("message", Text)
        .field("type", Text)
        .field("read", Boolean)
        .field("createdAt", Date)
}

pub fn conversations() -> EntitySchema {
    EntitySchema::new(CONVERSATIONS)
        .field("id", Text)
        .field("subject", Text)
        .field("property", Text)
        .field("participants", List)
        .field("lastMessageAt", Date)
}

pub fn messages() -> EntitySchema {
    EntitySchema::new(MESSAGES)
        .field("id", Text)
        .field("conversationId", Text)
        .field("sender", Text)
        .field("body", Text)
        .field("read", Boolean)
        .field("sentAt", Date)
}

pub fn vendors() -> EntitySchema {
    EntitySchema::new(VENDORS)
        .field("id", Text)
        .field("name", Text)
        .field("specialty", Text)
        .field("phone", Text)
        .field("email", Text)
        .field("rating", Number)
}

pub fn payments() -> EntitySchema {
    EntitySchema::new(PAYMENTS)
        .field("id", Text)
        .field("payee", Text)
        .field("property", Text)
        .field("category", Text)
        .field("amount", Number)
        .field("paidAt", Date)
}
