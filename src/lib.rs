//! # estate-views
//!
//! Declarative list views for a multi-role property-management dashboard.
//!
//! Every list screen (announcements, capital projects, accounts, lease
//! templates, documents, notifications, messages) does the same thing:
//! take an in-memory collection, hide what the viewer may not see, apply a
//! search term and a few dropdown filters, and sort by a column. This crate
//! implements that once.
//!
//! ## Features
//!
//! - **Search**: case-insensitive substring match over chosen fields
//! - **Filters**: equality, membership and range filters with per-filter
//!   "All ..." sentinels
//! - **Stable sorting**: text, number and date columns, ties keep input order
//! - **Audience rules**: publication, audience-class and property-scope gates
//!   evaluated against an explicit [`ViewerContext`](core::ViewerContext)
//! - **Validated specs**: unknown fields are rejected when a view is built,
//!   never while it runs
//! - **Configuration-Based**: declare screens in YAML
//!
//! ## Quick Start
//!
//! ```rust
//! use estate::prelude::*;
//!
//! let accounts = vec![
//!     record! { "number" => "200", "name" => "Rent Income" },
//!     record! { "number" => "100", "name" => "Operating Cash" },
//! ];
//!
//! let spec = ViewSpec::builder(catalog::accounts())
//!     .search_fields(["number", "name"])
//!     .sort_by("number", SortDirection::Ascending)
//!     .build()
//!     .unwrap();
//!
//! let rows = build_view(&accounts, &spec, None);
//! assert_eq!(rows[0].get("number"), Some(&FieldValue::from("100")));
//! ```

pub mod entities;

pub mod catalog;
pub mod config;
pub mod core;
pub mod ledger;
pub mod logging;
pub mod screen;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Types ===
    pub use crate::core::{
        auth::{Audience, AudienceRule, Gate, Role, Tenancy, ViewerContext, is_visible},
        entity::{Entity, Record},
        error::{ConfigError, EstateError, EstateResult, StoreError},
        field::{FieldKind, FieldValue},
        filter::{ALL_CATEGORIES, ALL_PROPERTIES, ALL_STATUSES, Filter, FilterOp, passes_filters},
        schema::EntitySchema,
        search::matches,
        service::CollectionStore,
        sort::{SortDirection, SortSpec, compare},
        view::{ViewSpec, ViewSpecBuilder, ViewState, build_view},
    };

    // === Macros ===
    pub use crate::record;

    // === Catalog, screens and ledger ===
    pub use crate::catalog;
    pub use crate::ledger::{PaymentSummary, requires_tax_form, summarize_payments};
    pub use crate::screen::Screen;

    // === Storage ===
    pub use crate::storage::InMemoryStore;

    // === Config ===
    pub use crate::config::{FilterConfig, ScreenConfig, SortConfig, ViewsConfig};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
