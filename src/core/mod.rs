//! Core module containing the view engine: fields, entities, filters,
//! sorting, audience rules and the view pipeline

pub mod auth;
pub mod entity;
pub mod error;
pub mod field;
pub mod filter;
pub mod schema;
pub mod search;
pub mod service;
pub mod sort;
pub mod view;

pub use auth::{Audience, AudienceRule, Gate, Role, Tenancy, ViewerContext, is_visible};
pub use entity::{Entity, Record};
pub use error::{ConfigError, EstateError, EstateResult, StoreError};
pub use field::{FieldKind, FieldValue};
pub use filter::{Filter, FilterOp, passes_filters};
pub use schema::EntitySchema;
pub use service::CollectionStore;
pub use sort::{SortDirection, SortSpec};
pub use view::{ViewSpec, ViewSpecBuilder, ViewState, build_view};
